//! Text and layout extraction from PDF documents.
//!
//! Both extractors are generic over the [`PdfBackend`](crate::backend::PdfBackend)
//! that parses the document.

pub mod positioned;
pub mod text;

pub use positioned::{DocumentExtraction, ExtractionMetadata, LayoutExtractor, PageExtraction};
pub use text::extract_text;
