//! PDF writing module for re-rendering extracted layouts.
//!
//! ## Architecture
//!
//! ```text
//! DocumentExtraction
//!     ↓
//! [LayoutWriter] (exact or reflow placement → PageCanvas[])
//!     ↓
//! [DocumentWriter] (collaborator boundary; Base14Writer by default)
//!     ↓
//! [PdfWriter] (assembles complete PDF structure)
//!     ↓
//! [ContentStreamBuilder] / [ObjectSerializer]
//!     ↓
//! PDF bytes
//! ```

pub mod content_stream;
pub mod document_writer;
pub mod layout_writer;
pub mod object_serializer;
pub mod pdf_writer;

pub use content_stream::{ContentStreamBuilder, ContentStreamOp};
pub use document_writer::{Base14Writer, DEFAULT_FONT, DocumentWriter, PageCanvas, TextDraw};
pub use layout_writer::{FALLBACK_FONT_SIZE, LayoutWriter, ReflowConfig};
pub use object_serializer::ObjectSerializer;
pub use pdf_writer::{PageBuilder, PdfWriter, PdfWriterConfig};
