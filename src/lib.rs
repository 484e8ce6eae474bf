// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::should_implement_trait)]

//! # pdf_relayout
//!
//! PDF layout reconstruction: positioned text runs in, reading-order lines and
//! simple page structure out, and back to PDF again.
//!
//! ## Core Features
//!
//! - **Line assembly**: first-fit vertical clustering of runs into lines,
//!   with inter-word spacing synthesized from horizontal gaps
//! - **Structure inference**: left-edge columns, similar-width table
//!   candidates and left/center/right alignment, from geometry alone
//! - **Re-rendering**: exact-position or reflowed output through a standard
//!   font; the inverse transform is approximate by nature
//! - **Pluggable collaborators**: parsing behind [`backend::PdfBackend`]
//!   (lopdf by default), writing behind [`writer::DocumentWriter`]
//!
//! ## Pipeline
//!
//! ```text
//! PDF bytes
//!     ↓ PdfBackend (LopdfBackend + content::TextInterpreter)
//! RawTextRun[] (bottom-up user space)
//!     ↓ layout::normalizer
//! TextRun[] (top-down integer page units)
//!     ↓ layout::clustering + layout::spacing
//! Line[] + page text
//!     ↓ layout::page_analyzer
//! PageStructure (columns, table candidates, alignment)
//!     ↓ writer::LayoutWriter (exact | reflow)
//! PDF bytes
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_relayout::{api, ExtractionOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("paper.pdf")?;
//! let extraction = api::extract_with_layout(&bytes, &ExtractionOptions::default())?;
//! for page in &extraction.pages {
//!     println!("{}", page.text);
//!     if let Some(structure) = &page.structure {
//!         println!("{} column(s)", structure.columns.len());
//!     }
//! }
//! std::fs::write("paper.exact.pdf", api::render_exact(&extraction)?)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of Apache License, Version 2.0
//! (<http://www.apache.org/licenses/LICENSE-2.0>) or the MIT license
//! (<http://opensource.org/licenses/MIT>), at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// PDF parsing collaborator
pub mod backend;
pub mod content;
pub mod fonts;

// Layout analysis
pub mod layout;

// Extraction
pub mod extractors;

// PDF writing
pub mod object;
pub mod writer;

// High-level API
pub mod api;

// Re-exports
pub use api::{extract_file, extract_plain_text, extract_with_layout, render_exact, render_reflowed};
pub use config::{ExtractionOptions, LayoutConfig};
pub use error::{Error, Result};
pub use extractors::{DocumentExtraction, ExtractionMetadata, LayoutExtractor, PageExtraction};
pub use layout::{
    AlignmentClassification, ColumnGroup, Line, PageStructure, TableCandidate, TextRun,
};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
