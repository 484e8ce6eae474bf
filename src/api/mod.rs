//! High-level API over the default collaborators.
//!
//! These free functions wire [`LopdfBackend`] and [`Base14Writer`] into the
//! extractors and the layout writer. Use the underlying types directly to
//! plug in another backend or writer.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_relayout::api;
//! use pdf_relayout::ExtractionOptions;
//!
//! let bytes = std::fs::read("paper.pdf")?;
//! let extraction = api::extract_with_layout(&bytes, &ExtractionOptions::default())?;
//! std::fs::write("paper.json", extraction.to_json()?)?;
//! std::fs::write("paper.reflowed.pdf", api::render_reflowed(&extraction)?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::backend::LopdfBackend;
use crate::config::ExtractionOptions;
use crate::error::Result;
use crate::extractors::{DocumentExtraction, LayoutExtractor, extract_text};
use crate::writer::{Base14Writer, LayoutWriter};
use std::path::Path;

/// Source identifier recorded for in-memory input.
pub const MEMORY_SOURCE: &str = "memory";

/// Extract plain text: per page, run texts joined by spaces, then a newline.
pub fn extract_plain_text(bytes: &[u8]) -> Result<String> {
    extract_text(&LopdfBackend, bytes)
}

/// Extract the layout of every page.
pub fn extract_with_layout(bytes: &[u8], options: &ExtractionOptions) -> Result<DocumentExtraction> {
    LayoutExtractor::with_options(LopdfBackend, *options).extract(bytes, MEMORY_SOURCE)
}

/// Read a PDF file and extract its layout, recording the path as the source.
pub fn extract_file(path: impl AsRef<Path>, options: &ExtractionOptions) -> Result<DocumentExtraction> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    LayoutExtractor::with_options(LopdfBackend, *options).extract(&bytes, &path.display().to_string())
}

/// Re-render every run at its stored position.
pub fn render_exact(extraction: &DocumentExtraction) -> Result<Vec<u8>> {
    LayoutWriter::new(Base14Writer::new()).render_exact(extraction)
}

/// Re-render page text as reflowed lines on A4 pages.
pub fn render_reflowed(extraction: &DocumentExtraction) -> Result<Vec<u8>> {
    LayoutWriter::new(Base14Writer::new()).render_reflowed(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_garbage_input_is_parse_error() {
        assert!(matches!(extract_plain_text(b"garbage"), Err(Error::Parse { .. })));
        assert!(matches!(
            extract_with_layout(b"garbage", &ExtractionOptions::default()),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract_file(dir.path().join("nope.pdf"), &ExtractionOptions::default());
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
