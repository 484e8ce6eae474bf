//! PDF-parsing collaborator boundary.
//!
//! Layout extraction never touches PDF syntax directly. It asks a
//! [`PdfBackend`] for the page count, and for each page its viewport and the
//! text runs in content-stream order, with every run carrying its text
//! rendering matrix in user space.
//!
//! [`LopdfBackend`] is the bundled implementation.

pub mod lopdf_backend;

pub use lopdf_backend::{LopdfBackend, LopdfDocument};

use crate::error::Result;

/// US Letter, used when a page declares no usable box.
pub const DEFAULT_PAGE_SIZE: (f32, f32) = (612.0, 792.0);

/// A text run as reported by the parser, in bottom-up PDF user space.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTextRun {
    /// Decoded text of the run
    pub text: String,
    /// Text rendering matrix `[a, b, c, d, e, f]`; `(e, f)` is the run origin
    pub transform: [f32; 6],
    /// Advance width in user space
    pub width: f32,
    /// Glyph height in user space
    pub height: f32,
    /// Font resource name
    pub font_name: String,
}

impl RawTextRun {
    /// Create a raw run.
    pub fn new(
        text: impl Into<String>,
        transform: [f32; 6],
        width: f32,
        height: f32,
        font_name: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            transform,
            width,
            height,
            font_name: font_name.into(),
        }
    }
}

/// One page as reported by the parser.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawPage {
    /// Viewport width at scale 1.0
    pub width: f32,
    /// Viewport height at scale 1.0
    pub height: f32,
    /// Text runs in emission order
    pub runs: Vec<RawTextRun>,
}

/// Source of positioned text runs.
///
/// Implementations must be usable from several threads at once; each call
/// works on its own document handle.
///
/// # Examples
///
/// ```
/// use pdf_relayout::backend::{PdfBackend, RawPage, RawTextRun};
/// use pdf_relayout::Result;
///
/// struct OnePage;
///
/// impl PdfBackend for OnePage {
///     type Document = ();
///
///     fn open(&self, _bytes: &[u8]) -> Result<()> {
///         Ok(())
///     }
///
///     fn page_count(&self, _doc: &()) -> usize {
///         1
///     }
///
///     fn load_page(&self, _doc: &(), _index: usize) -> Result<RawPage> {
///         Ok(RawPage {
///             width: 600.0,
///             height: 800.0,
///             runs: vec![RawTextRun::new("Hi", [12.0, 0.0, 0.0, 12.0, 50.0, 700.0], 12.0, 12.0, "F1")],
///         })
///     }
/// }
///
/// let backend = OnePage;
/// let doc = backend.open(b"")?;
/// assert_eq!(backend.load_page(&doc, 0)?.runs.len(), 1);
/// # Ok::<(), pdf_relayout::Error>(())
/// ```
pub trait PdfBackend: Send + Sync {
    /// Parsed document handle.
    type Document;

    /// Parse a document from raw bytes.
    fn open(&self, bytes: &[u8]) -> Result<Self::Document>;

    /// Number of pages in the document.
    fn page_count(&self, doc: &Self::Document) -> usize;

    /// Load the viewport and text runs of the page at 0-based `index`.
    fn load_page(&self, doc: &Self::Document, index: usize) -> Result<RawPage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_run_constructor() {
        let run = RawTextRun::new("abc", [1.0, 0.0, 0.0, 1.0, 2.0, 3.0], 4.0, 5.0, String::from("F2"));
        assert_eq!(run.text, "abc");
        assert_eq!(run.transform[4], 2.0);
        assert_eq!(run.font_name, "F2");
    }

    #[test]
    fn test_default_page_is_empty() {
        let page = RawPage::default();
        assert!(page.runs.is_empty());
        assert_eq!(page.width, 0.0);
    }
}
