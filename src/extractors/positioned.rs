//! Layout-aware extraction.
//!
//! [`LayoutExtractor`] drives a [`PdfBackend`] page by page and runs the
//! layout pipeline on each page:
//!
//! raw runs → normalized runs → lines with synthesized spacing → structure.
//!
//! Pages are processed strictly in parser order. The first parse failure
//! aborts the whole extraction; there is no partial result.

use crate::backend::{PdfBackend, RawPage};
use crate::config::ExtractionOptions;
use crate::error::Result;
use crate::layout::{Line, PageStructure, TextRun, analyze_page_structure, assemble_lines, normalize_runs};
use serde::{Deserialize, Serialize};

/// Layout of one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageExtraction {
    /// 1-based page number
    pub page_number: usize,
    /// Viewport width at scale 1.0
    pub width: f32,
    /// Viewport height at scale 1.0
    pub height: f32,
    /// Normalized runs in emission order
    pub items: Vec<TextRun>,
    /// Lines from top to bottom; empty when line grouping is disabled
    pub lines: Vec<Line>,
    /// Line texts joined with `\n`
    pub text: String,
    /// Geometric structure; `None` when column detection is disabled
    pub structure: Option<PageStructure>,
}

/// Provenance of a [`DocumentExtraction`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionMetadata {
    /// Caller-supplied source identifier (file name, URL, ...)
    pub source: String,
    /// Extraction time, RFC 3339 UTC
    pub timestamp: String,
    /// Options the extraction ran with
    pub options: ExtractionOptions,
}

/// Layout of a whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentExtraction {
    /// Pages in document order
    pub pages: Vec<PageExtraction>,
    /// Number of pages reported by the parser
    pub total_pages: usize,
    /// Provenance
    pub metadata: ExtractionMetadata,
}

impl DocumentExtraction {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load an extraction previously written by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Text of every page, separated by blank lines.
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Layout extractor over a PDF-parsing backend.
///
/// # Examples
///
/// ```no_run
/// use pdf_relayout::backend::LopdfBackend;
/// use pdf_relayout::extractors::LayoutExtractor;
///
/// let bytes = std::fs::read("report.pdf")?;
/// let extraction = LayoutExtractor::new(LopdfBackend).extract(&bytes, "report.pdf")?;
/// for page in &extraction.pages {
///     println!("--- page {} ---\n{}", page.page_number, page.text);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct LayoutExtractor<B> {
    backend: B,
    options: ExtractionOptions,
}

impl<B: PdfBackend> LayoutExtractor<B> {
    /// Create an extractor with default options.
    pub fn new(backend: B) -> Self {
        Self::with_options(backend, ExtractionOptions::default())
    }

    /// Create an extractor with the given options.
    pub fn with_options(backend: B, options: ExtractionOptions) -> Self {
        Self { backend, options }
    }

    /// Active options.
    pub fn options(&self) -> &ExtractionOptions {
        &self.options
    }

    /// Extract the layout of every page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`](crate::Error::Parse) when the document cannot
    /// be opened or any page cannot be read. Page-level failures carry the
    /// 1-based page number.
    pub fn extract(&self, bytes: &[u8], source: &str) -> Result<DocumentExtraction> {
        let doc = self.backend.open(bytes)?;
        let total_pages = self.backend.page_count(&doc);

        let mut pages = Vec::with_capacity(total_pages);
        for index in 0..total_pages {
            let page_number = index + 1;
            log::info!("Processing page {}/{}", page_number, total_pages);

            let raw = self
                .backend
                .load_page(&doc, index)
                .map_err(|e| e.on_page(page_number))?;
            pages.push(self.extract_page(&raw, page_number));
        }

        Ok(DocumentExtraction {
            pages,
            total_pages,
            metadata: ExtractionMetadata {
                source: source.to_string(),
                timestamp: chrono::Utc::now().to_rfc3339(),
                options: self.options,
            },
        })
    }

    /// Run the layout pipeline on one already-loaded page.
    pub fn extract_page(&self, raw: &RawPage, page_number: usize) -> PageExtraction {
        let options = &self.options;
        let items = normalize_runs(&raw.runs, raw.height);

        let lines = if options.group_by_lines {
            assemble_lines(&items, options.layout.line_threshold, options.preserve_spacing)
        } else {
            Vec::new()
        };

        let text = lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let structure = options
            .detect_columns
            .then(|| analyze_page_structure(&lines, raw.width, &options.layout));

        log::debug!(
            "Page {}: {} runs, {} lines",
            page_number,
            items.len(),
            lines.len()
        );

        PageExtraction {
            page_number,
            width: raw.width,
            height: raw.height,
            items,
            lines,
            text,
            structure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RawTextRun;
    use crate::error::Error;

    /// Backend serving canned pages; `None` pages fail to load.
    struct CannedBackend {
        pages: Vec<Option<RawPage>>,
    }

    impl PdfBackend for CannedBackend {
        type Document = ();

        fn open(&self, bytes: &[u8]) -> Result<()> {
            if bytes == b"broken" {
                return Err(Error::parse("no xref"));
            }
            Ok(())
        }

        fn page_count(&self, _doc: &()) -> usize {
            self.pages.len()
        }

        fn load_page(&self, _doc: &(), index: usize) -> Result<RawPage> {
            self.pages[index]
                .clone()
                .ok_or_else(|| Error::parse("truncated content stream"))
        }
    }

    fn raw(text: &str, x: f32, baseline: f32) -> RawTextRun {
        RawTextRun::new(text, [12.0, 0.0, 0.0, 12.0, x, baseline], 6.0 * text.len() as f32, 12.0, "F1")
    }

    fn page(runs: Vec<RawTextRun>) -> Option<RawPage> {
        Some(RawPage {
            width: 600.0,
            height: 800.0,
            runs,
        })
    }

    #[test]
    fn test_extract_lines_and_text() {
        let backend = CannedBackend {
            pages: vec![page(vec![
                raw("world", 100.0, 700.0),
                raw("Hello", 10.0, 702.0),
                raw("Second", 10.0, 650.0),
            ])],
        };
        let result = LayoutExtractor::new(backend).extract(b"pdf", "test.pdf").unwrap();

        assert_eq!(result.total_pages, 1);
        assert_eq!(result.metadata.source, "test.pdf");
        let page = &result.pages[0];
        assert_eq!(page.page_number, 1);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.items[0].index, 0);
        assert_eq!(page.lines.len(), 2);
        // First-seen baseline is the representative
        assert_eq!(page.lines[0].y, 100);
        assert_eq!(page.lines[0].items[0].text, "Hello");
        assert_eq!(page.lines[0].items[1].index, 0);
        assert_eq!(page.lines[1].text, "Second");
        assert!(page.structure.is_some());
    }

    #[test]
    fn test_group_by_lines_disabled() {
        let backend = CannedBackend {
            pages: vec![page(vec![raw("a", 10.0, 700.0)])],
        };
        let options = ExtractionOptions::new().with_group_by_lines(false);
        let result = LayoutExtractor::with_options(backend, options)
            .extract(b"pdf", "x")
            .unwrap();
        let page = &result.pages[0];
        assert_eq!(page.items.len(), 1);
        assert!(page.lines.is_empty());
        assert_eq!(page.text, "");
        assert!(page.structure.as_ref().unwrap().is_empty());
    }

    #[test]
    fn test_detect_columns_disabled() {
        let backend = CannedBackend {
            pages: vec![page(vec![raw("a", 10.0, 700.0)])],
        };
        let options = ExtractionOptions::new().with_detect_columns(false);
        let result = LayoutExtractor::with_options(backend, options)
            .extract(b"pdf", "x")
            .unwrap();
        assert!(result.pages[0].structure.is_none());
        assert!(!result.metadata.options.detect_columns);
    }

    #[test]
    fn test_empty_page() {
        let backend = CannedBackend {
            pages: vec![page(Vec::new())],
        };
        let result = LayoutExtractor::new(backend).extract(b"pdf", "x").unwrap();
        let page = &result.pages[0];
        assert!(page.lines.is_empty());
        assert_eq!(page.text, "");
        assert_eq!(page.structure, Some(PageStructure::default()));
    }

    #[test]
    fn test_open_failure_aborts() {
        let backend = CannedBackend { pages: Vec::new() };
        let err = LayoutExtractor::new(backend).extract(b"broken", "x").unwrap_err();
        assert!(matches!(err, Error::Parse { page: None, .. }));
    }

    #[test]
    fn test_page_failure_carries_page_number() {
        let backend = CannedBackend {
            pages: vec![page(vec![raw("ok", 0.0, 700.0)]), None, page(Vec::new())],
        };
        let err = LayoutExtractor::new(backend).extract(b"pdf", "x").unwrap_err();
        assert!(matches!(err, Error::Parse { page: Some(2), .. }));
    }

    #[test]
    fn test_json_round_trip() {
        let backend = CannedBackend {
            pages: vec![page(vec![raw("Title", 270.0, 700.0)])],
        };
        let result = LayoutExtractor::new(backend).extract(b"pdf", "doc").unwrap();
        let json = result.to_json().unwrap();
        assert!(json.contains("\"pageNumber\": 1"));
        assert!(json.contains("\"tableCandidates\""));
        assert_eq!(DocumentExtraction::from_json(&json).unwrap(), result);
    }

    #[test]
    fn test_timestamp_is_rfc3339() {
        let backend = CannedBackend { pages: Vec::new() };
        let result = LayoutExtractor::new(backend).extract(b"pdf", "x").unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&result.metadata.timestamp).is_ok());
        assert_eq!(result.total_pages, 0);
    }
}
