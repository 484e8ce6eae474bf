//! Re-rendering of extracted layouts.
//!
//! Two modes are supported:
//!
//! - **Exact**: every stored run is drawn at its stored position on a page of
//!   the stored size. The top-down `y` of a run is flipped back with
//!   `page_height - y - run_height`.
//! - **Reflow**: page text is typeset line by line from the top of a fresh
//!   A4 page, at a fixed size and line step, without wrapping. Lines that do
//!   not fit above the bottom margin are dropped.
//!
//! Both modes set all text in one standard font; the font identity of the
//! source is not preserved.

use super::document_writer::{DocumentWriter, PageCanvas, TextDraw};
use crate::error::Result;
use crate::extractors::DocumentExtraction;
use std::path::Path;

/// Size used in exact mode for runs whose stored size is zero.
pub const FALLBACK_FONT_SIZE: f32 = 12.0;

/// Page and typesetting parameters of reflow mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReflowConfig {
    /// Output page width (A4 by default)
    pub page_width: f32,
    /// Output page height (A4 by default)
    pub page_height: f32,
    /// Left, top and bottom margin
    pub margin: f32,
    /// Point size of every line
    pub font_size: f32,
    /// Distance between consecutive baselines
    pub line_height: f32,
}

impl Default for ReflowConfig {
    fn default() -> Self {
        Self {
            page_width: 595.28,
            page_height: 841.89,
            margin: 50.0,
            font_size: 12.0,
            line_height: 15.0,
        }
    }
}

impl ReflowConfig {
    /// Set the output page size.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Set the margin.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the point size.
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Set the baseline step.
    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }
}

/// Renders a [`DocumentExtraction`] back into a PDF.
///
/// # Examples
///
/// ```no_run
/// use pdf_relayout::backend::LopdfBackend;
/// use pdf_relayout::extractors::LayoutExtractor;
/// use pdf_relayout::writer::{Base14Writer, LayoutWriter};
///
/// let bytes = std::fs::read("in.pdf")?;
/// let extraction = LayoutExtractor::new(LopdfBackend).extract(&bytes, "in.pdf")?;
/// let writer = LayoutWriter::new(Base14Writer::new());
/// writer.save_exact(&extraction, "exact.pdf")?;
/// writer.save_reflowed(&extraction, "reflowed.pdf")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct LayoutWriter<W> {
    writer: W,
    reflow: ReflowConfig,
}

impl<W: DocumentWriter> LayoutWriter<W> {
    /// Create a layout writer with the default reflow parameters.
    pub fn new(writer: W) -> Self {
        Self::with_reflow_config(writer, ReflowConfig::default())
    }

    /// Create a layout writer with custom reflow parameters.
    pub fn with_reflow_config(writer: W, reflow: ReflowConfig) -> Self {
        Self { writer, reflow }
    }

    /// Reflow parameters in use.
    pub fn reflow_config(&self) -> &ReflowConfig {
        &self.reflow
    }

    /// Canvases reproducing every stored run at its stored position.
    pub fn exact_canvases(&self, extraction: &DocumentExtraction) -> Vec<PageCanvas> {
        extraction
            .pages
            .iter()
            .map(|page| {
                let mut canvas = PageCanvas::new(page.width, page.height);
                for item in &page.items {
                    let font_size = if item.font_size == 0 {
                        FALLBACK_FONT_SIZE
                    } else {
                        item.font_size as f32
                    };
                    let y = page.height - item.y as f32 - item.height as f32;
                    canvas.draw(TextDraw::new(item.text.clone(), item.x as f32, y, font_size));
                }
                canvas
            })
            .collect()
    }

    /// Canvases typesetting each page's text from the top of a fresh page.
    pub fn reflow_canvases(&self, extraction: &DocumentExtraction) -> Vec<PageCanvas> {
        let cfg = &self.reflow;
        extraction
            .pages
            .iter()
            .map(|page| {
                let mut canvas = PageCanvas::new(cfg.page_width, cfg.page_height);
                let mut cursor = cfg.page_height - cfg.margin;
                let mut dropped = 0;
                for line in page.text.split('\n') {
                    if cursor > cfg.margin {
                        if !line.is_empty() {
                            canvas.draw(TextDraw::new(line, cfg.margin, cursor, cfg.font_size));
                        }
                    } else {
                        dropped += 1;
                    }
                    cursor -= cfg.line_height;
                }
                if dropped > 0 {
                    log::debug!(
                        "Page {}: {} line(s) did not fit the reflowed page",
                        page.page_number,
                        dropped
                    );
                }
                canvas
            })
            .collect()
    }

    /// Render with every run at its stored position.
    pub fn render_exact(&self, extraction: &DocumentExtraction) -> Result<Vec<u8>> {
        self.write(&self.exact_canvases(extraction), "exact")
    }

    /// Render page text as reflowed lines.
    pub fn render_reflowed(&self, extraction: &DocumentExtraction) -> Result<Vec<u8>> {
        self.write(&self.reflow_canvases(extraction), "reflow")
    }

    /// Render in exact mode and write the result to `path`.
    pub fn save_exact(&self, extraction: &DocumentExtraction, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.render_exact(extraction)?;
        persist(path.as_ref(), &bytes)
    }

    /// Render in reflow mode and write the result to `path`.
    pub fn save_reflowed(
        &self,
        extraction: &DocumentExtraction,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let bytes = self.render_reflowed(extraction)?;
        persist(path.as_ref(), &bytes)
    }

    fn write(&self, canvases: &[PageCanvas], mode: &str) -> Result<Vec<u8>> {
        self.writer.write_document(canvases).inspect_err(|e| {
            log::error!("Rendering {} pages in {} mode failed: {}", canvases.len(), mode, e);
        })
    }
}

fn persist(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).map_err(|e| {
        log::error!("Writing {} failed: {}", path.display(), e);
        e.into()
    })
}
