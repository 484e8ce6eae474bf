//! PDF-writing collaborator boundary.
//!
//! The layout writer describes output as [`PageCanvas`]es of positioned text
//! draws and hands them to a [`DocumentWriter`]. [`Base14Writer`] is the
//! bundled implementation: standard Helvetica, WinAnsi-encoded, no font
//! embedding.

use super::pdf_writer::{PdfWriter, PdfWriterConfig};
use crate::error::Result;
use crate::fonts::encode_winansi_lossy;
use serde::{Deserialize, Serialize};

/// Font every draw is set in.
pub const DEFAULT_FONT: &str = "Helvetica";

/// One string placed on a canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDraw {
    /// Text to show
    pub text: String,
    /// Baseline origin x in PDF user space
    pub x: f32,
    /// Baseline origin y in PDF user space (bottom-left origin)
    pub y: f32,
    /// Point size
    pub font_size: f32,
}

impl TextDraw {
    /// Create a draw.
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size,
        }
    }
}

/// A page to be written.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageCanvas {
    /// Page width
    pub width: f32,
    /// Page height
    pub height: f32,
    /// Draws in painting order
    pub draws: Vec<TextDraw>,
}

impl PageCanvas {
    /// Create an empty canvas.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            draws: Vec::new(),
        }
    }

    /// Append a draw.
    pub fn draw(&mut self, draw: TextDraw) -> &mut Self {
        self.draws.push(draw);
        self
    }
}

/// Serializer of canvases into a PDF file.
pub trait DocumentWriter: Send + Sync {
    /// Produce the bytes of a document with one page per canvas.
    fn write_document(&self, pages: &[PageCanvas]) -> Result<Vec<u8>>;
}

/// [`DocumentWriter`] on top of [`PdfWriter`], using the standard Helvetica
/// font.
///
/// Characters outside WinAnsi are written as `?`; a warning is logged once
/// per affected page.
///
/// # Examples
///
/// ```
/// use pdf_relayout::writer::{Base14Writer, DocumentWriter, PageCanvas, TextDraw};
///
/// let mut page = PageCanvas::new(200.0, 100.0);
/// page.draw(TextDraw::new("Hello", 10.0, 50.0, 12.0));
/// let bytes = Base14Writer::new().write_document(&[page])?;
/// assert!(bytes.starts_with(b"%PDF-"));
/// # Ok::<(), pdf_relayout::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Base14Writer {
    config: PdfWriterConfig,
}

impl Base14Writer {
    /// Writer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer with a custom configuration.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self { config }
    }
}

impl DocumentWriter for Base14Writer {
    fn write_document(&self, pages: &[PageCanvas]) -> Result<Vec<u8>> {
        let mut writer = PdfWriter::with_config(self.config.clone());
        let font = writer.add_standard_font(DEFAULT_FONT);

        for (index, canvas) in pages.iter().enumerate() {
            let mut replaced = 0;
            let mut page = writer.add_page(canvas.width, canvas.height);
            for draw in &canvas.draws {
                let (encoded, lost) = encode_winansi_lossy(&draw.text);
                replaced += lost;
                page.add_text(&encoded, draw.x, draw.y, &font, draw.font_size);
            }
            page.finish();

            if replaced > 0 {
                log::warn!(
                    "Page {}: {} character(s) not representable in {} were replaced with '?'",
                    index + 1,
                    replaced,
                    DEFAULT_FONT
                );
            }
        }

        writer.finish()
    }
}
