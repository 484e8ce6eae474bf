//! PDF content stream builder.
//!
//! Builds the text-only content streams used when re-rendering a layout:
//! text objects positioned with `Tm` and shown with `Tj`. Strings are
//! already encoded for the target font when they reach this builder.

use crate::error::Result;
use crate::writer::object_serializer::{write_literal_string, write_name, write_real};
use std::io::Write;

/// Operations that can be added to a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font resource and size (Tf)
    SetFont(String, f32),
    /// Set text matrix (Tm)
    SetTextMatrix(f32, f32, f32, f32, f32, f32),
    /// Show an encoded string (Tj)
    ShowText(Vec<u8>),
}

/// Builder for a page content stream.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    /// Operations in the stream
    operations: Vec<ContentStreamOp>,
    /// Current font resource name
    current_font: Option<String>,
    /// Current font size
    current_font_size: f32,
    /// Whether we're in a text object
    in_text_object: bool,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation to the stream.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Begin a text object.
    pub fn begin_text(&mut self) -> &mut Self {
        if !self.in_text_object {
            self.op(ContentStreamOp::BeginText);
            self.in_text_object = true;
        }
        self
    }

    /// End a text object.
    pub fn end_text(&mut self) -> &mut Self {
        if self.in_text_object {
            self.op(ContentStreamOp::EndText);
            self.in_text_object = false;
        }
        self
    }

    /// Set font for text operations. Repeated identical settings are elided.
    pub fn set_font(&mut self, resource_name: &str, size: f32) -> &mut Self {
        if self.current_font.as_deref() != Some(resource_name) || self.current_font_size != size {
            self.op(ContentStreamOp::SetFont(resource_name.to_string(), size));
            self.current_font = Some(resource_name.to_string());
            self.current_font_size = size;
        }
        self
    }

    /// Show already-encoded text with its origin at `(x, y)`.
    pub fn text(&mut self, encoded: &[u8], x: f32, y: f32) -> &mut Self {
        self.begin_text();
        self.op(ContentStreamOp::SetTextMatrix(1.0, 0.0, 0.0, 1.0, x, y));
        self.op(ContentStreamOp::ShowText(encoded.to_vec()));
        self
    }

    /// Number of operations recorded so far.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Build the content stream to bytes.
    ///
    /// An open text object is closed in the output.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();

        for op in &self.operations {
            write_op(&mut buf, op)?;
            writeln!(buf)?;
        }
        if self.in_text_object {
            write_op(&mut buf, &ContentStreamOp::EndText)?;
            writeln!(buf)?;
        }

        Ok(buf)
    }
}

/// Write a single operation to the buffer.
fn write_op<W: Write>(w: &mut W, op: &ContentStreamOp) -> std::io::Result<()> {
    match op {
        ContentStreamOp::BeginText => write!(w, "BT"),
        ContentStreamOp::EndText => write!(w, "ET"),
        ContentStreamOp::SetFont(name, size) => {
            write_name(w, name)?;
            write!(w, " ")?;
            write_real(w, *size as f64)?;
            write!(w, " Tf")
        },
        ContentStreamOp::SetTextMatrix(a, b, c, d, e, f) => {
            for value in [a, b, c, d, e, f] {
                write_real(w, *value as f64)?;
                write!(w, " ")?;
            }
            write!(w, "Tm")
        },
        ContentStreamOp::ShowText(bytes) => {
            write_literal_string(w, bytes)?;
            write!(w, " Tj")
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_text() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .begin_text()
            .set_font("F1", 12.0)
            .text(b"Hello, World!", 72.0, 720.0)
            .end_text();

        let bytes = builder.build().unwrap();
        let content = String::from_utf8_lossy(&bytes);

        assert_eq!(content, "BT\n/F1 12 Tf\n1 0 0 1 72 720 Tm\n(Hello, World!) Tj\nET\n");
    }

    #[test]
    fn test_font_not_repeated() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .set_font("F1", 12.0)
            .text(b"a", 0.0, 0.0)
            .set_font("F1", 12.0)
            .text(b"b", 0.0, 10.0)
            .set_font("F1", 9.0);
        let content = String::from_utf8(builder.build().unwrap()).unwrap();
        assert_eq!(content.matches("Tf").count(), 2);
    }

    #[test]
    fn test_escaping_and_fractional_positions() {
        let mut builder = ContentStreamBuilder::new();
        builder.set_font("F1", 10.5).text(b"(a\\b)", 50.25, 791.89);
        let content = String::from_utf8(builder.build().unwrap()).unwrap();
        assert!(content.contains("/F1 10.5 Tf"));
        assert!(content.contains("1 0 0 1 50.25 791.89"));
        assert!(content.contains("(\\(a\\\\b\\)) Tj"));
    }

    #[test]
    fn test_open_text_object_closed_on_build() {
        let mut builder = ContentStreamBuilder::new();
        builder.text(b"x", 0.0, 0.0);
        let content = String::from_utf8(builder.build().unwrap()).unwrap();
        assert!(content.trim_end().ends_with("ET"));
    }

    #[test]
    fn test_empty_builder() {
        let builder = ContentStreamBuilder::new();
        assert!(builder.is_empty());
        assert!(builder.build().unwrap().is_empty());
    }
}
