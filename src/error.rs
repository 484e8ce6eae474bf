//! Error types for layout extraction and re-rendering.
//!
//! Every failure crosses the crate boundary as a value. Parse failures abort
//! an extraction wholesale; write failures abort a render. Degenerate geometry
//! is not an error: it flows through the coordinate arithmetic unchanged and
//! is only reported through the log.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting or rendering a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The PDF-parsing collaborator could not open or read the document.
    #[error("{}", parse_message(.page, .reason))]
    Parse {
        /// 1-based page number, when the failure is tied to a page
        page: Option<usize>,
        /// Reason for the parse failure
        reason: String,
    },

    /// The PDF-writing collaborator could not serialize the output.
    #[error("Failed to write PDF: {0}")]
    Write(String),

    /// IO error (reading input or persisting output)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization of an extraction failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Document-level parse failure.
    pub fn parse(reason: impl Into<String>) -> Self {
        Error::Parse {
            page: None,
            reason: reason.into(),
        }
    }

    /// Attach a page number to a parse failure that has none yet.
    pub fn on_page(self, page_number: usize) -> Self {
        match self {
            Error::Parse { page: None, reason } => Error::Parse {
                page: Some(page_number),
                reason,
            },
            other => other,
        }
    }
}

fn parse_message(page: &Option<usize>, reason: &str) -> String {
    match page {
        Some(page) => format!("Failed to parse PDF (page {}): {}", page, reason),
        None => format!("Failed to parse PDF: {}", reason),
    }
}

impl From<lopdf::Error> for Error {
    fn from(e: lopdf::Error) -> Self {
        Error::parse(e.to_string())
    }
}
