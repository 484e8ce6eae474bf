//! Plain-text extraction.
//!
//! No layout analysis: each page contributes its run texts in emission order,
//! joined by single spaces and terminated by a newline.

use crate::backend::PdfBackend;
use crate::error::Result;

/// Extract the plain text of every page.
///
/// # Errors
///
/// Returns [`Error::Parse`](crate::Error::Parse) when the document or any of
/// its pages cannot be read.
pub fn extract_text<B: PdfBackend>(backend: &B, bytes: &[u8]) -> Result<String> {
    let doc = backend.open(bytes)?;
    let total_pages = backend.page_count(&doc);

    let mut out = String::new();
    for index in 0..total_pages {
        let page_number = index + 1;
        log::debug!("Extracting text of page {}/{}", page_number, total_pages);

        let page = backend
            .load_page(&doc, index)
            .map_err(|e| e.on_page(page_number))?;
        let texts: Vec<&str> = page.runs.iter().map(|run| run.text.as_str()).collect();
        out.push_str(&texts.join(" "));
        out.push('\n');
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{RawPage, RawTextRun};
    use crate::error::Error;

    struct Pages(Vec<Vec<&'static str>>);

    impl PdfBackend for Pages {
        type Document = ();

        fn open(&self, _bytes: &[u8]) -> Result<()> {
            Ok(())
        }

        fn page_count(&self, _doc: &()) -> usize {
            self.0.len()
        }

        fn load_page(&self, _doc: &(), index: usize) -> Result<RawPage> {
            if self.0[index].is_empty() && index > 0 {
                return Err(Error::parse("bad page"));
            }
            let runs = self.0[index]
                .iter()
                .map(|t| RawTextRun::new(*t, [1.0, 0.0, 0.0, 1.0, 0.0, 0.0], 1.0, 1.0, "F1"))
                .collect();
            Ok(RawPage {
                width: 100.0,
                height: 100.0,
                runs,
            })
        }
    }

    #[test]
    fn test_pages_joined_in_order() {
        let backend = Pages(vec![vec!["Hello", "world"], vec!["Page", "two"]]);
        assert_eq!(extract_text(&backend, b"").unwrap(), "Hello world\nPage two\n");
    }

    #[test]
    fn test_empty_first_page_gives_blank_line() {
        let backend = Pages(vec![vec![]]);
        assert_eq!(extract_text(&backend, b"").unwrap(), "\n");
    }

    #[test]
    fn test_page_error_propagates() {
        let backend = Pages(vec![vec!["ok"], vec![]]);
        let err = extract_text(&backend, b"").unwrap_err();
        assert!(matches!(err, Error::Parse { page: Some(2), .. }));
    }
}
