//! lopdf-based PDF parsing backend.
//!
//! Implements [`PdfBackend`] using the [lopdf](https://crates.io/crates/lopdf)
//! crate for the object model, cross-reference table and stream filters. Text
//! positioning is done by the in-crate [`TextInterpreter`].
//!
//! [`TextInterpreter`]: crate::content::TextInterpreter

use crate::backend::{DEFAULT_PAGE_SIZE, PdfBackend, RawPage};
use crate::content::extract_text_runs;
use crate::error::{Error, Result};
use crate::fonts::load_page_fonts;

/// A parsed PDF document backed by lopdf.
pub struct LopdfDocument {
    /// The underlying lopdf document.
    inner: lopdf::Document,
    /// Cached ordered list of page ObjectIds (indexed by 0-based page number).
    page_ids: Vec<lopdf::ObjectId>,
}

impl std::fmt::Debug for LopdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfDocument")
            .field("page_count", &self.page_ids.len())
            .finish_non_exhaustive()
    }
}

/// The lopdf-based PDF backend.
///
/// # Examples
///
/// ```no_run
/// use pdf_relayout::backend::{LopdfBackend, PdfBackend};
///
/// let bytes = std::fs::read("report.pdf")?;
/// let backend = LopdfBackend;
/// let doc = backend.open(&bytes)?;
/// for index in 0..backend.page_count(&doc) {
///     let page = backend.load_page(&doc, index)?;
///     println!("page {}: {} runs", index + 1, page.runs.len());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfBackend;

impl PdfBackend for LopdfBackend {
    type Document = LopdfDocument;

    fn open(&self, bytes: &[u8]) -> Result<Self::Document> {
        let inner = lopdf::Document::load_mem(bytes)?;

        // get_pages returns BTreeMap<u32, ObjectId> keyed by 1-based page number
        let page_ids: Vec<lopdf::ObjectId> = inner.get_pages().values().copied().collect();
        log::debug!("Opened PDF {} with {} pages", inner.version, page_ids.len());

        Ok(LopdfDocument { inner, page_ids })
    }

    fn page_count(&self, doc: &Self::Document) -> usize {
        doc.page_ids.len()
    }

    fn load_page(&self, doc: &Self::Document, index: usize) -> Result<RawPage> {
        let page_id = *doc.page_ids.get(index).ok_or_else(|| {
            Error::parse(format!(
                "page index {} out of range (0..{})",
                index,
                doc.page_ids.len()
            ))
        })?;

        let (width, height) = page_size(&doc.inner, page_id)?;
        let content = page_content_bytes(&doc.inner, page_id)?;
        let operations = lopdf::content::Content::decode(&content)
            .map_err(|e| Error::parse(format!("failed to decode content stream: {}", e)))?
            .operations;

        let fonts = match page_resources(&doc.inner, page_id)? {
            Some(resources) => load_page_fonts(&doc.inner, resources),
            None => Default::default(),
        };

        let runs = extract_text_runs(&fonts, &operations);
        log::debug!(
            "Page {}: {}x{}, {} operations, {} runs",
            index + 1,
            width,
            height,
            operations.len(),
            runs.len()
        );

        Ok(RawPage {
            width,
            height,
            runs,
        })
    }
}

/// Follow an indirect reference; other objects are returned as is.
///
/// A dangling reference resolves to itself.
pub(crate) fn resolve<'a>(doc: &'a lopdf::Document, obj: &'a lopdf::Object) -> &'a lopdf::Object {
    match obj {
        lopdf::Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Convert a lopdf numeric object (Integer or Real) to f32.
pub(crate) fn number(obj: &lopdf::Object) -> Option<f32> {
    match obj {
        lopdf::Object::Integer(i) => Some(*i as f32),
        lopdf::Object::Real(f) => Some(*f),
        _ => None,
    }
}

/// Stream payload, decompressed if it has a /Filter.
pub(crate) fn stream_bytes(stream: &lopdf::Stream) -> Result<Vec<u8>> {
    if stream.dict.get(b"Filter").is_ok() {
        stream
            .decompressed_content()
            .map_err(|e| Error::parse(format!("failed to decompress stream: {}", e)))
    } else {
        Ok(stream.content.clone())
    }
}

/// Look up a key in the page dictionary, walking up the page tree
/// (via /Parent) if the key is not found on the page itself.
fn resolve_inherited<'a>(
    doc: &'a lopdf::Document,
    page_id: lopdf::ObjectId,
    key: &[u8],
) -> Result<Option<&'a lopdf::Object>> {
    let mut current_id = page_id;
    // Bounded walk; a /Parent cycle must not hang extraction
    for _ in 0..64 {
        let dict = doc
            .get_object(current_id)
            .and_then(|o| o.as_dict())
            .map_err(|e| Error::parse(format!("failed to get page dictionary: {}", e)))?;

        if let Ok(value) = dict.get(key) {
            return Ok(Some(resolve(doc, value)));
        }

        match dict.get(b"Parent") {
            Ok(parent) => {
                current_id = parent
                    .as_reference()
                    .map_err(|e| Error::parse(format!("invalid /Parent reference: {}", e)))?;
            },
            Err(_) => return Ok(None),
        }
    }
    Ok(None)
}

/// Viewport size at scale 1.0: /CropBox when present, else /MediaBox.
fn page_size(doc: &lopdf::Document, page_id: lopdf::ObjectId) -> Result<(f32, f32)> {
    for key in [&b"CropBox"[..], &b"MediaBox"[..]] {
        let Some(obj) = resolve_inherited(doc, page_id, key)? else {
            continue;
        };
        let Ok(array) = obj.as_array() else {
            log::warn!("/{} is not an array", String::from_utf8_lossy(key));
            continue;
        };
        let coords: Vec<f32> = array
            .iter()
            .filter_map(|v| number(resolve(doc, v)))
            .collect();
        if let [x0, y0, x1, y1] = coords[..] {
            let (width, height) = ((x1 - x0).abs(), (y1 - y0).abs());
            if width > 0.0 && height > 0.0 {
                return Ok((width, height));
            }
        }
        log::warn!("Ignoring malformed /{}: {:?}", String::from_utf8_lossy(key), coords);
    }
    Ok(DEFAULT_PAGE_SIZE)
}

/// Get the content stream bytes of a page.
///
/// Handles both single stream references and arrays of stream references.
fn page_content_bytes(doc: &lopdf::Document, page_id: lopdf::ObjectId) -> Result<Vec<u8>> {
    let page_dict = doc.get_object(page_id).and_then(|o| o.as_dict())?;
    let contents = match page_dict.get(b"Contents") {
        Ok(obj) => resolve(doc, obj),
        Err(_) => return Ok(Vec::new()),
    };

    match contents {
        lopdf::Object::Stream(stream) => stream_bytes(stream),
        lopdf::Object::Array(items) => {
            let mut content = Vec::new();
            for item in items {
                let stream = resolve(doc, item)
                    .as_stream()
                    .map_err(|e| Error::parse(format!("/Contents item is not a stream: {}", e)))?;
                if !content.is_empty() {
                    content.push(b'\n');
                }
                content.extend_from_slice(&stream_bytes(stream)?);
            }
            Ok(content)
        },
        _ => Err(Error::parse("/Contents is not a stream or array")),
    }
}

/// The page's /Resources dictionary, inherited if necessary.
fn page_resources(
    doc: &lopdf::Document,
    page_id: lopdf::ObjectId,
) -> Result<Option<&lopdf::Dictionary>> {
    match resolve_inherited(doc, page_id, b"Resources")? {
        Some(obj) => obj
            .as_dict()
            .map(Some)
            .map_err(|_| Error::parse("/Resources is not a dictionary")),
        None => Ok(None),
    }
}
