//! PDF document assembly.
//!
//! Produces a complete single-revision PDF: header, catalog, page tree,
//! standard-font dictionaries, one content stream per page, document
//! information, a classic xref table and the trailer.

use super::content_stream::ContentStreamBuilder;
use super::object_serializer::ObjectSerializer;
use crate::error::Result;
use crate::object::Object;
use std::collections::HashMap;
use std::io::Write;

const CATALOG_ID: u32 = 1;
const PAGES_ID: u32 = 2;

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// PDF version written in the header
    pub version: String,
    /// Document title
    pub title: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// Compress content streams with FlateDecode
    pub compress: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            title: None,
            creator: Some(crate::NAME.to_string()),
            compress: false,
        }
    }
}

impl PdfWriterConfig {
    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

fn deflate(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::Compression;
    use flate2::write::ZlibEncoder;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// A page being built.
pub struct PageBuilder<'a> {
    writer: &'a mut PdfWriter,
    page_index: usize,
}

impl<'a> PageBuilder<'a> {
    /// Show already-encoded text with its origin at `(x, y)` in PDF user
    /// space (bottom-left origin).
    pub fn add_text(
        &mut self,
        encoded: &[u8],
        x: f32,
        y: f32,
        font_resource: &str,
        font_size: f32,
    ) -> &mut Self {
        self.writer.pages[self.page_index]
            .content
            .set_font(font_resource, font_size)
            .text(encoded, x, y);
        self
    }

    /// Close the page's text object and return to the writer.
    pub fn finish(self) -> &'a mut PdfWriter {
        self.writer.pages[self.page_index].content.end_text();
        self.writer
    }
}

struct PageData {
    width: f32,
    height: f32,
    content: ContentStreamBuilder,
}

/// A standard Type1 font shared by every page.
struct FontEntry {
    resource_name: String,
    base_font: String,
    id: u32,
}

/// PDF document writer.
///
/// Pages are added in order and filled through [`PageBuilder`]; every page
/// shares one font resource dictionary.
pub struct PdfWriter {
    config: PdfWriterConfig,
    pages: Vec<PageData>,
    fonts: Vec<FontEntry>,
    next_obj_id: u32,
}

impl PdfWriter {
    /// Create a writer with the default configuration.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Create a writer with a custom configuration.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            fonts: Vec::new(),
            next_obj_id: PAGES_ID + 1,
        }
    }

    fn alloc_obj_id(&mut self) -> u32 {
        let id = self.next_obj_id;
        self.next_obj_id += 1;
        id
    }

    /// Add a page with the given dimensions.
    pub fn add_page(&mut self, width: f32, height: f32) -> PageBuilder<'_> {
        self.pages.push(PageData {
            width,
            height,
            content: ContentStreamBuilder::new(),
        });
        PageBuilder {
            page_index: self.pages.len() - 1,
            writer: self,
        }
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Register a standard font and return its resource name.
    ///
    /// Registering the same base font twice returns the same resource.
    pub fn add_standard_font(&mut self, base_font: &str) -> String {
        if let Some(entry) = self.fonts.iter().find(|f| f.base_font == base_font) {
            return entry.resource_name.clone();
        }

        let id = self.alloc_obj_id();
        let resource_name = format!("F{}", self.fonts.len() + 1);
        self.fonts.push(FontEntry {
            resource_name: resource_name.clone(),
            base_font: base_font.to_string(),
            id,
        });
        resource_name
    }

    fn content_stream(&self, page: &PageData) -> Result<Object> {
        let raw = page.content.build()?;
        let mut dict = HashMap::new();

        let data = if self.config.compress {
            match deflate(&raw) {
                Ok(compressed) => {
                    dict.insert("Filter".to_string(), ObjectSerializer::name("FlateDecode"));
                    compressed
                },
                Err(e) => {
                    log::warn!("Content stream compression failed, writing uncompressed: {}", e);
                    raw
                },
            }
        } else {
            raw
        };

        Ok(Object::Stream {
            dict,
            data: bytes::Bytes::from(data),
        })
    }

    fn info_dict(&self) -> Object {
        let mut entries = Vec::new();
        if let Some(title) = &self.config.title {
            entries.push(("Title", ObjectSerializer::text_string(title)));
        }
        if let Some(creator) = &self.config.creator {
            entries.push(("Creator", ObjectSerializer::text_string(creator)));
            entries.push(("Producer", ObjectSerializer::text_string(creator)));
        }
        ObjectSerializer::dict(entries)
    }

    /// Serialize the document.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let page_ids: Vec<(u32, u32)> = (0..self.pages.len())
            .map(|_| (self.alloc_obj_id(), self.alloc_obj_id()))
            .collect();
        let info_id = self.alloc_obj_id();

        let font_resources: HashMap<String, Object> = self
            .fonts
            .iter()
            .map(|f| (f.resource_name.clone(), ObjectSerializer::reference(f.id)))
            .collect();
        let resources = ObjectSerializer::dict(vec![("Font", Object::Dictionary(font_resources))]);

        let mut objects: Vec<(u32, Object)> = vec![
            (
                CATALOG_ID,
                ObjectSerializer::dict(vec![
                    ("Type", ObjectSerializer::name("Catalog")),
                    ("Pages", ObjectSerializer::reference(PAGES_ID)),
                ]),
            ),
            (
                PAGES_ID,
                ObjectSerializer::dict(vec![
                    ("Type", ObjectSerializer::name("Pages")),
                    (
                        "Kids",
                        Object::Array(page_ids.iter().map(|&(id, _)| ObjectSerializer::reference(id)).collect()),
                    ),
                    ("Count", ObjectSerializer::integer(self.pages.len() as i64)),
                ]),
            ),
        ];

        for font in &self.fonts {
            objects.push((
                font.id,
                ObjectSerializer::dict(vec![
                    ("Type", ObjectSerializer::name("Font")),
                    ("Subtype", ObjectSerializer::name("Type1")),
                    ("BaseFont", ObjectSerializer::name(&font.base_font)),
                    ("Encoding", ObjectSerializer::name("WinAnsiEncoding")),
                ]),
            ));
        }

        for (page, &(page_id, content_id)) in self.pages.iter().zip(&page_ids) {
            objects.push((
                page_id,
                ObjectSerializer::dict(vec![
                    ("Type", ObjectSerializer::name("Page")),
                    ("Parent", ObjectSerializer::reference(PAGES_ID)),
                    ("MediaBox", ObjectSerializer::page_box(page.width, page.height)),
                    ("Contents", ObjectSerializer::reference(content_id)),
                    ("Resources", resources.clone()),
                ]),
            ));
            objects.push((content_id, self.content_stream(page)?));
        }

        objects.push((info_id, self.info_dict()));
        objects.sort_by_key(|(id, _)| *id);

        let serializer = ObjectSerializer;
        let mut output = Vec::new();
        writeln!(output, "%PDF-{}", self.config.version)?;
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        let mut offsets = Vec::with_capacity(objects.len());
        for (id, obj) in &objects {
            offsets.push(output.len());
            serializer.write_indirect(&mut output, *id, 0, obj)?;
        }

        let xref_start = output.len();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", self.next_obj_id)?;
        writeln!(output, "0000000000 65535 f ")?;
        for offset in &offsets {
            writeln!(output, "{:010} 00000 n ", offset)?;
        }

        let trailer = ObjectSerializer::dict(vec![
            ("Size", ObjectSerializer::integer(self.next_obj_id as i64)),
            ("Root", ObjectSerializer::reference(CATALOG_ID)),
            ("Info", ObjectSerializer::reference(info_id)),
        ]);
        writeln!(output, "trailer")?;
        serializer.write_object(&mut output, &trailer)?;
        write!(output, "\nstartxref\n{}\n%%EOF", xref_start)?;

        log::debug!(
            "Wrote PDF: {} pages, {} objects, {} bytes",
            self.pages.len(),
            objects.len(),
            output.len()
        );

        Ok(output)
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}
