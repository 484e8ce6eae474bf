//! Font dictionary parsing.
//!
//! A [`FontInfo`] carries what the text interpreter needs from a font
//! resource: how to split a show-string into character codes, how wide each
//! code advances, and what Unicode text it stands for.

use crate::backend::lopdf_backend::{number, resolve, stream_bytes};
use crate::fonts::cmap::{CMap, parse_tounicode_cmap};
use crate::fonts::encoding::winansi_to_unicode;
use crate::fonts::metrics::{Base14Family, DEFAULT_GLYPH_WIDTH};
use std::collections::HashMap;

/// Default `/DW` of a CIDFont, in 1/1000 em.
const DEFAULT_CID_WIDTH: f32 = 1000.0;

/// Font resources of a page, keyed by resource name (`F1`, `TT0`, ...).
pub type FontSet = HashMap<String, FontInfo>;

/// Font information extracted from a PDF font dictionary.
#[derive(Debug, Clone)]
pub struct FontInfo {
    /// Base font name (e.g., "Times-Roman", "ABCDEF+Calibri")
    pub base_font: String,
    /// Font subtype (e.g., "Type1", "TrueType", "Type0")
    pub subtype: String,
    /// First character code covered by `widths`
    pub first_char: u32,
    /// `/Widths` of a simple font, indexed by `code - first_char`
    pub widths: Vec<f32>,
    /// Width for codes without an explicit entry, in 1/1000 em
    pub default_width: f32,
    /// Composite font with 2-byte codes
    pub two_byte: bool,
    /// `/W` widths of a composite font, keyed by CID
    pub cid_widths: HashMap<u32, f32>,
    /// ToUnicode CMap (character code to Unicode mapping)
    pub to_unicode: Option<CMap>,
    /// Standard font metrics to fall back on
    pub family: Option<Base14Family>,
}

/// One decoded character code of a show-string.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Character code
    pub code: u32,
    /// Unicode text for the code; may be empty or several characters
    pub text: String,
    /// Advance width in 1/1000 em
    pub width: f32,
    /// Single-byte code 32, which receives word spacing
    pub is_space: bool,
}

impl Default for FontInfo {
    fn default() -> Self {
        Self::fallback()
    }
}

impl FontInfo {
    /// Font used when a `Tf` names a resource the page does not define.
    ///
    /// Decodes bytes as WinAnsi and measures them with Helvetica metrics.
    pub fn fallback() -> Self {
        Self {
            base_font: "Helvetica".to_string(),
            subtype: "Type1".to_string(),
            first_char: 0,
            widths: Vec::new(),
            default_width: DEFAULT_GLYPH_WIDTH,
            two_byte: false,
            cid_widths: HashMap::new(),
            to_unicode: None,
            family: Some(Base14Family::Helvetica),
        }
    }

    /// Parse font information from a font dictionary.
    ///
    /// Missing or malformed entries fall back to defaults; the font is always
    /// usable afterwards.
    ///
    /// # Arguments
    ///
    /// * `doc` - The document owning the dictionary, used to resolve references
    /// * `dict` - The `/Font` resource dictionary
    pub fn from_dict(doc: &lopdf::Document, dict: &lopdf::Dictionary) -> Self {
        let base_font = name_entry(doc, dict, b"BaseFont").unwrap_or_else(|| "Unknown".to_string());
        let subtype = name_entry(doc, dict, b"Subtype").unwrap_or_else(|| "Unknown".to_string());

        let mut info = Self {
            family: Base14Family::from_base_font(&base_font),
            base_font,
            subtype,
            ..Self::fallback()
        };

        if info.subtype == "Type0" {
            info.two_byte = true;
            info.default_width = DEFAULT_CID_WIDTH;
            if let Some(descendant) = descendant_font(doc, dict) {
                if let Some(dw) = dict_number(doc, descendant, b"DW") {
                    info.default_width = dw;
                }
                if let Ok(w) = descendant.get(b"W") {
                    if let Ok(array) = resolve(doc, w).as_array() {
                        info.cid_widths = parse_cid_widths(doc, array);
                    }
                }
            } else {
                log::warn!("Type0 font '{}' has no DescendantFonts", info.base_font);
            }
        } else {
            if let Some(first_char) = dict_number(doc, dict, b"FirstChar") {
                info.first_char = first_char.max(0.0) as u32;
            }
            if let Ok(widths) = dict.get(b"Widths") {
                if let Ok(array) = resolve(doc, widths).as_array() {
                    info.widths = array
                        .iter()
                        .map(|w| number(resolve(doc, w)).unwrap_or(0.0))
                        .collect();
                }
            }
            if let Some(missing) = font_descriptor(doc, dict)
                .and_then(|fd| dict_number(doc, fd, b"MissingWidth"))
                .filter(|w| *w > 0.0)
            {
                info.default_width = missing;
            }
        }

        if let Ok(obj) = dict.get(b"ToUnicode") {
            match resolve(doc, obj).as_stream() {
                Ok(stream) => match stream_bytes(stream) {
                    Ok(data) => {
                        let cmap = parse_tounicode_cmap(&data);
                        log::debug!(
                            "Font '{}': ToUnicode CMap with {} entries",
                            info.base_font,
                            cmap.len()
                        );
                        info.to_unicode = Some(cmap);
                    },
                    Err(e) => log::warn!("Font '{}': unreadable ToUnicode: {}", info.base_font, e),
                },
                Err(_) => log::debug!("Font '{}': ToUnicode is not a stream", info.base_font),
            }
        }

        info
    }

    /// Get the advance width of a character code in 1/1000 em.
    ///
    /// Lookup order: `/W` (composite fonts) or `/Widths` (simple fonts), then
    /// standard font metrics for the decoded character, then the default.
    pub fn get_glyph_width(&self, code: u32, text: &str) -> f32 {
        if self.two_byte {
            return self.cid_widths.get(&code).copied().unwrap_or(self.default_width);
        }

        if let Some(idx) = code.checked_sub(self.first_char) {
            if let Some(&w) = self.widths.get(idx as usize) {
                return w;
            }
        }

        let mut chars = text.chars();
        if let (Some(family), Some(ch), None) = (self.family, chars.next(), chars.next()) {
            if let Some(w) = family.char_width(ch) {
                return w;
            }
        }

        self.default_width
    }

    /// Convert a character code to Unicode text.
    ///
    /// The ToUnicode CMap wins, except for U+FFFD entries which mean the
    /// producer did not know either. Simple fonts then use WinAnsi.
    pub fn char_to_unicode(&self, code: u32) -> String {
        if let Some(text) = self.to_unicode.as_ref().and_then(|cmap| cmap.get(&code)) {
            if text != "\u{FFFD}" {
                return text.clone();
            }
        }

        if self.two_byte {
            return char::from_u32(code)
                .filter(|ch| !ch.is_control())
                .map(String::from)
                .unwrap_or_default();
        }

        u8::try_from(code)
            .ok()
            .and_then(winansi_to_unicode)
            .map(String::from)
            .unwrap_or_default()
    }

    /// Split a show-string into glyphs.
    ///
    /// Composite fonts read 2-byte big-endian codes; a trailing odd byte is
    /// read as a 1-byte code.
    pub fn decode(&self, bytes: &[u8]) -> Vec<Glyph> {
        let codes: Vec<(u32, bool)> = if self.two_byte {
            bytes
                .chunks(2)
                .map(|pair| match pair {
                    [hi, lo] => ((*hi as u32) << 8 | *lo as u32, false),
                    [single] => (*single as u32, *single == b' '),
                    _ => (0, false),
                })
                .collect()
        } else {
            bytes.iter().map(|&b| (b as u32, b == b' ')).collect()
        };

        codes
            .into_iter()
            .map(|(code, is_space)| {
                let text = self.char_to_unicode(code);
                let width = self.get_glyph_width(code, &text);
                Glyph {
                    code,
                    text,
                    width,
                    is_space,
                }
            })
            .collect()
    }
}

/// Load every `/Font` entry of a resource dictionary.
pub fn load_page_fonts(doc: &lopdf::Document, resources: &lopdf::Dictionary) -> FontSet {
    let mut fonts = FontSet::new();

    let Ok(font_obj) = resources.get(b"Font") else {
        return fonts;
    };
    let Ok(font_dict) = resolve(doc, font_obj).as_dict() else {
        log::warn!("/Font resource is not a dictionary");
        return fonts;
    };

    for (name, obj) in font_dict.iter() {
        let name = String::from_utf8_lossy(name).into_owned();
        match resolve(doc, obj).as_dict() {
            Ok(dict) => {
                let info = FontInfo::from_dict(doc, dict);
                log::debug!("Loaded font {} -> {} ({})", name, info.base_font, info.subtype);
                fonts.insert(name, info);
            },
            Err(_) => log::warn!("Font resource {} is not a dictionary", name),
        }
    }

    fonts
}

fn name_entry(doc: &lopdf::Document, dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    let obj = resolve(doc, dict.get(key).ok()?);
    obj.as_name()
        .ok()
        .map(|name| String::from_utf8_lossy(name).into_owned())
}

fn dict_number(doc: &lopdf::Document, dict: &lopdf::Dictionary, key: &[u8]) -> Option<f32> {
    number(resolve(doc, dict.get(key).ok()?))
}

fn descendant_font<'a>(
    doc: &'a lopdf::Document,
    dict: &'a lopdf::Dictionary,
) -> Option<&'a lopdf::Dictionary> {
    let array = resolve(doc, dict.get(b"DescendantFonts").ok()?).as_array().ok()?;
    resolve(doc, array.first()?).as_dict().ok()
}

fn font_descriptor<'a>(
    doc: &'a lopdf::Document,
    dict: &'a lopdf::Dictionary,
) -> Option<&'a lopdf::Dictionary> {
    resolve(doc, dict.get(b"FontDescriptor").ok()?).as_dict().ok()
}

/// Parse a CIDFont `/W` array.
///
/// Two forms may be mixed: `c [w1 w2 ...]` gives widths for consecutive CIDs
/// starting at `c`, and `c_first c_last w` gives one width to a range.
fn parse_cid_widths(doc: &lopdf::Document, array: &[lopdf::Object]) -> HashMap<u32, f32> {
    let mut widths = HashMap::new();
    let mut i = 0;

    while i < array.len() {
        let Some(first) = number(resolve(doc, &array[i])) else {
            i += 1;
            continue;
        };
        let first = first.max(0.0) as u32;

        match array.get(i + 1).map(|obj| resolve(doc, obj)) {
            Some(lopdf::Object::Array(list)) => {
                for (offset, w) in list.iter().enumerate() {
                    let Some(cid) = u32::try_from(offset).ok().and_then(|o| first.checked_add(o))
                    else {
                        break;
                    };
                    if let Some(w) = number(resolve(doc, w)) {
                        widths.insert(cid, w);
                    }
                }
                i += 2;
            },
            Some(last) => {
                let last = number(last).map(|l| l.max(0.0) as u32);
                let w = array.get(i + 2).and_then(|obj| number(resolve(doc, obj)));
                if let (Some(last), Some(w)) = (last, w) {
                    // Cap pathological ranges
                    for cid in first..=last.min(first.saturating_add(0xFFFF)) {
                        widths.insert(cid, w);
                    }
                }
                i += 3;
            },
            None => break,
        }
    }

    widths
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Object, Stream, dictionary};

    #[test]
    fn test_simple_font_widths() {
        let doc = lopdf::Document::with_version("1.5");
        let dict = dictionary! {
            "Type" => "Font",
            "Subtype" => "TrueType",
            "BaseFont" => "ABCDEF+Calibri",
            "FirstChar" => 65,
            "Widths" => vec![Object::Integer(600), Object::Real(550.0)],
        };
        let font = FontInfo::from_dict(&doc, &dict);
        assert_eq!(font.base_font, "ABCDEF+Calibri");
        assert_eq!(font.get_glyph_width(65, "A"), 600.0);
        assert_eq!(font.get_glyph_width(66, "B"), 550.0);
        // Outside /Widths and no standard metrics
        assert_eq!(font.get_glyph_width(67, "C"), DEFAULT_GLYPH_WIDTH);
    }

    #[test]
    fn test_base14_metrics_without_widths() {
        let doc = lopdf::Document::with_version("1.5");
        let dict = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        };
        let font = FontInfo::from_dict(&doc, &dict);
        let glyphs = font.decode(b"Hi ");
        assert_eq!(glyphs.len(), 3);
        assert_eq!(glyphs[0].text, "H");
        assert_eq!(glyphs[0].width, 722.0);
        assert_eq!(glyphs[1].width, 222.0);
        assert!(glyphs[2].is_space);
    }

    #[test]
    fn test_winansi_high_bytes() {
        let font = FontInfo::fallback();
        assert_eq!(font.char_to_unicode(0x80), "€");
        assert_eq!(font.char_to_unicode(0xE9), "é");
    }

    #[test]
    fn test_type0_font_with_tounicode() {
        let mut doc = lopdf::Document::with_version("1.5");
        let cmap = b"beginbfchar\n<0003> <0020>\n<0024> <0041>\nendbfchar".to_vec();
        let cmap_id = doc.add_object(Object::Stream(Stream::new(lopdf::Dictionary::new(), cmap)));
        let descendant_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "BaseFont" => "Arial",
            "DW" => 800,
            "W" => vec![
                Object::Integer(36),
                Object::Array(vec![Object::Integer(667)]),
                Object::Integer(3),
                Object::Integer(3),
                Object::Integer(278),
            ],
        });
        let dict = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => "Arial",
            "Encoding" => "Identity-H",
            "DescendantFonts" => vec![Object::Reference(descendant_id)],
            "ToUnicode" => cmap_id,
        };

        let font = FontInfo::from_dict(&doc, &dict);
        assert!(font.two_byte);
        let glyphs = font.decode(&[0x00, 0x24, 0x00, 0x03, 0x00, 0x10]);
        assert_eq!(glyphs.len(), 3);
        assert_eq!(glyphs[0].text, "A");
        assert_eq!(glyphs[0].width, 667.0);
        assert_eq!(glyphs[1].text, " ");
        assert_eq!(glyphs[1].width, 278.0);
        // 2-byte codes never take word spacing
        assert!(!glyphs[1].is_space);
        assert_eq!(glyphs[2].width, 800.0);
    }

    #[test]
    fn test_cid_widths_stop_at_top_of_cid_space() {
        let doc = lopdf::Document::with_version("1.5");
        let w = vec![
            Object::Integer(u32::MAX as i64),
            Object::Array(vec![Object::Integer(500), Object::Integer(600)]),
            Object::Integer(10),
            Object::Array(vec![Object::Integer(250)]),
        ];
        let widths = parse_cid_widths(&doc, &w);
        assert_eq!(widths.len(), 2);
        assert_eq!(widths.get(&u32::MAX), Some(&500.0));
        assert_eq!(widths.get(&10), Some(&250.0));
    }

    #[test]
    fn test_type0_default_width() {
        let doc = lopdf::Document::with_version("1.5");
        let dict = dictionary! {
            "Subtype" => "Type0",
            "BaseFont" => "Nothing",
        };
        let font = FontInfo::from_dict(&doc, &dict);
        assert_eq!(font.get_glyph_width(1234, ""), DEFAULT_CID_WIDTH);
    }

    #[test]
    fn test_replacement_character_mapping_is_ignored() {
        let mut font = FontInfo::fallback();
        let mut cmap = CMap::new();
        cmap.insert(0x41, "\u{FFFD}".to_string());
        cmap.insert(0x42, "fi".to_string());
        font.to_unicode = Some(cmap);
        assert_eq!(font.char_to_unicode(0x41), "A");
        assert_eq!(font.char_to_unicode(0x42), "fi");
    }

    #[test]
    fn test_load_page_fonts() {
        let mut doc = lopdf::Document::with_version("1.5");
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Times-Bold",
        });
        let resources = dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        };
        let fonts = load_page_fonts(&doc, &resources);
        assert_eq!(fonts.len(), 1);
        assert_eq!(fonts["F1"].family, Some(Base14Family::TimesBold));
    }

    #[test]
    fn test_load_page_fonts_without_font_entry() {
        let doc = lopdf::Document::with_version("1.5");
        assert!(load_page_fonts(&doc, &lopdf::Dictionary::new()).is_empty());
    }
}
