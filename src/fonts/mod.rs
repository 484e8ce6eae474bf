//! Font handling and encoding.
//!
//! This module provides font dictionary parsing, standard font metrics,
//! WinAnsi encoding tables and ToUnicode CMap parsing for text extraction.

pub mod cmap;
pub mod encoding;
pub mod font_dict;
pub mod metrics;

pub use cmap::{CMap, parse_tounicode_cmap};
pub use encoding::{encode_winansi_lossy, unicode_to_winansi, winansi_to_unicode};
pub use font_dict::{FontInfo, FontSet, Glyph, load_page_fonts};
pub use metrics::{Base14Family, DEFAULT_GLYPH_WIDTH};
