//! Standard 14 font metrics.
//!
//! Glyph advance widths (1/1000 em) for the printable ASCII range of the
//! standard fonts, used when a font dictionary carries no `/Widths` array.
//! Oblique and italic faces share the upright widths.

/// Widths for U+0020..=U+007E in Helvetica.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Widths for U+0020..=U+007E in Helvetica-Bold.
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, //
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, //
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, //
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, //
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, //
];

/// Widths for U+0020..=U+007E in Times-Roman.
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278, //
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444, //
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722, //
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500, //
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500, //
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541, //
];

/// Widths for U+0020..=U+007E in Times-Bold.
const TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278, //
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500, //
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778, //
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500, //
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500, //
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520, //
];

/// Width used for glyphs without any metrics, in 1/1000 em.
pub const DEFAULT_GLYPH_WIDTH: f32 = 500.0;

/// Width table family of a standard font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base14Family {
    /// Helvetica and Helvetica-Oblique (also Arial)
    Helvetica,
    /// Helvetica-Bold and Helvetica-BoldOblique
    HelveticaBold,
    /// Times-Roman and Times-Italic
    Times,
    /// Times-Bold and Times-BoldItalic
    TimesBold,
    /// Any Courier face (fixed 600)
    Courier,
}

impl Base14Family {
    /// Identify the family from a `/BaseFont` name.
    ///
    /// Subset prefixes (`ABCDEF+`) are ignored. Symbol and ZapfDingbats have
    /// no table here and return `None`.
    pub fn from_base_font(base_font: &str) -> Option<Self> {
        let name = match base_font.split_once('+') {
            Some((prefix, rest)) if prefix.len() == 6 => rest,
            _ => base_font,
        };
        let bold = name.contains("Bold");

        if name.starts_with("Courier") {
            Some(Base14Family::Courier)
        } else if name.starts_with("Helvetica") || name.starts_with("Arial") {
            Some(if bold {
                Base14Family::HelveticaBold
            } else {
                Base14Family::Helvetica
            })
        } else if name.starts_with("Times") {
            Some(if bold {
                Base14Family::TimesBold
            } else {
                Base14Family::Times
            })
        } else {
            None
        }
    }

    /// Advance width of `ch` in 1/1000 em, if the table covers it.
    pub fn char_width(self, ch: char) -> Option<f32> {
        if self == Base14Family::Courier {
            return Some(600.0);
        }
        let idx = (ch as u32).checked_sub(0x20)? as usize;
        let table = match self {
            Base14Family::Helvetica => &HELVETICA,
            Base14Family::HelveticaBold => &HELVETICA_BOLD,
            Base14Family::Times => &TIMES_ROMAN,
            Base14Family::TimesBold => &TIMES_BOLD,
            Base14Family::Courier => return Some(600.0),
        };
        table.get(idx).map(|&w| w as f32)
    }

    /// Width of a string in 1/1000 em, with the default width for gaps.
    pub fn text_width(self, text: &str) -> f32 {
        text.chars()
            .map(|ch| self.char_width(ch).unwrap_or(DEFAULT_GLYPH_WIDTH))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_detection() {
        assert_eq!(Base14Family::from_base_font("Helvetica"), Some(Base14Family::Helvetica));
        assert_eq!(
            Base14Family::from_base_font("Helvetica-BoldOblique"),
            Some(Base14Family::HelveticaBold)
        );
        assert_eq!(Base14Family::from_base_font("Times-Italic"), Some(Base14Family::Times));
        assert_eq!(Base14Family::from_base_font("ABCDEF+Arial-BoldMT"), Some(Base14Family::HelveticaBold));
        assert_eq!(Base14Family::from_base_font("Courier-Bold"), Some(Base14Family::Courier));
        assert_eq!(Base14Family::from_base_font("Symbol"), None);
        assert_eq!(Base14Family::from_base_font("CMR10"), None);
    }

    #[test]
    fn test_helvetica_widths() {
        let f = Base14Family::Helvetica;
        assert_eq!(f.char_width(' '), Some(278.0));
        assert_eq!(f.char_width('0'), Some(556.0));
        assert_eq!(f.char_width('A'), Some(667.0));
        assert_eq!(f.char_width('W'), Some(944.0));
        assert_eq!(f.char_width('i'), Some(222.0));
        assert_eq!(f.char_width('~'), Some(584.0));
        assert_eq!(f.char_width('é'), None);
        assert_eq!(f.char_width('\n'), None);
    }

    #[test]
    fn test_text_width() {
        // H=722 e=556 l=222 l=222 o=556
        assert_eq!(Base14Family::Helvetica.text_width("Hello"), 2278.0);
        assert_eq!(Base14Family::Courier.text_width("abc"), 1800.0);
        assert_eq!(Base14Family::Times.text_width("\u{00E9}"), DEFAULT_GLYPH_WIDTH);
    }

    #[test]
    fn test_tables_cover_printable_ascii() {
        for family in [
            Base14Family::Helvetica,
            Base14Family::HelveticaBold,
            Base14Family::Times,
            Base14Family::TimesBold,
        ] {
            for ch in ' '..='~' {
                assert!(family.char_width(ch).is_some(), "{:?} {:?}", family, ch);
            }
        }
    }
}
