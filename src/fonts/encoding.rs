//! WinAnsi (Windows-1252) encoding.
//!
//! Used in both directions: decoding simple-font strings that carry no
//! ToUnicode map, and encoding text for the standard fonts written with
//! `/WinAnsiEncoding`.

/// The 0x80-0x9F block, where WinAnsi differs from Latin-1.
///
/// `None` marks the five undefined code points.
const WINANSI_HIGH_CONTROL: [Option<char>; 32] = [
    Some('\u{20AC}'), // 0x80 Euro sign
    None,             // 0x81
    Some('\u{201A}'), // 0x82 Single low-9 quotation mark
    Some('\u{0192}'), // 0x83 Latin small letter f with hook
    Some('\u{201E}'), // 0x84 Double low-9 quotation mark
    Some('\u{2026}'), // 0x85 Horizontal ellipsis
    Some('\u{2020}'), // 0x86 Dagger
    Some('\u{2021}'), // 0x87 Double dagger
    Some('\u{02C6}'), // 0x88 Modifier letter circumflex accent
    Some('\u{2030}'), // 0x89 Per mille sign
    Some('\u{0160}'), // 0x8A Latin capital letter S with caron
    Some('\u{2039}'), // 0x8B Single left-pointing angle quotation mark
    Some('\u{0152}'), // 0x8C Latin capital ligature OE
    None,             // 0x8D
    Some('\u{017D}'), // 0x8E Latin capital letter Z with caron
    None,             // 0x8F
    None,             // 0x90
    Some('\u{2018}'), // 0x91 Left single quotation mark
    Some('\u{2019}'), // 0x92 Right single quotation mark
    Some('\u{201C}'), // 0x93 Left double quotation mark
    Some('\u{201D}'), // 0x94 Right double quotation mark
    Some('\u{2022}'), // 0x95 Bullet
    Some('\u{2013}'), // 0x96 En dash
    Some('\u{2014}'), // 0x97 Em dash
    Some('\u{02DC}'), // 0x98 Small tilde
    Some('\u{2122}'), // 0x99 Trade mark sign
    Some('\u{0161}'), // 0x9A Latin small letter s with caron
    Some('\u{203A}'), // 0x9B Single right-pointing angle quotation mark
    Some('\u{0153}'), // 0x9C Latin small ligature oe
    None,             // 0x9D
    Some('\u{017E}'), // 0x9E Latin small letter z with caron
    Some('\u{0178}'), // 0x9F Latin capital letter Y with diaeresis
];

/// Decode one WinAnsi byte.
pub fn winansi_to_unicode(byte: u8) -> Option<char> {
    match byte {
        0x80..=0x9F => WINANSI_HIGH_CONTROL[(byte - 0x80) as usize],
        _ => Some(byte as char),
    }
}

/// Encode one character as a WinAnsi byte, if representable.
pub fn unicode_to_winansi(ch: char) -> Option<u8> {
    let codepoint = ch as u32;
    if codepoint < 0x80 || (0xA0..=0xFF).contains(&codepoint) {
        return Some(codepoint as u8);
    }
    WINANSI_HIGH_CONTROL
        .iter()
        .position(|&mapped| mapped == Some(ch))
        .map(|idx| 0x80 + idx as u8)
}

/// Check if a character can be encoded in WinAnsi.
pub fn is_winansi_char(ch: char) -> bool {
    unicode_to_winansi(ch).is_some()
}

/// Encode text to WinAnsi bytes.
///
/// Unrepresentable characters become `?`. Returns the encoded bytes and the
/// number of replaced characters.
pub fn encode_winansi_lossy(text: &str) -> (Vec<u8>, usize) {
    let mut replaced = 0;
    let bytes = text
        .chars()
        .map(|ch| {
            unicode_to_winansi(ch).unwrap_or_else(|| {
                replaced += 1;
                b'?'
            })
        })
        .collect();
    (bytes, replaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_and_latin1_are_identity() {
        assert_eq!(winansi_to_unicode(b'A'), Some('A'));
        assert_eq!(winansi_to_unicode(0xE9), Some('é'));
        assert_eq!(unicode_to_winansi('é'), Some(0xE9));
    }

    #[test]
    fn test_high_control_block() {
        assert_eq!(winansi_to_unicode(0x80), Some('€'));
        assert_eq!(winansi_to_unicode(0x97), Some('—'));
        assert_eq!(winansi_to_unicode(0x81), None);
        assert_eq!(unicode_to_winansi('€'), Some(0x80));
        assert_eq!(unicode_to_winansi('\u{2019}'), Some(0x92));
    }

    #[test]
    fn test_unrepresentable() {
        assert!(!is_winansi_char('日'));
        assert!(!is_winansi_char('\u{0085}'));
        assert!(is_winansi_char('~'));
    }

    #[test]
    fn test_encode_lossy() {
        let (bytes, replaced) = encode_winansi_lossy("a€日b");
        assert_eq!(bytes, vec![b'a', 0x80, b'?', b'b']);
        assert_eq!(replaced, 1);
    }

    #[test]
    fn test_table_round_trips() {
        for byte in 0x80u8..=0x9F {
            if let Some(ch) = winansi_to_unicode(byte) {
                assert_eq!(unicode_to_winansi(ch), Some(byte));
            }
        }
    }
}
