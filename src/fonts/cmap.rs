//! ToUnicode CMap parser.
//!
//! CMap streams map character codes to Unicode strings. Only the `bfchar`
//! and `bfrange` sections matter for text extraction; codespace ranges are
//! implied by the font type (one byte for simple fonts, two for Type0).

use regex::Regex;
use std::collections::HashMap;

/// A character map from character codes to Unicode strings.
pub type CMap = HashMap<u32, String>;

lazy_static::lazy_static! {
    static ref RE_HEX: Regex = Regex::new(r"<([0-9A-Fa-f]*)>").unwrap();
    static ref RE_BFCHAR: Regex = Regex::new(r"<([0-9A-Fa-f]+)>\s*<([0-9A-Fa-f]+)>").unwrap();
    static ref RE_BFRANGE_SEQ: Regex =
        Regex::new(r"<([0-9A-Fa-f]+)>\s*<([0-9A-Fa-f]+)>\s*<([0-9A-Fa-f]+)>").unwrap();
    static ref RE_BFRANGE_ARRAY: Regex =
        Regex::new(r"<([0-9A-Fa-f]+)>\s*<([0-9A-Fa-f]+)>\s*\[([^\]]*)\]").unwrap();
}

/// Ranges larger than this are truncated; real CMaps never come close.
const MAX_RANGE_LEN: u32 = 0x1_0000;

/// Decode a hex destination string as UTF-16BE.
///
/// Handles surrogate pairs and multi-character (ligature) destinations.
/// Odd-length strings are padded on the left.
fn decode_unicode_hex(hex: &str) -> Option<String> {
    let padded;
    let hex = if hex.len() % 4 != 0 {
        padded = format!("{:0>width$}", hex, width = hex.len().div_ceil(4) * 4);
        padded.as_str()
    } else {
        hex
    };

    let units: Vec<u16> = (0..hex.len())
        .step_by(4)
        .map(|i| u16::from_str_radix(&hex[i..i + 4], 16))
        .collect::<std::result::Result<_, _>>()
        .ok()?;

    let decoded: String = char::decode_utf16(units)
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    (!decoded.is_empty()).then_some(decoded)
}

/// Increment the last UTF-16 code unit of a destination by `offset`.
fn offset_destination(base: &str, offset: u32) -> Option<String> {
    let mut units: Vec<u16> = base.encode_utf16().collect();
    let last = units.last_mut()?;
    *last = u16::try_from(*last as u32 + offset).ok()?;
    String::from_utf16(&units).ok()
}

/// Parse a ToUnicode CMap stream.
///
/// # Format Examples
///
/// ```text
/// beginbfchar
/// <0041> <0041>
/// endbfchar
///
/// beginbfrange
/// <0020> <007E> <0020>
/// <005F> <0061> [<00660066> <00660069> <00660066006C>]
/// endbfrange
/// ```
///
/// Malformed entries are skipped.
///
/// # Examples
///
/// ```
/// use pdf_relayout::fonts::parse_tounicode_cmap;
///
/// let cmap = parse_tounicode_cmap(b"beginbfchar\n<0041> <0042>\nendbfchar");
/// assert_eq!(cmap.get(&0x41).map(String::as_str), Some("B"));
/// ```
pub fn parse_tounicode_cmap(data: &[u8]) -> CMap {
    let mut cmap = CMap::new();
    let content = String::from_utf8_lossy(data);

    for section in extract_sections(&content, "beginbfchar", "endbfchar") {
        for line in section.lines() {
            for caps in RE_BFCHAR.captures_iter(line) {
                let Ok(src) = u32::from_str_radix(&caps[1], 16) else {
                    continue;
                };
                if let Some(dst) = decode_unicode_hex(&caps[2]) {
                    log::trace!("ToUnicode bfchar: 0x{:02X} -> {:?}", src, dst);
                    cmap.insert(src, dst);
                }
            }
        }
    }

    for section in extract_sections(&content, "beginbfrange", "endbfrange") {
        for line in section.lines() {
            parse_bfrange_line(line, &mut cmap);
        }
    }

    cmap
}

/// Extract sections between begin and end markers.
fn extract_sections<'a>(content: &'a str, begin: &str, end: &str) -> Vec<&'a str> {
    let mut sections = Vec::new();
    let mut remaining = content;

    while let Some(begin_pos) = remaining.find(begin) {
        let after_begin = &remaining[begin_pos + begin.len()..];
        match after_begin.find(end) {
            Some(end_pos) => {
                sections.push(&after_begin[..end_pos]);
                remaining = &after_begin[end_pos + end.len()..];
            },
            None => break,
        }
    }

    sections
}

/// Parse one bfrange entry in either the sequential or the array form.
fn parse_bfrange_line(line: &str, cmap: &mut CMap) {
    if let Some(caps) = RE_BFRANGE_ARRAY.captures(line) {
        let (Ok(start), Ok(end)) = (
            u32::from_str_radix(&caps[1], 16),
            u32::from_str_radix(&caps[2], 16),
        ) else {
            return;
        };
        let destinations: Vec<&str> = RE_HEX
            .captures_iter(&caps[3])
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect();

        let range_len = u64::from(end.saturating_sub(start)) + 1;
        if destinations.len() as u64 != range_len {
            log::warn!(
                "ToUnicode bfrange array size mismatch: expected {} entries for range 0x{:X}-0x{:X}, got {}",
                range_len,
                start,
                end,
                destinations.len()
            );
        }

        for (i, dst_hex) in destinations.iter().enumerate() {
            let Some(code) = u32::try_from(i)
                .ok()
                .filter(|&i| u64::from(i) < range_len)
                .and_then(|i| start.checked_add(i))
            else {
                break;
            };
            if let Some(dst) = decode_unicode_hex(dst_hex) {
                cmap.insert(code, dst);
            }
        }
    } else if let Some(caps) = RE_BFRANGE_SEQ.captures(line) {
        let (Ok(start), Ok(end)) = (
            u32::from_str_radix(&caps[1], 16),
            u32::from_str_radix(&caps[2], 16),
        ) else {
            return;
        };
        let Some(base) = decode_unicode_hex(&caps[3]) else {
            return;
        };
        if end < start {
            return;
        }

        let len = (end - start).min(MAX_RANGE_LEN);
        for offset in 0..=len {
            if let Some(dst) = offset_destination(&base, offset) {
                cmap.insert(start + offset, dst);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bfchar() {
        let data = b"1 beginbfchar\n<01> <0048>\n<02> <0069>\nendbfchar";
        let cmap = parse_tounicode_cmap(data);
        assert_eq!(cmap.get(&1).map(String::as_str), Some("H"));
        assert_eq!(cmap.get(&2).map(String::as_str), Some("i"));
    }

    #[test]
    fn test_bfchar_several_entries_per_line() {
        let cmap = parse_tounicode_cmap(b"beginbfchar <01> <0041> <02> <0042> endbfchar");
        assert_eq!(cmap.len(), 2);
    }

    #[test]
    fn test_bfrange_sequential() {
        let data = b"beginbfrange\n<0020> <0022> <0041>\nendbfrange";
        let cmap = parse_tounicode_cmap(data);
        assert_eq!(cmap.get(&0x20).map(String::as_str), Some("A"));
        assert_eq!(cmap.get(&0x21).map(String::as_str), Some("B"));
        assert_eq!(cmap.get(&0x22).map(String::as_str), Some("C"));
        assert_eq!(cmap.len(), 3);
    }

    #[test]
    fn test_bfrange_array_ligatures() {
        let data = b"beginbfrange\n<005F> <0061> [<00660066> <00660069> <00660066006C>]\nendbfrange";
        let cmap = parse_tounicode_cmap(data);
        assert_eq!(cmap.get(&0x5F).map(String::as_str), Some("ff"));
        assert_eq!(cmap.get(&0x60).map(String::as_str), Some("fi"));
        assert_eq!(cmap.get(&0x61).map(String::as_str), Some("ffl"));
    }

    #[test]
    fn test_surrogate_pair_destination() {
        let cmap = parse_tounicode_cmap(b"beginbfchar\n<0001> <D835DF0C>\nendbfchar");
        assert_eq!(cmap.get(&1).map(String::as_str), Some("\u{1D70C}"));
    }

    #[test]
    fn test_short_destination_padded() {
        let cmap = parse_tounicode_cmap(b"beginbfchar\n<41> <41>\nendbfchar");
        assert_eq!(cmap.get(&0x41).map(String::as_str), Some("A"));
    }

    #[test]
    fn test_malformed_entries_skipped() {
        let data = b"beginbfchar\n<zz> <0041>\n<03> <0043>\nendbfchar\nbeginbfrange\n<10> <05> <0041>\nendbfrange";
        let cmap = parse_tounicode_cmap(data);
        assert_eq!(cmap.len(), 1);
        assert_eq!(cmap.get(&3).map(String::as_str), Some("C"));
    }

    #[test]
    fn test_full_width_array_range() {
        let cmap = parse_tounicode_cmap(b"beginbfrange\n<00000000> <FFFFFFFF> [<0041>]\nendbfrange");
        assert_eq!(cmap.len(), 1);
        assert_eq!(cmap.get(&0).map(String::as_str), Some("A"));
    }

    #[test]
    fn test_array_range_at_top_of_code_space() {
        let data = b"beginbfrange\n<FFFFFFFF> <FFFFFFFF> [<0041> <0042>]\nendbfrange";
        let cmap = parse_tounicode_cmap(data);
        assert_eq!(cmap.len(), 1);
        assert_eq!(cmap.get(&u32::MAX).map(String::as_str), Some("A"));
    }

    #[test]
    fn test_unterminated_section_ignored() {
        assert!(parse_tounicode_cmap(b"beginbfchar\n<01> <0041>\n").is_empty());
    }
}
