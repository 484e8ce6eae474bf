//! PDF object serialization.
//!
//! Turns [`Object`] values into PDF syntax: literal or hex strings,
//! `#xx`-escaped names, reals trimmed to four decimals, and dictionaries
//! with sorted keys so output is deterministic.

use crate::object::{Object, ObjectRef};
use std::collections::HashMap;
use std::io::Write;

/// Serializer for write-side PDF objects.
///
/// Output is compact: entries are separated by single spaces, no newlines
/// inside dictionaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectSerializer;

impl ObjectSerializer {
    /// Write an indirect object definition: `{id} {gen} obj\n{object}\nendobj\n`.
    pub fn write_indirect<W: Write>(
        &self,
        w: &mut W,
        id: u32,
        gen: u16,
        obj: &Object,
    ) -> std::io::Result<()> {
        writeln!(w, "{} {} obj", id, gen)?;
        self.write_object(w, obj)?;
        write!(w, "\nendobj\n")
    }

    /// Write one object.
    pub fn write_object<W: Write>(&self, w: &mut W, obj: &Object) -> std::io::Result<()> {
        match obj {
            Object::Integer(i) => write!(w, "{}", i),
            Object::Real(r) => write_real(w, *r),
            Object::String(s) => write_string(w, s),
            Object::Name(n) => write_name(w, n),
            Object::Array(items) => {
                write!(w, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(w, " ")?;
                    }
                    self.write_object(w, item)?;
                }
                write!(w, "]")
            },
            Object::Dictionary(dict) => self.write_dictionary(w, dict),
            Object::Stream { dict, data } => {
                let mut dict = dict.clone();
                dict.insert("Length".to_string(), Object::Integer(data.len() as i64));
                self.write_dictionary(w, &dict)?;
                write!(w, "\nstream\n")?;
                w.write_all(data)?;
                write!(w, "\nendstream")
            },
            Object::Reference(r) => write!(w, "{}", r),
        }
    }

    fn write_dictionary<W: Write>(
        &self,
        w: &mut W,
        dict: &HashMap<String, Object>,
    ) -> std::io::Result<()> {
        let mut entries: Vec<_> = dict.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        write!(w, "<<")?;
        for (i, (key, value)) in entries.into_iter().enumerate() {
            if i > 0 {
                write!(w, " ")?;
            }
            write_name(w, key)?;
            write!(w, " ")?;
            self.write_object(w, value)?;
        }
        write!(w, ">>")
    }

    /// Serialize one object into a fresh buffer.
    pub fn to_bytes(&self, obj: &Object) -> std::io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_object(&mut buf, obj)?;
        Ok(buf)
    }
}

/// Builders for the objects the document writer emits.
impl ObjectSerializer {
    /// Name object.
    pub fn name(s: &str) -> Object {
        Object::Name(s.to_string())
    }

    /// Integer object.
    pub fn integer(i: i64) -> Object {
        Object::Integer(i)
    }

    /// Text string for document information entries.
    ///
    /// ASCII is stored as is; anything else as UTF-16BE with a byte order
    /// mark.
    pub fn text_string(s: &str) -> Object {
        if s.is_ascii() {
            return Object::String(s.as_bytes().to_vec());
        }
        let mut bytes = vec![0xFE, 0xFF];
        for unit in s.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        Object::String(bytes)
    }

    /// Dictionary object.
    pub fn dict(entries: Vec<(&str, Object)>) -> Object {
        Object::Dictionary(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    /// Reference to a generation-0 object.
    pub fn reference(id: u32) -> Object {
        Object::Reference(ObjectRef::new(id, 0))
    }

    /// Box array `[0 0 width height]`.
    pub fn page_box(width: f32, height: f32) -> Object {
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(width as f64),
            Object::Real(height as f64),
        ])
    }
}

/// Write a real number with at most four decimals.
///
/// Non-finite values have no PDF representation and are written as 0.
pub(crate) fn write_real<W: Write>(w: &mut W, value: f64) -> std::io::Result<()> {
    if !value.is_finite() {
        return write!(w, "0");
    }
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        return write!(w, "{}", value as i64);
    }
    let formatted = format!("{:.4}", value);
    match formatted.trim_end_matches('0').trim_end_matches('.') {
        "" | "-" | "-0" => write!(w, "0"),
        other => write!(w, "{}", other),
    }
}

/// Literal strings for printable text, hex strings for binary data.
fn write_string<W: Write>(w: &mut W, data: &[u8]) -> std::io::Result<()> {
    let printable = data
        .iter()
        .all(|&b| matches!(b, b'\n' | b'\r' | b'\t' | 0x20..=0x7E));
    if printable {
        return write_literal_string(w, data);
    }
    write!(w, "<")?;
    for byte in data {
        write!(w, "{:02X}", byte)?;
    }
    write!(w, ">")
}

/// Write bytes as a literal string `(...)`.
///
/// Delimiters are backslash-escaped; bytes outside printable ASCII become
/// three-digit octal escapes.
pub(crate) fn write_literal_string<W: Write>(w: &mut W, data: &[u8]) -> std::io::Result<()> {
    write!(w, "(")?;
    for &byte in data {
        match byte {
            b'(' | b')' | b'\\' => w.write_all(&[b'\\', byte])?,
            b'\n' => write!(w, "\\n")?,
            b'\r' => write!(w, "\\r")?,
            b'\t' => write!(w, "\\t")?,
            0x20..=0x7E => w.write_all(&[byte])?,
            _ => write!(w, "\\{:03o}", byte)?,
        }
    }
    write!(w, ")")
}

/// Write a name, escaping delimiters, whitespace and non-ASCII as `#xx`.
pub(crate) fn write_name<W: Write>(w: &mut W, name: &str) -> std::io::Result<()> {
    write!(w, "/")?;
    for byte in name.bytes() {
        let delimiter = matches!(
            byte,
            b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%' | b'#'
        );
        if (0x21..=0x7E).contains(&byte) && !delimiter {
            w.write_all(&[byte])?;
        } else {
            write!(w, "#{:02X}", byte)?;
        }
    }
    Ok(())
}
