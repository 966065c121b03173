use std::io::Write;

use super::error::JsonError;
use crate::constants::{JSON_INDENT, JSON_INTEGRAL_EPSILON, JSON_REAL_PRECISION};
use crate::quark::QuarkTable;
use crate::variant::walk::{walk, Visitor};
use crate::variant::Variant;

/// Layout of serialized JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// One member per line, indented by nesting depth.
    #[default]
    Pretty,
    /// No insignificant whitespace.
    Lean,
}

/// Serializes a variant as JSON, resolving keys through the global quark
/// table.
///
/// Object members are sorted by key bytes. Both styles end the document
/// with a newline. Non-ASCII text is written as `\uXXXX` escapes, so the
/// output is always 7-bit clean; bytes that are not valid UTF-8 become
/// U+FFFD.
///
/// # Examples
///
/// ```
/// use rvariant::{json, json::JsonStyle, Variant};
///
/// let list = Variant::from(vec![Variant::from(1), Variant::from("a"), Variant::Null]);
/// assert_eq!(json::encode(&list, JsonStyle::Lean).unwrap(), b"[1,\"a\",null]\n");
/// ```
pub fn encode(value: &Variant<'_>, style: JsonStyle) -> Result<Vec<u8>, JsonError> {
    encode_with(QuarkTable::global(), value, style)
}

/// Like [`encode`], resolving keys through `table`.
pub fn encode_with(
    table: &QuarkTable,
    value: &Variant<'_>,
    style: JsonStyle,
) -> Result<Vec<u8>, JsonError> {
    let mut buf = Vec::new();
    encode_to(table, value, style, &mut buf)?;
    Ok(buf)
}

/// Writes the JSON form of `value` to `writer`.
pub fn encode_to<W: Write>(
    table: &QuarkTable,
    value: &Variant<'_>,
    style: JsonStyle,
    writer: W,
) -> Result<(), JsonError> {
    let mut encoder = Encoder {
        writer,
        style,
        levels: Vec::new(),
    };
    walk(table, value, &mut encoder)?;
    encoder.writer.write_all(b"\n")?;
    Ok(())
}

/// An open array or object.
struct Level {
    object: bool,
    count: usize,
}

struct Encoder<W> {
    writer: W,
    style: JsonStyle,
    levels: Vec<Level>,
}

impl<W: Write> Encoder<W> {
    /// Lays out the start of an array element or object member.
    fn separate(&mut self) -> Result<(), JsonError> {
        let Some(level) = self.levels.last_mut() else {
            return Ok(());
        };
        level.count += 1;
        if level.count > 1 {
            self.writer.write_all(b",")?;
        }
        self.newline()
    }

    /// Prepares for a value, which in an object already follows its key.
    fn before_value(&mut self) -> Result<(), JsonError> {
        match self.levels.last() {
            Some(level) if level.object => Ok(()),
            _ => self.separate(),
        }
    }

    fn newline(&mut self) -> Result<(), JsonError> {
        if self.style == JsonStyle::Pretty {
            let indent = JSON_INDENT * self.levels.len();
            write!(self.writer, "\n{:indent$}", "", indent = indent)?;
        }
        Ok(())
    }

    fn open(&mut self, object: bool) -> Result<(), JsonError> {
        self.before_value()?;
        self.writer.write_all(if object { b"{" } else { b"[" })?;
        self.levels.push(Level { object, count: 0 });
        Ok(())
    }

    fn close(&mut self) -> Result<(), JsonError> {
        let Some(level) = self.levels.pop() else {
            return Ok(());
        };
        if level.count > 0 {
            self.newline()?;
        }
        self.writer.write_all(if level.object { b"}" } else { b"]" })?;
        Ok(())
    }

    fn write_string(&mut self, bytes: &[u8]) -> Result<(), JsonError> {
        let mut out = Vec::with_capacity(bytes.len() + 2);
        out.push(b'"');
        for chunk in bytes.utf8_chunks() {
            for c in chunk.valid().chars() {
                match c {
                    '"' => out.extend_from_slice(b"\\\""),
                    '\\' => out.extend_from_slice(b"\\\\"),
                    '\x08' => out.extend_from_slice(b"\\b"),
                    '\x0c' => out.extend_from_slice(b"\\f"),
                    '\n' => out.extend_from_slice(b"\\n"),
                    '\r' => out.extend_from_slice(b"\\r"),
                    '\t' => out.extend_from_slice(b"\\t"),
                    ' '..='~' => out.push(c as u8),
                    _ => {
                        for unit in c.encode_utf16(&mut [0; 2]) {
                            write!(out, "\\u{:04x}", unit)?;
                        }
                    }
                }
            }
            if !chunk.invalid().is_empty() {
                out.extend_from_slice(b"\\ufffd");
            }
        }
        out.push(b'"');
        self.writer.write_all(&out)?;
        Ok(())
    }
}

impl<W: Write> Visitor for Encoder<W> {
    type Error = JsonError;

    fn null(&mut self) -> Result<(), JsonError> {
        self.before_value()?;
        self.writer.write_all(b"null")?;
        Ok(())
    }

    fn boolean(&mut self, value: bool) -> Result<(), JsonError> {
        self.before_value()?;
        let text: &[u8] = if value { b"true" } else { b"false" };
        self.writer.write_all(text)?;
        Ok(())
    }

    fn int(&mut self, value: i64) -> Result<(), JsonError> {
        self.before_value()?;
        write!(self.writer, "{}", value)?;
        Ok(())
    }

    fn real(&mut self, value: f64) -> Result<(), JsonError> {
        if !value.is_finite() {
            return self.null();
        }
        self.before_value()?;
        let rounded = value.round();
        if (value - rounded).abs() < JSON_INTEGRAL_EPSILON {
            // Adding zero turns -0 into 0.
            write!(self.writer, "{:.0}", rounded + 0.0)?;
        } else {
            write!(self.writer, "{:.*}", JSON_REAL_PRECISION, value)?;
        }
        Ok(())
    }

    fn string(&mut self, value: &[u8]) -> Result<(), JsonError> {
        self.before_value()?;
        self.write_string(value)
    }

    fn key(&mut self, key: &[u8]) -> Result<(), JsonError> {
        self.separate()?;
        self.write_string(key)?;
        let colon: &[u8] = match self.style {
            JsonStyle::Pretty => b": ",
            JsonStyle::Lean => b":",
        };
        self.writer.write_all(colon)?;
        Ok(())
    }

    fn list_begin(&mut self, _len: usize) -> Result<(), JsonError> {
        self.open(false)
    }

    fn list_end(&mut self) -> Result<(), JsonError> {
        self.close()
    }

    fn dict_begin(&mut self, _len: usize) -> Result<(), JsonError> {
        self.open(true)
    }

    fn dict_end(&mut self) -> Result<(), JsonError> {
        self.close()
    }
}
