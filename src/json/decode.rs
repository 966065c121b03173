use std::borrow::Cow;

use super::error::JsonError;
use crate::quark::QuarkTable;
use crate::variant::{BuildError, Builder, Parsed, Variant};

/// What the grammar allows at the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Value,
    /// Just after `[`.
    FirstValueOrEnd,
    /// Just after `{`.
    FirstKeyOrEnd,
    Key,
    Colon,
    CommaOrEnd,
}

/// Parses the first JSON value in `data`, interning object keys in the
/// global quark table.
///
/// Leading whitespace is skipped; bytes after the value are left unread.
///
/// # Examples
///
/// ```
/// use rvariant::{json, Key};
///
/// let parsed = json::parse(br#"{"id": 7, "name": "ubuntu.iso"} trailing"#).unwrap();
/// let dict = parsed.value.as_dict().unwrap();
/// assert_eq!(dict.find_int(Key::Id), Ok(7));
/// assert_eq!(dict.find_utf8(Key::Name), Ok("ubuntu.iso"));
/// assert_eq!(parsed.end, 31);
/// ```
pub fn parse(data: &[u8]) -> Result<Parsed<'_>, JsonError> {
    parse_with(QuarkTable::global(), data)
}

/// Like [`parse`], interning keys in `table`.
pub fn parse_with<'a>(table: &QuarkTable, data: &'a [u8]) -> Result<Parsed<'a>, JsonError> {
    parse_value(table, data).inspect_err(|err| {
        tracing::debug!("json parse failed: {}", err);
    })
}

/// Parses `data` as exactly one JSON value, allowing surrounding whitespace.
pub fn decode(data: &[u8]) -> Result<Variant<'_>, JsonError> {
    let parsed = parse(data)?;
    let end = skip_whitespace(data, parsed.end);
    if end != data.len() {
        return Err(JsonError::TrailingData { offset: end });
    }
    Ok(parsed.value)
}

fn skip_whitespace(data: &[u8], mut pos: usize) -> usize {
    while matches!(data.get(pos), Some(b' ' | b'\t' | b'\n' | b'\r')) {
        pos += 1;
    }
    pos
}

fn parse_value<'a>(table: &QuarkTable, data: &'a [u8]) -> Result<Parsed<'a>, JsonError> {
    let mut builder = Builder::new(table);
    let mut expect = Expect::Value;
    let mut pos = 0;

    loop {
        pos = skip_whitespace(data, pos);
        let Some(&byte) = data.get(pos) else {
            return Err(if builder.is_empty() {
                JsonError::EmptyInput
            } else {
                JsonError::UnterminatedContainer
            });
        };
        let start = pos;
        let unexpected = JsonError::UnexpectedByte { byte, offset: start };
        // The grammar never hands the builder a misplaced token.
        let misplaced = move |_: BuildError| JsonError::UnexpectedByte { byte, offset: start };

        let value = match (expect, byte) {
            (Expect::Colon, b':') => {
                pos += 1;
                expect = Expect::Value;
                continue;
            }
            (Expect::CommaOrEnd, b',') => {
                pos += 1;
                expect = if builder.in_dict() {
                    Expect::Key
                } else {
                    Expect::Value
                };
                continue;
            }
            (Expect::FirstValueOrEnd, b']') | (Expect::FirstKeyOrEnd, b'}') => {
                pos += 1;
                match builder.close().map_err(misplaced)? {
                    Some(value) => return Ok(Parsed { value, end: pos }),
                    None => {
                        expect = Expect::CommaOrEnd;
                        continue;
                    }
                }
            }
            (Expect::CommaOrEnd, b']' | b'}') => {
                if builder.in_dict() != (byte == b'}') {
                    return Err(unexpected);
                }
                pos += 1;
                match builder.close().map_err(misplaced)? {
                    Some(value) => return Ok(Parsed { value, end: pos }),
                    None => continue,
                }
            }
            (Expect::Key | Expect::FirstKeyOrEnd, b'"') => {
                let (key, end) = parse_string(data, pos)?;
                pos = end;
                builder.push(Variant::Str(key)).map_err(misplaced)?;
                expect = Expect::Colon;
                continue;
            }
            (Expect::Value | Expect::FirstValueOrEnd, _) => match byte {
                b'[' => {
                    builder.open_list();
                    pos += 1;
                    expect = Expect::FirstValueOrEnd;
                    continue;
                }
                b'{' => {
                    builder.open_dict();
                    pos += 1;
                    expect = Expect::FirstKeyOrEnd;
                    continue;
                }
                b'"' => {
                    let (s, end) = parse_string(data, pos)?;
                    pos = end;
                    Variant::Str(s)
                }
                b'-' | b'0'..=b'9' => {
                    let (number, end) = parse_number(data, pos)?;
                    pos = end;
                    number
                }
                b't' | b'f' | b'n' => {
                    let (literal, end) = parse_literal(data, pos)?;
                    pos = end;
                    literal
                }
                _ => return Err(unexpected),
            },
            _ => return Err(unexpected),
        };

        match builder.push(value).map_err(misplaced)? {
            Some(value) => return Ok(Parsed { value, end: pos }),
            None => expect = Expect::CommaOrEnd,
        }
    }
}

/// Reads the string whose opening quote is at `start`, returning its bytes
/// and the offset after the closing quote.
///
/// Strings without escapes are borrowed from the input.
fn parse_string(data: &[u8], start: usize) -> Result<(Cow<'_, [u8]>, usize), JsonError> {
    let body = start + 1;
    let unterminated = JsonError::UnterminatedString { offset: start };

    let mut pos = body;
    loop {
        match data.get(pos) {
            None => return Err(unterminated),
            Some(b'"') => return Ok((Cow::Borrowed(&data[body..pos]), pos + 1)),
            Some(b'\\') => break,
            Some(_) => pos += 1,
        }
    }

    let mut out = data[body..pos].to_vec();
    loop {
        match data.get(pos) {
            None => return Err(unterminated),
            Some(b'"') => return Ok((Cow::Owned(out), pos + 1)),
            Some(b'\\') => pos = unescape(data, pos, &mut out)?,
            Some(&b) => {
                out.push(b);
                pos += 1;
            }
        }
    }
}

/// Decodes the escape sequence at `pos` into `out`, returning the offset
/// after it.
fn unescape(data: &[u8], pos: usize, out: &mut Vec<u8>) -> Result<usize, JsonError> {
    let simple = match data.get(pos + 1) {
        None => return Err(JsonError::UnterminatedString { offset: pos }),
        Some(b'u') => None,
        Some(b'b') => Some(b'\x08'),
        Some(b'f') => Some(b'\x0c'),
        Some(b'n') => Some(b'\n'),
        Some(b'r') => Some(b'\r'),
        Some(b't') => Some(b'\t'),
        Some(&b @ (b'"' | b'\\' | b'/')) => Some(b),
        Some(_) => return Err(JsonError::InvalidEscape { offset: pos }),
    };
    if let Some(b) = simple {
        out.push(b);
        return Ok(pos + 2);
    }

    // A `\u` without four hex digits is kept literally.
    let Some(unit) = hex4(data, pos + 2) else {
        out.extend_from_slice(b"\\u");
        return Ok(pos + 2);
    };

    let (c, end) = match unit {
        0xd800..=0xdbff => match low_surrogate(data, pos + 6) {
            Some(low) => {
                let code = 0x10000 + ((unit - 0xd800) << 10) + (low - 0xdc00);
                (char::from_u32(code), pos + 12)
            }
            None => (None, pos + 6),
        },
        _ => (char::from_u32(unit), pos + 6),
    };

    let c = c.unwrap_or(char::REPLACEMENT_CHARACTER);
    out.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes());
    Ok(end)
}

fn hex4(data: &[u8], at: usize) -> Option<u32> {
    data.get(at..at + 4)?
        .iter()
        .try_fold(0, |acc, &b| Some(acc * 16 + char::from(b).to_digit(16)?))
}

fn low_surrogate(data: &[u8], at: usize) -> Option<u32> {
    if data.get(at..at + 2)? != b"\\u" {
        return None;
    }
    hex4(data, at + 2).filter(|unit| (0xdc00..=0xdfff).contains(unit))
}

/// Reads a number per the JSON grammar. Integers that fit in `i64` become
/// [`Variant::Int`]; everything else becomes [`Variant::Real`].
fn parse_number(data: &[u8], start: usize) -> Result<(Variant<'static>, usize), JsonError> {
    let invalid = JsonError::InvalidNumber { offset: start };
    let digits_from = |pos: usize| {
        data[pos.min(data.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut pos = start;
    if data.get(pos) == Some(&b'-') {
        pos += 1;
    }

    match data.get(pos) {
        Some(b'0') => pos += 1,
        Some(b'1'..=b'9') => pos += digits_from(pos),
        _ => return Err(invalid),
    }

    let mut integral = true;
    if data.get(pos) == Some(&b'.') {
        let n = digits_from(pos + 1);
        if n == 0 {
            return Err(invalid);
        }
        pos += 1 + n;
        integral = false;
    }
    if matches!(data.get(pos), Some(b'e' | b'E')) {
        pos += 1;
        if matches!(data.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        let n = digits_from(pos);
        if n == 0 {
            return Err(invalid);
        }
        pos += n;
        integral = false;
    }

    let text = std::str::from_utf8(&data[start..pos]).map_err(|_| invalid)?;
    if integral {
        if let Ok(i) = text.parse::<i64>() {
            return Ok((Variant::Int(i), pos));
        }
    }
    match text.parse::<f64>() {
        Ok(r) => Ok((Variant::Real(r), pos)),
        Err(_) => Err(JsonError::InvalidNumber { offset: start }),
    }
}

fn parse_literal(data: &[u8], start: usize) -> Result<(Variant<'static>, usize), JsonError> {
    let rest = &data[start..];
    let (value, len) = if rest.starts_with(b"true") {
        (Variant::Bool(true), 4)
    } else if rest.starts_with(b"false") {
        (Variant::Bool(false), 5)
    } else if rest.starts_with(b"null") {
        (Variant::Null, 4)
    } else {
        return Err(JsonError::InvalidLiteral { offset: start });
    };
    Ok((value, start + len))
}
