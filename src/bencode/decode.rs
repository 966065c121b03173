use std::borrow::Cow;

use super::error::BencodeError;
use crate::quark::QuarkTable;
use crate::variant::{BuildError, Builder, Parsed, Variant};

/// Parses the first bencoded value in `data`, interning keys in the global
/// quark table.
///
/// Bytes after the value are left unread; [`Parsed::end`] tells where the
/// value stopped. Use [`decode`] to reject trailing data.
///
/// # Examples
///
/// ```
/// use rvariant::bencode;
///
/// let parsed = bencode::parse(b"leee").unwrap();
/// assert_eq!(parsed.end, 2);
/// assert!(parsed.value.as_list().unwrap().is_empty());
/// ```
pub fn parse(data: &[u8]) -> Result<Parsed<'_>, BencodeError> {
    parse_with(QuarkTable::global(), data)
}

/// Like [`parse`], interning keys in `table`.
pub fn parse_with<'a>(table: &QuarkTable, data: &'a [u8]) -> Result<Parsed<'a>, BencodeError> {
    parse_value(table, data).inspect_err(|err| {
        tracing::debug!("bencode parse failed: {}", err);
    })
}

/// Parses `data` as exactly one bencoded value.
pub fn decode(data: &[u8]) -> Result<Variant<'_>, BencodeError> {
    let parsed = parse(data)?;
    if parsed.end != data.len() {
        return Err(BencodeError::TrailingData { offset: parsed.end });
    }
    Ok(parsed.value)
}

fn parse_value<'a>(table: &QuarkTable, data: &'a [u8]) -> Result<Parsed<'a>, BencodeError> {
    if data.is_empty() {
        return Err(BencodeError::EmptyInput);
    }

    let mut builder = Builder::new(table);
    let mut pos = 0;

    loop {
        // The first value either completes or opens a container, so running
        // out here always means something is left open.
        let Some(&byte) = data.get(pos) else {
            return Err(BencodeError::UnterminatedContainer);
        };

        let value = match byte {
            b'i' => {
                let (value, used) = parse_int(&data[pos..]).map_err(|err| shift(err, pos))?;
                pos += used;
                Variant::Int(value)
            }
            b'0'..=b'9' => {
                let (bytes, used) = parse_str(&data[pos..]).map_err(|err| shift(err, pos))?;
                pos += used;
                Variant::Str(Cow::Borrowed(bytes))
            }
            b'l' => {
                builder.open_list();
                pos += 1;
                continue;
            }
            b'd' => {
                builder.open_dict();
                pos += 1;
                continue;
            }
            b'e' if !builder.is_empty() => {
                pos += 1;
                match builder.close().map_err(|err| build_error(err, pos - 1))? {
                    Some(value) => return Ok(Parsed { value, end: pos }),
                    None => continue,
                }
            }
            _ => return Err(BencodeError::UnexpectedByte { byte, offset: pos }),
        };

        if let Some(value) = builder.push(value).map_err(|err| build_error(err, pos))? {
            return Ok(Parsed { value, end: pos });
        }
    }
}

/// Scans an `i<digits>e` integer at the start of `data`, returning it with
/// the number of bytes consumed.
///
/// Leading zeros and `-0` are rejected, as are values outside `i64`.
pub fn parse_int(data: &[u8]) -> Result<(i64, usize), BencodeError> {
    let rest = match data.split_first() {
        Some((b'i', rest)) => rest,
        _ => return Err(BencodeError::MalformedInteger("missing 'i' prefix")),
    };
    let Some(len) = rest.iter().position(|&b| b == b'e') else {
        return Err(BencodeError::MalformedInteger("missing 'e' terminator"));
    };

    let digits = &rest[..len];
    let (negative, magnitude) = match digits.split_first() {
        Some((b'-', magnitude)) => (true, magnitude),
        _ => (false, digits),
    };

    match magnitude {
        [] => return Err(BencodeError::MalformedInteger("no digits")),
        _ if !magnitude.iter().all(u8::is_ascii_digit) => {
            return Err(BencodeError::MalformedInteger("non-digit character"));
        }
        [b'0', _, ..] => return Err(BencodeError::MalformedInteger("leading zero")),
        [b'0'] if negative => return Err(BencodeError::MalformedInteger("negative zero")),
        _ => {}
    }

    // Accumulate toward the sign so that i64::MIN is reachable.
    let mut value: i64 = 0;
    for &d in magnitude {
        let digit = i64::from(d - b'0');
        value = value
            .checked_mul(10)
            .and_then(|v| {
                if negative {
                    v.checked_sub(digit)
                } else {
                    v.checked_add(digit)
                }
            })
            .ok_or(BencodeError::MalformedInteger("out of range"))?;
    }

    Ok((value, len + 2))
}

/// Scans a `<len>:<bytes>` string at the start of `data`, returning the
/// payload with the number of bytes consumed.
pub fn parse_str(data: &[u8]) -> Result<(&[u8], usize), BencodeError> {
    let digits = data.iter().take_while(|b| b.is_ascii_digit()).count();
    match data.get(digits) {
        Some(b':') if digits > 0 => {}
        Some(&byte) => return Err(BencodeError::UnexpectedByte { byte, offset: digits }),
        None => return Err(BencodeError::TruncatedString),
    }

    let len = data[..digits]
        .iter()
        .try_fold(0usize, |acc, &d| {
            acc.checked_mul(10)?.checked_add(usize::from(d - b'0'))
        })
        .ok_or(BencodeError::LengthOverflow)?;

    let start = digits + 1;
    let end = start
        .checked_add(len)
        .filter(|&end| end <= data.len())
        .ok_or(BencodeError::TruncatedString)?;

    Ok((&data[start..end], end))
}

/// Rebases an offset reported by a scanner onto the whole buffer.
fn shift(err: BencodeError, base: usize) -> BencodeError {
    match err {
        BencodeError::UnexpectedByte { byte, offset } => BencodeError::UnexpectedByte {
            byte,
            offset: base + offset,
        },
        other => other,
    }
}

fn build_error(err: BuildError, offset: usize) -> BencodeError {
    match err {
        BuildError::NonStringKey => BencodeError::NonStringDictKey,
        BuildError::OddArity => BencodeError::OddDictArity,
        BuildError::NotInContainer => BencodeError::UnexpectedByte { byte: b'e', offset },
    }
}
