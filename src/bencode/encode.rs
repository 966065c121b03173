use std::io::Write;

use super::error::BencodeError;
use crate::constants::BENCODE_REAL_PRECISION;
use crate::quark::QuarkTable;
use crate::variant::walk::{walk, Visitor};
use crate::variant::Variant;

/// Encodes a variant to bencode, resolving keys through the global quark
/// table.
///
/// Dictionary keys are written in ascending byte order, so equal trees
/// always produce identical bytes. Booleans become `i1e`/`i0e`, reals become
/// strings with six fractional digits and null becomes the empty string.
///
/// # Errors
///
/// Returns [`BencodeError::UnknownQuark`] if a dictionary key was not
/// interned in the table.
///
/// # Examples
///
/// ```
/// use rvariant::{bencode, Variant};
///
/// let list = Variant::from(vec![Variant::from(1), Variant::from("two"), Variant::from(0.5)]);
/// assert_eq!(bencode::encode(&list).unwrap(), b"li1e3:two8:0.500000e");
/// ```
pub fn encode(value: &Variant<'_>) -> Result<Vec<u8>, BencodeError> {
    encode_with(QuarkTable::global(), value)
}

/// Like [`encode`], resolving keys through `table`.
pub fn encode_with(table: &QuarkTable, value: &Variant<'_>) -> Result<Vec<u8>, BencodeError> {
    let mut buf = Vec::new();
    encode_to(table, value, &mut buf)?;
    Ok(buf)
}

/// Writes the bencoding of `value` to `writer`.
pub fn encode_to<W: Write>(
    table: &QuarkTable,
    value: &Variant<'_>,
    writer: W,
) -> Result<(), BencodeError> {
    walk(table, value, &mut Encoder { writer })
}

struct Encoder<W> {
    writer: W,
}

impl<W: Write> Visitor for Encoder<W> {
    type Error = BencodeError;

    fn null(&mut self) -> Result<(), BencodeError> {
        self.writer.write_all(b"0:")?;
        Ok(())
    }

    fn boolean(&mut self, value: bool) -> Result<(), BencodeError> {
        self.int(i64::from(value))
    }

    fn int(&mut self, value: i64) -> Result<(), BencodeError> {
        write!(self.writer, "i{}e", value)?;
        Ok(())
    }

    fn real(&mut self, value: f64) -> Result<(), BencodeError> {
        let text = format!("{:.*}", BENCODE_REAL_PRECISION, value);
        self.string(text.as_bytes())
    }

    fn string(&mut self, value: &[u8]) -> Result<(), BencodeError> {
        write!(self.writer, "{}:", value.len())?;
        self.writer.write_all(value)?;
        Ok(())
    }

    fn key(&mut self, key: &[u8]) -> Result<(), BencodeError> {
        self.string(key)
    }

    fn list_begin(&mut self, _len: usize) -> Result<(), BencodeError> {
        self.writer.write_all(b"l")?;
        Ok(())
    }

    fn list_end(&mut self) -> Result<(), BencodeError> {
        self.writer.write_all(b"e")?;
        Ok(())
    }

    fn dict_begin(&mut self, _len: usize) -> Result<(), BencodeError> {
        self.writer.write_all(b"d")?;
        Ok(())
    }

    fn dict_end(&mut self) -> Result<(), BencodeError> {
        self.writer.write_all(b"e")?;
        Ok(())
    }
}
