use thiserror::Error;

use crate::quark::UnknownQuark;

#[derive(Debug, Error)]
pub enum BencodeError {
    /// The input held no bytes at all.
    #[error("empty input")]
    EmptyInput,

    /// An `i...e` integer was malformed or out of range.
    #[error("malformed integer: {0}")]
    MalformedInteger(&'static str),

    /// A string length prefix does not fit in `usize`.
    #[error("string length overflows")]
    LengthOverflow,

    /// A string's length prefix, colon or payload was cut short.
    #[error("truncated string")]
    TruncatedString,

    /// The input ended while a list or dictionary was still open.
    #[error("unterminated list or dictionary")]
    UnterminatedContainer,

    /// A dictionary ended between a key and its value.
    #[error("dictionary has a key without a value")]
    OddDictArity,

    /// A dictionary key was not a byte string.
    #[error("dictionary key is not a string")]
    NonStringDictKey,

    #[error("unexpected byte 0x{byte:02x} at offset {offset}")]
    UnexpectedByte { byte: u8, offset: usize },

    /// Bytes remain after a complete value in strict decoding.
    #[error("trailing data at offset {offset}")]
    TrailingData { offset: usize },

    #[error(transparent)]
    UnknownQuark(#[from] UnknownQuark),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
