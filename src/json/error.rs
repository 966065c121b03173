use thiserror::Error;

use crate::quark::UnknownQuark;

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("empty input")]
    EmptyInput,

    #[error("unexpected byte 0x{byte:02x} at offset {offset}")]
    UnexpectedByte { byte: u8, offset: usize },

    /// A string starting at `offset` has no closing quote.
    #[error("unterminated string at offset {offset}")]
    UnterminatedString { offset: usize },

    /// The input ended while an array or object was still open.
    #[error("unterminated array or object")]
    UnterminatedContainer,

    #[error("invalid number at offset {offset}")]
    InvalidNumber { offset: usize },

    /// A backslash followed by a character that is not a JSON escape.
    #[error("invalid escape at offset {offset}")]
    InvalidEscape { offset: usize },

    /// Something starting like `true`, `false` or `null` but not matching.
    #[error("invalid literal at offset {offset}")]
    InvalidLiteral { offset: usize },

    /// Non-whitespace bytes remain after a complete value in strict decoding.
    #[error("trailing data at offset {offset}")]
    TrailingData { offset: usize },

    #[error(transparent)]
    UnknownQuark(#[from] UnknownQuark),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
