use thiserror::Error;

use crate::bencode::BencodeError;
use crate::json::JsonError;
use crate::variant::AccessError;

/// Errors from the format-agnostic entry points in [`Format`](crate::Format).
#[derive(Debug, Error)]
pub enum Error {
    #[error("bencode error: {0}")]
    Bencode(#[from] BencodeError),

    #[error("json error: {0}")]
    Json(#[from] JsonError),

    /// A typed accessor found a missing entry or a value of another kind.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// A format name did not match any known format.
    #[error("unknown format: {0}")]
    UnknownFormat(String),
}
