use thiserror::Error;

use super::Kind;
use crate::quark::Quark;

/// Errors returned by the typed accessors.
///
/// A missing key and a key holding the wrong kind of value are distinct,
/// recoverable outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The dictionary has no entry for the key.
    #[error("key {} not found", .0.id())]
    NotFound(Quark),

    /// The value exists but holds a different kind.
    #[error("expected {expected}, found {found}")]
    WrongKind { expected: Kind, found: Kind },

    /// The string is not valid UTF-8.
    #[error("string is not valid utf-8")]
    NotUtf8,
}
