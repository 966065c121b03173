//! Interned dictionary keys.
//!
//! Every dictionary key in a [`Variant`](crate::Variant) tree is a [`Quark`]:
//! a small integer standing in for a byte string held by a [`QuarkTable`].
//! Comparing two keys is an integer comparison, and each distinct key string
//! is stored once for the life of the table.
//!
//! The table is pre-seeded with the well-known [`Key`]s, which always occupy
//! the lowest IDs in a fixed order, so code may use `Key::Announce` without
//! ever touching the table.
//!
//! # Examples
//!
//! ```
//! use rvariant::{Key, Quark, QuarkTable};
//!
//! let table = QuarkTable::new();
//! let q = table.intern(b"my-key");
//! assert_eq!(table.intern(b"my-key"), q);
//! assert_eq!(table.resolve(q).as_deref(), Some(b"my-key".as_slice()));
//!
//! // Well-known keys need no lookup.
//! assert_eq!(table.intern(b"announce"), Quark::from(Key::Announce));
//! ```

mod keys;
mod table;

use bytes::Bytes;
use thiserror::Error;

pub use keys::Key;
pub use table::QuarkTable;

/// An interned key.
///
/// A quark is only meaningful together with the table that produced it. The
/// convenience constructors on this type use [`QuarkTable::global`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quark(u32);

impl Quark {
    /// Wraps a raw ID without checking it against any table.
    pub const fn from_raw(id: u32) -> Self {
        Quark(id)
    }

    /// Interns `bytes` in the global table.
    pub fn new(bytes: impl AsRef<[u8]>) -> Self {
        QuarkTable::global().intern(bytes.as_ref())
    }

    /// Looks `bytes` up in the global table without interning it.
    pub fn find(bytes: impl AsRef<[u8]>) -> Option<Self> {
        QuarkTable::global().lookup(bytes.as_ref())
    }

    /// Returns the key bytes from the global table.
    pub fn bytes(self) -> Option<Bytes> {
        QuarkTable::global().resolve(self)
    }

    pub fn id(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<Key> for Quark {
    fn from(key: Key) -> Self {
        Quark(key as u32)
    }
}

/// A dictionary key that the quark table cannot resolve.
///
/// Raised when a tree built against one table is serialized with another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown quark {}", .0.id())]
pub struct UnknownQuark(pub Quark);
