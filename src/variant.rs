//! The self-describing value model shared by both codecs.
//!
//! A [`Variant`] is one of null, bool, int, real, byte string, list or
//! dictionary. Strings are binary-safe and usually borrow from the buffer they
//! were parsed from; dictionaries are keyed by [`Quark`](crate::Quark).
//!
//! # Examples
//!
//! ```
//! use rvariant::{bencode, Key, Variant};
//!
//! let mut top = Variant::dict(2);
//! let dict = top.as_dict_mut().unwrap();
//! dict.insert(Key::Name, "example.txt");
//! dict.insert(Key::Length, 1024);
//!
//! assert_eq!(dict.find_int(Key::Length).unwrap(), 1024);
//! assert_eq!(
//!     bencode::encode(&top).unwrap(),
//!     b"d6:lengthi1024e4:name11:example.txte"
//! );
//! ```
//!
//! # Deep trees
//!
//! Parsing, serializing, dropping, [`Variant::into_owned`] and
//! [`Dict::merge`] all use explicit heap stacks, so a tree may be nested as
//! deeply as memory allows. The same holds for `Clone`, `PartialEq` and
//! `Debug`.

mod builder;
mod deep;
mod dict;
mod error;
mod merge;
mod value;
pub(crate) mod walk;

use std::fmt;

pub(crate) use builder::{BuildError, Builder};
pub use dict::Dict;
pub use error::AccessError;
pub use value::Variant;

/// The tag of a [`Variant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Real,
    Str,
    List,
    Dict,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Real => "real",
            Kind::Str => "string",
            Kind::List => "list",
            Kind::Dict => "dict",
        };
        f.write_str(name)
    }
}

/// A successfully parsed value and the offset just past it.
///
/// Bytes after `end` were not examined.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<'a> {
    pub value: Variant<'a>,
    pub end: usize,
}
