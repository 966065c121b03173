//! JSON encoding and decoding.
//!
//! Parsing accepts any JSON value at the top level and turns objects into
//! dictionaries with interned keys. Integers that fit in `i64` stay
//! integers; every other number becomes a real. A `\u` escape that is not
//! followed by four hex digits is kept as literal text rather than
//! rejected, and surrogate pairs combine into one code point.
//!
//! Serialization writes either [`JsonStyle::Pretty`] or [`JsonStyle::Lean`]
//! output. Reals within `1e-5` of an integer are written as that integer
//! and others with four fractional digits.
//!
//! Like the bencode codec, both directions are iterative.
//!
//! # Examples
//!
//! ```
//! use rvariant::{bencode, json, json::JsonStyle};
//!
//! let value = json::decode(br#"{"result": "success", "arguments": {"ids": [1, 2]}}"#).unwrap();
//! assert_eq!(
//!     json::encode(&value, JsonStyle::Lean).unwrap(),
//!     b"{\"arguments\":{\"ids\":[1,2]},\"result\":\"success\"}\n"
//! );
//! assert_eq!(
//!     bencode::encode(&value).unwrap(),
//!     b"d9:argumentsd3:idsli1ei2eee6:result7:successe"
//! );
//! ```

mod decode;
mod encode;
mod error;

pub use decode::{decode, parse, parse_with};
pub use encode::{encode, encode_to, encode_with, JsonStyle};
pub use error::JsonError;

#[cfg(test)]
mod tests;
