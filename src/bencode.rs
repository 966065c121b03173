//! Bencode encoding and decoding ([BEP-3]).
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! Bencode has no native boolean, real or null. Booleans are written as
//! `i1e`/`i0e`, reals as decimal strings and null as `0:`, so those kinds
//! read back as integers and strings; the coercing accessors on
//! [`Variant`](crate::Variant) recover them.
//!
//! Both directions are iterative, so nesting depth is limited only by
//! memory.
//!
//! # Examples
//!
//! ```
//! use rvariant::{bencode, Key};
//!
//! let value = bencode::decode(b"d4:name4:spam6:lengthi42ee").unwrap();
//! let dict = value.as_dict().unwrap();
//! assert_eq!(dict.find_utf8(Key::Name), Ok("spam"));
//! assert_eq!(dict.find_int(Key::Length), Ok(42));
//!
//! // Keys come back out sorted.
//! assert_eq!(bencode::encode(&value).unwrap(), b"d6:lengthi42e4:name4:spame");
//! ```
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod encode;
mod error;

pub use decode::{decode, parse, parse_int, parse_str, parse_with};
pub use encode::{encode, encode_to, encode_with};
pub use error::BencodeError;
