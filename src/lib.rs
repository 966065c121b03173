//! rvariant - A self-describing value tree with bencode and JSON codecs
//!
//! Values are [`Variant`] trees whose dictionaries are keyed by interned
//! [`Quark`]s. Trees are read from and written to bencode (the BitTorrent
//! metadata format, [BEP-3]) and JSON, and dictionaries can be merged to
//! layer settings over defaults.
//!
//! # Modules
//!
//! - [`variant`] - The value model, typed accessors and dictionary merge
//! - [`quark`] - Key interning and the well-known key set
//! - [`bencode`] - Bencode parsing and canonical serialization
//! - [`json`] - JSON parsing and pretty or lean serialization
//! - [`constants`] - Formatting constants shared by the codecs
//!
//! All codec entry points are iterative, so input of any nesting depth is
//! handled without growing the call stack.
//!
//! # Examples
//!
//! ```
//! use rvariant::{Dict, Format, Key};
//!
//! let defaults = Format::Json.parse(br#"{"port": 51413, "pex-enabled": true}"#).unwrap().value;
//! let user = Format::Benc.parse(b"d4:porti6881ee").unwrap().value;
//!
//! let mut settings: Dict = defaults.into_dict().unwrap();
//! settings.merge(user.as_dict().unwrap());
//!
//! assert_eq!(settings.find_int(Key::Port), Ok(6881));
//! assert_eq!(settings.find_bool(Key::PexEnabled), Ok(true));
//! ```
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

pub mod bencode;
pub mod constants;
mod error;
mod format;
pub mod json;
pub mod quark;
pub mod variant;

pub use bencode::BencodeError;
pub use error::Error;
pub use format::Format;
pub use json::{JsonError, JsonStyle};
pub use quark::{Key, Quark, QuarkTable, UnknownQuark};
pub use variant::{AccessError, Dict, Kind, Parsed, Variant};
