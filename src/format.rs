//! Format selection for callers that pick the encoding at runtime.

use std::io::Write;
use std::str::FromStr;

use crate::bencode;
use crate::error::Error;
use crate::json::{self, JsonStyle};
use crate::quark::QuarkTable;
use crate::variant::{Parsed, Variant};

/// A serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Benc,
    /// Pretty-printed JSON.
    Json,
    /// JSON without insignificant whitespace.
    JsonLean,
}

impl Format {
    /// Parses the first value in `data`.
    pub fn parse(self, data: &[u8]) -> Result<Parsed<'_>, Error> {
        self.parse_with(QuarkTable::global(), data)
    }

    pub fn parse_with<'a>(self, table: &QuarkTable, data: &'a [u8]) -> Result<Parsed<'a>, Error> {
        Ok(match self {
            Format::Benc => bencode::parse_with(table, data)?,
            Format::Json | Format::JsonLean => json::parse_with(table, data)?,
        })
    }

    /// Serializes `value`, resolving keys through the global quark table.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvariant::{Format, Variant};
    ///
    /// let format: Format = "json-lean".parse().unwrap();
    /// let value = Format::Benc.parse(b"li1e4:spame").unwrap().value;
    /// assert_eq!(format.encode(&value).unwrap(), b"[1,\"spam\"]\n");
    /// ```
    pub fn encode(self, value: &Variant<'_>) -> Result<Vec<u8>, Error> {
        let mut buf = Vec::new();
        self.encode_to(QuarkTable::global(), value, &mut buf)?;
        Ok(buf)
    }

    pub fn encode_to<W: Write>(
        self,
        table: &QuarkTable,
        value: &Variant<'_>,
        writer: W,
    ) -> Result<(), Error> {
        match self {
            Format::Benc => bencode::encode_to(table, value, writer)?,
            Format::Json => json::encode_to(table, value, JsonStyle::Pretty, writer)?,
            Format::JsonLean => json::encode_to(table, value, JsonStyle::Lean, writer)?,
        }
        Ok(())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "benc" | "bencode" => Ok(Format::Benc),
            "json" => Ok(Format::Json),
            "json-lean" => Ok(Format::JsonLean),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}
