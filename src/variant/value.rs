use std::borrow::Cow;
use std::mem;

use super::dict::Dict;
use super::error::AccessError;
use super::Kind;
use crate::quark::Quark;

/// A self-describing value.
///
/// Strings are raw bytes of explicit length and may hold NUL or non-UTF-8
/// data. A string parsed from a buffer borrows from it; one that had to be
/// computed (a JSON string with escapes) is owned.
///
/// # Examples
///
/// ```
/// use rvariant::Variant;
///
/// let int: Variant = 42i64.into();
/// let string: Variant = "hello".into();
/// let raw = Variant::str(&b"te\0st"[..]);
///
/// assert_eq!(int.as_int(), Ok(42));
/// assert_eq!(string.as_utf8(), Ok("hello"));
/// assert_eq!(raw.as_str().map(|s| s.len()), Ok(5));
/// ```
#[derive(Default)]
pub enum Variant<'a> {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Real(f64),
    /// A binary-safe byte string.
    Str(Cow<'a, [u8]>),
    List(Vec<Variant<'a>>),
    Dict(Dict<'a>),
}

impl<'a> Variant<'a> {
    /// Creates an empty list with room for `capacity` children.
    pub fn list(capacity: usize) -> Self {
        Variant::List(Vec::with_capacity(capacity))
    }

    /// Creates an empty dictionary with room for `capacity` entries.
    pub fn dict(capacity: usize) -> Self {
        Variant::Dict(Dict::with_capacity(capacity))
    }

    /// Creates a string, borrowed or owned depending on the argument.
    pub fn str(bytes: impl Into<Cow<'a, [u8]>>) -> Self {
        Variant::Str(bytes.into())
    }

    pub fn kind(&self) -> Kind {
        match self {
            Variant::Null => Kind::Null,
            Variant::Bool(_) => Kind::Bool,
            Variant::Int(_) => Kind::Int,
            Variant::Real(_) => Kind::Real,
            Variant::Str(_) => Kind::Str,
            Variant::List(_) => Kind::List,
            Variant::Dict(_) => Kind::Dict,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Variant::Null)
    }

    fn wrong_kind(&self, expected: Kind) -> AccessError {
        AccessError::WrongKind {
            expected,
            found: self.kind(),
        }
    }

    /// Returns the value as an integer. A bool reads as 0 or 1.
    pub fn as_int(&self) -> Result<i64, AccessError> {
        match self {
            Variant::Int(i) => Ok(*i),
            Variant::Bool(b) => Ok(i64::from(*b)),
            _ => Err(self.wrong_kind(Kind::Int)),
        }
    }

    /// Returns the value as a bool.
    ///
    /// Bencode has no boolean type, so an integer reads as `true` when it is
    /// non-zero. The strings `true` and `false` are also accepted.
    pub fn as_bool(&self) -> Result<bool, AccessError> {
        match self {
            Variant::Bool(b) => Ok(*b),
            Variant::Int(i) => Ok(*i != 0),
            Variant::Str(s) if **s == *b"true" => Ok(true),
            Variant::Str(s) if **s == *b"false" => Ok(false),
            _ => Err(self.wrong_kind(Kind::Bool)),
        }
    }

    /// Returns the value as a real.
    ///
    /// Integers convert, and so does a string holding a decimal number, which
    /// is how a real survives a trip through bencode.
    pub fn as_real(&self) -> Result<f64, AccessError> {
        match self {
            Variant::Real(r) => Ok(*r),
            Variant::Int(i) => Ok(*i as f64),
            Variant::Str(s) => std::str::from_utf8(s)
                .ok()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| self.wrong_kind(Kind::Real)),
            _ => Err(self.wrong_kind(Kind::Real)),
        }
    }

    /// Returns the raw bytes of a string.
    pub fn as_str(&self) -> Result<&[u8], AccessError> {
        match self {
            Variant::Str(s) => Ok(&s[..]),
            _ => Err(self.wrong_kind(Kind::Str)),
        }
    }

    /// Returns a string as UTF-8 text.
    pub fn as_utf8(&self) -> Result<&str, AccessError> {
        std::str::from_utf8(self.as_str()?).map_err(|_| AccessError::NotUtf8)
    }

    pub fn as_list(&self) -> Result<&Vec<Variant<'a>>, AccessError> {
        match self {
            Variant::List(l) => Ok(l),
            _ => Err(self.wrong_kind(Kind::List)),
        }
    }

    pub fn as_list_mut(&mut self) -> Result<&mut Vec<Variant<'a>>, AccessError> {
        match self {
            Variant::List(l) => Ok(l),
            other => Err(other.wrong_kind(Kind::List)),
        }
    }

    pub fn as_dict(&self) -> Result<&Dict<'a>, AccessError> {
        match self {
            Variant::Dict(d) => Ok(d),
            _ => Err(self.wrong_kind(Kind::Dict)),
        }
    }

    pub fn as_dict_mut(&mut self) -> Result<&mut Dict<'a>, AccessError> {
        match self {
            Variant::Dict(d) => Ok(d),
            other => Err(other.wrong_kind(Kind::Dict)),
        }
    }

    /// Consumes the value and returns the list, avoiding a clone.
    pub fn into_list(mut self) -> Result<Vec<Variant<'a>>, AccessError> {
        match &mut self {
            Variant::List(l) => Ok(mem::take(l)),
            other => Err(other.wrong_kind(Kind::List)),
        }
    }

    /// Consumes the value and returns the dictionary, avoiding a clone.
    pub fn into_dict(mut self) -> Result<Dict<'a>, AccessError> {
        match &mut self {
            Variant::Dict(d) => Ok(mem::take(d)),
            other => Err(other.wrong_kind(Kind::Dict)),
        }
    }

    /// Looks up `key` if this value is a dictionary.
    pub fn get(&self, key: impl Into<Quark>) -> Option<&Variant<'a>> {
        self.as_dict().ok()?.get(key)
    }

    /// Detaches the tree from the buffer it was parsed from, copying every
    /// borrowed string.
    pub fn into_owned(self) -> Variant<'static> {
        let mut stack = match self.detach() {
            Detached::Leaf(value) => return value,
            Detached::List(items) => vec![OwnedFrame::list(items)],
            Detached::Dict(entries) => vec![OwnedFrame::dict(entries)],
        };

        while let Some(frame) = stack.last_mut() {
            match frame.next_child() {
                Some(child) => match child.detach() {
                    Detached::Leaf(value) => frame.accept(value),
                    Detached::List(items) => stack.push(OwnedFrame::list(items)),
                    Detached::Dict(entries) => stack.push(OwnedFrame::dict(entries)),
                },
                None => {
                    let Some(done) = stack.pop().map(OwnedFrame::finish) else {
                        break;
                    };
                    match stack.last_mut() {
                        Some(parent) => parent.accept(done),
                        None => return done,
                    }
                }
            }
        }

        Variant::Null
    }

    /// Splits off this value's children so that it can be rebuilt or dropped
    /// without recursion.
    fn detach(mut self) -> Detached<'a> {
        match &mut self {
            Variant::Null => Detached::Leaf(Variant::Null),
            Variant::Bool(b) => Detached::Leaf(Variant::Bool(*b)),
            Variant::Int(i) => Detached::Leaf(Variant::Int(*i)),
            Variant::Real(r) => Detached::Leaf(Variant::Real(*r)),
            Variant::Str(s) => {
                let owned = mem::take(s).into_owned();
                Detached::Leaf(Variant::Str(Cow::Owned(owned)))
            }
            Variant::List(items) => Detached::List(mem::take(items)),
            Variant::Dict(dict) => Detached::Dict(dict.take_entries()),
        }
    }
}

enum Detached<'a> {
    Leaf(Variant<'static>),
    List(Vec<Variant<'a>>),
    Dict(Vec<(Quark, Variant<'a>)>),
}

enum OwnedFrame<'a> {
    List {
        source: std::vec::IntoIter<Variant<'a>>,
        out: Vec<Variant<'static>>,
    },
    Dict {
        source: std::vec::IntoIter<(Quark, Variant<'a>)>,
        out: Dict<'static>,
        key: Option<Quark>,
    },
}

impl<'a> OwnedFrame<'a> {
    fn list(items: Vec<Variant<'a>>) -> Self {
        OwnedFrame::List {
            out: Vec::with_capacity(items.len()),
            source: items.into_iter(),
        }
    }

    fn dict(entries: Vec<(Quark, Variant<'a>)>) -> Self {
        OwnedFrame::Dict {
            out: Dict::with_capacity(entries.len()),
            source: entries.into_iter(),
            key: None,
        }
    }

    fn next_child(&mut self) -> Option<Variant<'a>> {
        match self {
            OwnedFrame::List { source, .. } => source.next(),
            OwnedFrame::Dict { source, key, .. } => {
                let (quark, child) = source.next()?;
                *key = Some(quark);
                Some(child)
            }
        }
    }

    fn accept(&mut self, value: Variant<'static>) {
        match self {
            OwnedFrame::List { out, .. } => out.push(value),
            OwnedFrame::Dict { out, key, .. } => {
                if let Some(quark) = key.take() {
                    out.insert(quark, value);
                }
            }
        }
    }

    fn finish(self) -> Variant<'static> {
        match self {
            OwnedFrame::List { out, .. } => Variant::List(out),
            OwnedFrame::Dict { out, .. } => Variant::Dict(out),
        }
    }
}

impl Drop for Variant<'_> {
    fn drop(&mut self) {
        let mut pending = match self {
            Variant::List(items) if !items.is_empty() => mem::take(items),
            Variant::Dict(dict) if !dict.is_empty() => dict.take_values(),
            _ => return,
        };

        // Children are emptied before they go out of scope, so each drop
        // below is shallow no matter how deep the tree is.
        while let Some(mut child) = pending.pop() {
            match &mut child {
                Variant::List(items) => pending.append(items),
                Variant::Dict(dict) => pending.extend(dict.take_values()),
                _ => {}
            }
        }
    }
}

impl From<bool> for Variant<'_> {
    fn from(b: bool) -> Self {
        Variant::Bool(b)
    }
}

impl From<i64> for Variant<'_> {
    fn from(i: i64) -> Self {
        Variant::Int(i)
    }
}

impl From<i32> for Variant<'_> {
    fn from(i: i32) -> Self {
        Variant::Int(i64::from(i))
    }
}

impl From<u32> for Variant<'_> {
    fn from(i: u32) -> Self {
        Variant::Int(i64::from(i))
    }
}

impl From<f64> for Variant<'_> {
    fn from(r: f64) -> Self {
        Variant::Real(r)
    }
}

impl<'a> From<&'a str> for Variant<'a> {
    fn from(s: &'a str) -> Self {
        Variant::Str(Cow::Borrowed(s.as_bytes()))
    }
}

impl From<String> for Variant<'_> {
    fn from(s: String) -> Self {
        Variant::Str(Cow::Owned(s.into_bytes()))
    }
}

impl<'a> From<&'a [u8]> for Variant<'a> {
    fn from(b: &'a [u8]) -> Self {
        Variant::Str(Cow::Borrowed(b))
    }
}

impl From<Vec<u8>> for Variant<'_> {
    fn from(b: Vec<u8>) -> Self {
        Variant::Str(Cow::Owned(b))
    }
}

impl<'a> From<Vec<Variant<'a>>> for Variant<'a> {
    fn from(l: Vec<Variant<'a>>) -> Self {
        Variant::List(l)
    }
}

impl<'a> From<Dict<'a>> for Variant<'a> {
    fn from(d: Dict<'a>) -> Self {
        Variant::Dict(d)
    }
}
