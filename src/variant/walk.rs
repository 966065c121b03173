//! Depth-first traversal in canonical order.

use bytes::Bytes;

use super::value::Variant;
use crate::quark::{QuarkTable, UnknownQuark};

/// Receives the events of a [`walk`].
///
/// Inside a dictionary every value is preceded by a [`key`](Self::key) call.
pub(crate) trait Visitor {
    type Error: From<UnknownQuark>;

    fn null(&mut self) -> Result<(), Self::Error>;
    fn boolean(&mut self, value: bool) -> Result<(), Self::Error>;
    fn int(&mut self, value: i64) -> Result<(), Self::Error>;
    fn real(&mut self, value: f64) -> Result<(), Self::Error>;
    fn string(&mut self, value: &[u8]) -> Result<(), Self::Error>;
    fn key(&mut self, key: &[u8]) -> Result<(), Self::Error>;
    fn list_begin(&mut self, len: usize) -> Result<(), Self::Error>;
    fn list_end(&mut self) -> Result<(), Self::Error>;
    fn dict_begin(&mut self, len: usize) -> Result<(), Self::Error>;
    fn dict_end(&mut self) -> Result<(), Self::Error>;
}

enum Frame<'v, 'a> {
    List(std::slice::Iter<'v, Variant<'a>>),
    Dict(std::vec::IntoIter<(Bytes, &'v Variant<'a>)>),
}

/// Visits `root` depth-first, emitting dictionary entries sorted by the raw
/// bytes of their keys.
///
/// The traversal keeps its position on a heap stack, so it handles trees of
/// any depth.
pub(crate) fn walk<V: Visitor>(
    table: &QuarkTable,
    root: &Variant<'_>,
    visitor: &mut V,
) -> Result<(), V::Error> {
    let mut stack = Vec::new();
    let mut next = Some(root);

    loop {
        if let Some(value) = next.take() {
            match value {
                Variant::Null => visitor.null()?,
                Variant::Bool(b) => visitor.boolean(*b)?,
                Variant::Int(i) => visitor.int(*i)?,
                Variant::Real(r) => visitor.real(*r)?,
                Variant::Str(s) => visitor.string(s)?,
                Variant::List(items) => {
                    visitor.list_begin(items.len())?;
                    stack.push(Frame::List(items.iter()));
                }
                Variant::Dict(dict) => {
                    visitor.dict_begin(dict.len())?;
                    let mut entries = dict
                        .iter()
                        .map(|(key, child)| match table.resolve(key) {
                            Some(name) => Ok((name, child)),
                            None => Err(UnknownQuark(key)),
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    entries.sort_by(|a, b| a.0.cmp(&b.0));
                    stack.push(Frame::Dict(entries.into_iter()));
                }
            }
        }

        let Some(frame) = stack.last_mut() else {
            return Ok(());
        };

        match frame {
            Frame::List(iter) => match iter.next() {
                Some(child) => next = Some(child),
                None => {
                    stack.pop();
                    visitor.list_end()?;
                }
            },
            Frame::Dict(iter) => match iter.next() {
                Some((key, child)) => {
                    visitor.key(&key)?;
                    next = Some(child);
                }
                None => {
                    stack.pop();
                    visitor.dict_end()?;
                }
            },
        }
    }
}
