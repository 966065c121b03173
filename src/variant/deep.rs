//! `Clone`, `PartialEq` and `Debug` for [`Variant`], each driven by an
//! explicit stack so that trees of any depth can be copied, compared and
//! printed.

use std::fmt;
use std::slice;

use super::dict::Dict;
use super::value::Variant;
use crate::quark::Quark;

/// A container being copied: the children still to visit and the copy
/// built so far.
enum CloneFrame<'v, 'a> {
    List {
        source: slice::Iter<'v, Variant<'a>>,
        out: Vec<Variant<'a>>,
    },
    Dict {
        source: slice::Iter<'v, (Quark, Variant<'a>)>,
        out: Dict<'a>,
        key: Option<Quark>,
    },
}

impl<'v, 'a> CloneFrame<'v, 'a> {
    fn next_child(&mut self) -> Option<&'v Variant<'a>> {
        match self {
            CloneFrame::List { source, .. } => source.next(),
            CloneFrame::Dict { source, key, .. } => {
                let (quark, child) = source.next()?;
                *key = Some(*quark);
                Some(child)
            }
        }
    }

    fn accept(&mut self, value: Variant<'a>) {
        match self {
            CloneFrame::List { out, .. } => out.push(value),
            CloneFrame::Dict { out, key, .. } => {
                if let Some(quark) = key.take() {
                    out.insert(quark, value);
                }
            }
        }
    }

    fn finish(self) -> Variant<'a> {
        match self {
            CloneFrame::List { out, .. } => Variant::List(out),
            CloneFrame::Dict { out, .. } => Variant::Dict(out),
        }
    }
}

/// Copies a leaf, or opens a frame for a container.
fn copy_or_open<'v, 'a>(value: &'v Variant<'a>) -> Result<Variant<'a>, CloneFrame<'v, 'a>> {
    match value {
        Variant::Null => Ok(Variant::Null),
        Variant::Bool(b) => Ok(Variant::Bool(*b)),
        Variant::Int(i) => Ok(Variant::Int(*i)),
        Variant::Real(r) => Ok(Variant::Real(*r)),
        Variant::Str(s) => Ok(Variant::Str(s.clone())),
        Variant::List(items) => Err(CloneFrame::List {
            source: items.iter(),
            out: Vec::with_capacity(items.len()),
        }),
        Variant::Dict(dict) => Err(CloneFrame::Dict {
            source: dict.entries().iter(),
            out: Dict::with_capacity(dict.len()),
            key: None,
        }),
    }
}

impl Clone for Variant<'_> {
    fn clone(&self) -> Self {
        let mut stack = match copy_or_open(self) {
            Ok(leaf) => return leaf,
            Err(frame) => vec![frame],
        };

        while let Some(frame) = stack.last_mut() {
            if let Some(child) = frame.next_child() {
                match copy_or_open(child) {
                    Ok(leaf) => frame.accept(leaf),
                    Err(opened) => stack.push(opened),
                }
                continue;
            }

            let Some(done) = stack.pop().map(CloneFrame::finish) else {
                break;
            };
            match stack.last_mut() {
                Some(parent) => parent.accept(done),
                None => return done,
            }
        }

        Variant::Null
    }
}

impl PartialEq for Variant<'_> {
    /// Structural equality. Dictionaries are equal regardless of entry
    /// order; reals compare as `f64`, so `NaN` never equals itself.
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];

        while let Some(pair) = pending.pop() {
            match pair {
                (Variant::Null, Variant::Null) => {}
                (Variant::Bool(a), Variant::Bool(b)) if a == b => {}
                (Variant::Int(a), Variant::Int(b)) if a == b => {}
                (Variant::Real(a), Variant::Real(b)) if a == b => {}
                (Variant::Str(a), Variant::Str(b)) if a == b => {}
                (Variant::List(a), Variant::List(b)) if a.len() == b.len() => {
                    pending.extend(a.iter().zip(b.iter()));
                }
                (Variant::Dict(a), Variant::Dict(b)) if a.len() == b.len() => {
                    for (key, value) in a.iter() {
                        match b.get(key) {
                            Some(theirs) => pending.push((value, theirs)),
                            None => return false,
                        }
                    }
                }
                _ => return false,
            }
        }

        true
    }
}

enum DebugFrame<'v, 'a> {
    List(slice::Iter<'v, Variant<'a>>),
    Dict(slice::Iter<'v, (Quark, Variant<'a>)>),
}

impl fmt::Debug for Variant<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Each open container and whether it has written a child yet.
        let mut stack: Vec<(DebugFrame<'_, '_>, bool)> = Vec::new();
        let mut next = Some(self);

        loop {
            match next.take() {
                Some(Variant::Null) => f.write_str("Null")?,
                Some(Variant::Bool(b)) => write!(f, "Bool({b})")?,
                Some(Variant::Int(i)) => write!(f, "Int({i})")?,
                Some(Variant::Real(r)) => write!(f, "Real({r:?})")?,
                Some(Variant::Str(s)) => write!(f, "Str(b\"{}\")", s.escape_ascii())?,
                Some(Variant::List(items)) => {
                    f.write_str("List([")?;
                    stack.push((DebugFrame::List(items.iter()), false));
                }
                Some(Variant::Dict(dict)) => {
                    f.write_str("Dict({")?;
                    stack.push((DebugFrame::Dict(dict.entries().iter()), false));
                }
                None => {}
            }

            let Some((frame, started)) = stack.last_mut() else {
                return Ok(());
            };

            let child = match frame {
                DebugFrame::List(items) => items.next().map(|child| (None, child)),
                DebugFrame::Dict(entries) => {
                    entries.next().map(|(key, child)| (Some(*key), child))
                }
            };

            match child {
                Some((key, child)) => {
                    if *started {
                        f.write_str(", ")?;
                    }
                    *started = true;
                    if let Some(key) = key {
                        write!(f, "{key:?}: ")?;
                    }
                    next = Some(child);
                }
                None => {
                    let close = match frame {
                        DebugFrame::List(_) => "])",
                        DebugFrame::Dict(_) => "})",
                    };
                    f.write_str(close)?;
                    stack.pop();
                }
            }
        }
    }
}
