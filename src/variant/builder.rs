use super::dict::Dict;
use super::value::Variant;
use crate::quark::{Quark, QuarkTable};

/// A container that is still being filled.
enum Frame<'a> {
    List(Vec<Variant<'a>>),
    Dict {
        dict: Dict<'a>,
        /// Set after a key has been read and before its value arrives.
        key: Option<Quark>,
    },
}

/// Misuse of the builder by the grammar driving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BuildError {
    /// A dictionary key position received something other than a string.
    NonStringKey,
    /// A dictionary was closed between a key and its value.
    OddArity,
    /// A close arrived with no container open.
    NotInContainer,
}

/// Assembles a variant tree from a flat sequence of events, keeping the
/// containers in progress on the heap.
///
/// Both parsers drive it: scalars go through [`push`](Self::push), containers
/// through [`open_list`](Self::open_list)/[`open_dict`](Self::open_dict) and
/// [`close`](Self::close). Nesting depth costs one frame of heap memory per
/// level and nothing on the call stack.
pub(crate) struct Builder<'t, 'a> {
    table: &'t QuarkTable,
    stack: Vec<Frame<'a>>,
}

impl<'t, 'a> Builder<'t, 'a> {
    pub(crate) fn new(table: &'t QuarkTable) -> Self {
        Self {
            table,
            stack: Vec::new(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Whether the innermost open container is a dictionary.
    pub(crate) fn in_dict(&self) -> bool {
        matches!(self.stack.last(), Some(Frame::Dict { .. }))
    }

    pub(crate) fn open_list(&mut self) {
        self.stack.push(Frame::List(Vec::new()));
    }

    pub(crate) fn open_dict(&mut self) {
        self.stack.push(Frame::Dict {
            dict: Dict::new(),
            key: None,
        });
    }

    /// Places a finished value in the innermost container.
    ///
    /// In a dictionary, values alternate between key and value position; a
    /// string in key position is interned and held until its value arrives.
    /// With no container open, the value is the complete result and is
    /// handed back.
    pub(crate) fn push(&mut self, value: Variant<'a>) -> Result<Option<Variant<'a>>, BuildError> {
        let Some(frame) = self.stack.last_mut() else {
            return Ok(Some(value));
        };

        match frame {
            Frame::List(items) => items.push(value),
            Frame::Dict { dict, key } => match key.take() {
                Some(quark) => {
                    dict.insert(quark, value);
                }
                None => match &value {
                    Variant::Str(bytes) => *key = Some(self.table.intern(bytes)),
                    _ => return Err(BuildError::NonStringKey),
                },
            },
        }

        Ok(None)
    }

    /// Closes the innermost container and pushes it into its parent.
    pub(crate) fn close(&mut self) -> Result<Option<Variant<'a>>, BuildError> {
        let value = match self.stack.pop() {
            None => return Err(BuildError::NotInContainer),
            Some(Frame::List(items)) => Variant::List(items),
            Some(Frame::Dict { dict, key: None }) => Variant::Dict(dict),
            Some(Frame::Dict { key: Some(_), .. }) => return Err(BuildError::OddArity),
        };
        self.push(value)
    }
}
