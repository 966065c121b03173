use std::collections::HashMap;
use std::fmt;

use super::error::AccessError;
use super::value::Variant;
use crate::constants::DICT_INDEX_THRESHOLD;
use crate::quark::Quark;

/// A dictionary keyed by [`Quark`].
///
/// Entries iterate in insertion order. Inserting a key that is already
/// present replaces its value in place, so a key appears at most once and a
/// lookup always sees the latest write. Serializers ignore insertion order and
/// emit keys sorted by their bytes.
///
/// Small dictionaries are searched linearly; once a dictionary grows past
/// [`DICT_INDEX_THRESHOLD`] entries a hash index is kept alongside.
#[derive(Default)]
pub struct Dict<'a> {
    entries: Vec<(Quark, Variant<'a>)>,
    index: Option<Box<HashMap<Quark, usize>>>,
}

impl<'a> Dict<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: Quark) -> Option<usize> {
        match &self.index {
            Some(index) => index.get(&key).copied(),
            None => self.entries.iter().position(|(k, _)| *k == key),
        }
    }

    fn rebuild_index(&mut self) {
        if self.entries.len() <= DICT_INDEX_THRESHOLD {
            self.index = None;
            return;
        }

        let index = self
            .entries
            .iter()
            .enumerate()
            .map(|(pos, (key, _))| (*key, pos))
            .collect();
        self.index = Some(Box::new(index));
    }

    pub fn contains_key(&self, key: impl Into<Quark>) -> bool {
        self.position(key.into()).is_some()
    }

    pub fn get(&self, key: impl Into<Quark>) -> Option<&Variant<'a>> {
        let pos = self.position(key.into())?;
        Some(&self.entries[pos].1)
    }

    pub fn get_mut(&mut self, key: impl Into<Quark>) -> Option<&mut Variant<'a>> {
        let pos = self.position(key.into())?;
        Some(&mut self.entries[pos].1)
    }

    /// Inserts or overwrites an entry, returning the previous value.
    pub fn insert(
        &mut self,
        key: impl Into<Quark>,
        value: impl Into<Variant<'a>>,
    ) -> Option<Variant<'a>> {
        self.insert_at(key.into(), value.into())
    }

    fn insert_at(&mut self, key: Quark, value: Variant<'a>) -> Option<Variant<'a>> {
        if let Some(pos) = self.position(key) {
            return Some(std::mem::replace(&mut self.entries[pos].1, value));
        }

        self.entries.push((key, value));
        match &mut self.index {
            Some(index) => {
                index.insert(key, self.entries.len() - 1);
            }
            None if self.entries.len() > DICT_INDEX_THRESHOLD => self.rebuild_index(),
            None => {}
        }
        None
    }

    fn slot(&mut self, key: Quark, value: Variant<'a>) -> &mut Variant<'a> {
        let pos = match self.position(key) {
            Some(pos) => {
                self.entries[pos].1 = value;
                pos
            }
            None => {
                self.insert_at(key, value);
                self.entries.len() - 1
            }
        };
        &mut self.entries[pos].1
    }

    /// Inserts an empty list under `key` and returns it for filling.
    pub fn insert_list(
        &mut self,
        key: impl Into<Quark>,
        capacity: usize,
    ) -> Result<&mut Vec<Variant<'a>>, AccessError> {
        self.slot(key.into(), Variant::list(capacity)).as_list_mut()
    }

    /// Inserts an empty dictionary under `key` and returns it for filling.
    pub fn insert_dict(
        &mut self,
        key: impl Into<Quark>,
        capacity: usize,
    ) -> Result<&mut Dict<'a>, AccessError> {
        self.slot(key.into(), Variant::dict(capacity)).as_dict_mut()
    }

    /// Removes an entry, keeping the order of the others.
    pub fn remove(&mut self, key: impl Into<Quark>) -> Option<Variant<'a>> {
        let pos = self.position(key.into())?;
        let (_, value) = self.entries.remove(pos);
        if self.index.is_some() {
            self.rebuild_index();
        }
        Some(value)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Quark, &Variant<'a>)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Quark, &mut Variant<'a>)> {
        self.entries.iter_mut().map(|(key, value)| (*key, value))
    }

    pub fn keys(&self) -> impl Iterator<Item = Quark> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    fn find(&self, key: Quark) -> Result<&Variant<'a>, AccessError> {
        self.get(key).ok_or(AccessError::NotFound(key))
    }

    pub fn find_int(&self, key: impl Into<Quark>) -> Result<i64, AccessError> {
        self.find(key.into())?.as_int()
    }

    pub fn find_bool(&self, key: impl Into<Quark>) -> Result<bool, AccessError> {
        self.find(key.into())?.as_bool()
    }

    pub fn find_real(&self, key: impl Into<Quark>) -> Result<f64, AccessError> {
        self.find(key.into())?.as_real()
    }

    pub fn find_str(&self, key: impl Into<Quark>) -> Result<&[u8], AccessError> {
        self.find(key.into())?.as_str()
    }

    pub fn find_utf8(&self, key: impl Into<Quark>) -> Result<&str, AccessError> {
        self.find(key.into())?.as_utf8()
    }

    pub fn find_list(&self, key: impl Into<Quark>) -> Result<&Vec<Variant<'a>>, AccessError> {
        self.find(key.into())?.as_list()
    }

    pub fn find_dict(&self, key: impl Into<Quark>) -> Result<&Dict<'a>, AccessError> {
        self.find(key.into())?.as_dict()
    }

    pub(crate) fn entries(&self) -> &[(Quark, Variant<'a>)] {
        &self.entries
    }

    pub(crate) fn take_entries(&mut self) -> Vec<(Quark, Variant<'a>)> {
        self.index = None;
        std::mem::take(&mut self.entries)
    }

    pub(crate) fn take_values(&mut self) -> Vec<Variant<'a>> {
        self.take_entries()
            .into_iter()
            .map(|(_, value)| value)
            .collect()
    }
}

impl Clone for Dict<'_> {
    fn clone(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(key, value)| (*key, value.clone()))
                .collect(),
            index: self.index.clone(),
        }
    }
}

impl fmt::Debug for Dict<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl PartialEq for Dict<'_> {
    /// Two dictionaries are equal when they hold the same keys with equal
    /// values, in any order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<'a, K: Into<Quark>, V: Into<Variant<'a>>> FromIterator<(K, V)> for Dict<'a> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut dict = Dict::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            dict.insert(key, value);
        }
        dict
    }
}
