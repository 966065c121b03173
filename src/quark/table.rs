use std::sync::OnceLock;

use bytes::Bytes;
use dashmap::DashMap;
use parking_lot::RwLock;

use super::keys::WELL_KNOWN;
use super::Quark;

static GLOBAL: OnceLock<QuarkTable> = OnceLock::new();

/// A thread-safe, grow-only string interner.
///
/// Forward lookups (bytes to ID) go through a sharded map so that concurrent
/// readers rarely contend; new IDs are handed out under the write lock of the
/// reverse array, which keeps IDs dense and unique.
///
/// IDs are never freed. A table lives as long as any tree keyed by it.
pub struct QuarkTable {
    ids: DashMap<Bytes, Quark>,
    names: RwLock<Vec<Bytes>>,
}

impl QuarkTable {
    /// Creates a table holding only the well-known keys.
    pub fn new() -> Self {
        let ids = DashMap::with_capacity(WELL_KNOWN.len());
        let mut names = Vec::with_capacity(WELL_KNOWN.len());

        for (id, &name) in WELL_KNOWN.iter().enumerate() {
            let name = Bytes::from_static(name);
            ids.insert(name.clone(), Quark(id as u32));
            names.push(name);
        }

        Self {
            ids,
            names: RwLock::new(names),
        }
    }

    /// The process-wide table, created on first use.
    pub fn global() -> &'static QuarkTable {
        GLOBAL.get_or_init(QuarkTable::new)
    }

    /// Returns the quark for `bytes`, allocating a new ID if the string has
    /// not been seen before.
    pub fn intern(&self, bytes: &[u8]) -> Quark {
        if let Some(quark) = self.ids.get(bytes) {
            return *quark;
        }

        let name = Bytes::copy_from_slice(bytes);
        let entry = self.ids.entry(name.clone()).or_insert_with(|| {
            let mut names = self.names.write();
            let quark = Quark(names.len() as u32);
            names.push(name);
            tracing::trace!("interned quark {} ({} bytes)", quark.id(), bytes.len());
            quark
        });
        *entry
    }

    /// Finds the quark for `bytes` without interning it.
    pub fn lookup(&self, bytes: &[u8]) -> Option<Quark> {
        self.ids.get(bytes).map(|quark| *quark)
    }

    /// Returns the bytes behind `quark`, or `None` if this table never
    /// allocated it.
    pub fn resolve(&self, quark: Quark) -> Option<Bytes> {
        self.names.read().get(quark.index()).cloned()
    }

    pub fn len(&self) -> usize {
        self.names.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.read().is_empty()
    }
}

impl Default for QuarkTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for QuarkTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuarkTable")
            .field("len", &self.len())
            .finish()
    }
}
