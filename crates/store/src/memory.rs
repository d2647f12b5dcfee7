use hashbrown::HashMap;

use crate::MetadataStore;

/// In-memory store; persisted through [`MemoryStore::save`] / [`MemoryStore::load`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryStore {
    pub(crate) entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in key order.
    pub fn iter_sorted(&self) -> impl Iterator<Item = (&str, &[u8])> {
        let mut entries: Vec<(&str, &[u8])> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
            .collect();
        entries.sort_unstable_by_key(|(k, _)| *k);
        entries.into_iter()
    }
}

impl MetadataStore for MemoryStore {
    fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    fn put(&mut self, key: &str, value: Vec<u8>) {
        self.entries.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
