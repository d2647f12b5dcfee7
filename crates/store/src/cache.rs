use std::path::Path;

use log::{debug, warn};
use metacache_core::{
    ByHandleFileInformation, Error, FileMetadataRecord, Win32FindData, decode, encode,
    observe_path,
};

use crate::{MetadataStore, error::Result};

/// File-info cache over a byte store: records go in encoded, come out decoded.
///
/// Entries that fail to decode are dropped on read so the caller re-derives
/// them from the filesystem; they never surface as partial records.
#[derive(Debug, Default)]
pub struct MetadataCache<S> {
    store: S,
}

impl<S: MetadataStore> MetadataCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.store.get(path).is_some()
    }

    /// Store (or overwrite) the entry for `record.path()`.
    pub fn insert(&mut self, record: &FileMetadataRecord) {
        self.store.put(record.path(), encode(record));
    }

    /// Stat a file and cache the result.
    pub fn observe(&mut self, path: &Path, volume_serial: Option<u32>) -> Result<FileMetadataRecord> {
        let record = observe_path(path, volume_serial)?;
        self.insert(&record);
        Ok(record)
    }

    /// Decode the entry for `path`.
    ///
    /// `Ok(None)` when absent, or when the stored bytes were corrupt (the entry
    /// is removed).
    pub fn lookup(&mut self, path: &str) -> Result<Option<FileMetadataRecord>> {
        if path.is_empty() {
            return Err(Error::InvalidInput("lookup path was empty").into());
        }

        let decoded = match self.store.get(path) {
            Some(bytes) => decode(path, bytes),
            None => return Ok(None),
        };

        match decoded {
            Ok(record) => Ok(Some(record)),
            Err(e) if e.is_corruption() || matches!(e, Error::InvalidInput(_)) => {
                warn!("dropping corrupt file info for {path}: {e}");
                self.store.remove(path);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Read-modify-write. Returns `false` if there was no usable entry.
    pub fn update<F>(&mut self, path: &str, f: F) -> Result<bool>
    where
        F: FnOnce(&mut FileMetadataRecord),
    {
        let Some(mut record) = self.lookup(path)? else {
            return Ok(false);
        };
        f(&mut record);
        self.insert(&record);
        Ok(true)
    }

    pub fn find_data(&mut self, path: &str) -> Result<Option<Win32FindData>> {
        Ok(self.lookup(path)?.map(|r| r.to_find_data()))
    }

    pub fn by_handle(&mut self, path: &str) -> Result<Option<ByHandleFileInformation>> {
        Ok(self.lookup(path)?.map(|r| r.to_by_handle()))
    }

    pub fn remove(&mut self, path: &str) -> bool {
        let removed = self.store.remove(path);
        debug!("remove {path}: {removed}");
        removed
    }

    /// Every decodable record in key order; corrupt entries and entries keyed
    /// by an empty path are dropped.
    pub fn records(&mut self) -> Result<Vec<FileMetadataRecord>> {
        let keys = self.store.keys();
        let mut out = Vec::with_capacity(keys.len());
        for key in keys {
            if key.is_empty() {
                warn!("dropping stored file info with an empty path");
                self.store.remove(&key);
                continue;
            }
            if let Some(record) = self.lookup(&key)? {
                out.push(record);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
