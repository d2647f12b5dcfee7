mod cache;
mod error;
mod memory;
mod snapshot;

pub use cache::MetadataCache;
pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use snapshot::{SNAPSHOT_MAGIC, SNAPSHOT_VERSION, SnapshotHeader};

/// Byte-valued key-value store keyed by path.
///
/// Implementations hand back exactly the bytes that were put; ordering and
/// durability are their own concern.
pub trait MetadataStore {
    fn get(&self, key: &str) -> Option<&[u8]>;

    fn put(&mut self, key: &str, value: Vec<u8>);

    /// Returns whether an entry was removed.
    fn remove(&mut self, key: &str) -> bool;

    /// All keys, sorted.
    fn keys(&self) -> Vec<String>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
