use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    mem,
    path::Path,
};

use bincode::config;
use bytemuck::{Pod, Zeroable, bytes_of, pod_read_unaligned};
use crc32fast::Hasher;
use hashbrown::HashMap;
use log::debug;
use tempfile::NamedTempFile;

use crate::{
    MemoryStore,
    error::{Result, StoreError},
};

/// Magic number: "MCST" in little-endian
pub const SNAPSHOT_MAGIC: u32 = 0x5453_434D;

pub const SNAPSHOT_VERSION: u32 = 1;

/// Fixed header at the start of a snapshot file.
///
/// The body that follows is a bincode sequence of `(key, value)` pairs in key
/// order, where each value is a record encoded by `metacache_core::codec`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct SnapshotHeader {
    pub magic: u32,
    pub version: u32,
    pub entry_count: u32,
    /// CRC32 of the body bytes
    pub body_crc32: u32,
    pub body_len: u64,
}

const HEADER_SIZE: usize = mem::size_of::<SnapshotHeader>();

fn body_crc(body: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(body);
    hasher.finalize()
}

fn encode_body(store: &MemoryStore) -> Result<Vec<u8>> {
    let entries: Vec<(&str, &[u8])> = store.iter_sorted().collect();
    Ok(bincode::serde::encode_to_vec(&entries, config::standard())?)
}

/// Write a snapshot to an open file positioned at start.
fn write_snapshot_to(file: &File, store: &MemoryStore) -> Result<()> {
    let body = encode_body(store)?;
    let entry_count = u32::try_from(store.entries.len())
        .map_err(|_| StoreError::Corrupt("too many entries for a snapshot"))?;

    let header = SnapshotHeader {
        magic: SNAPSHOT_MAGIC,
        version: SNAPSHOT_VERSION,
        entry_count,
        body_crc32: body_crc(&body),
        body_len: body.len() as u64,
    };

    let mut writer = BufWriter::new(file);
    writer.write_all(bytes_of(&header))?;
    writer.write_all(&body)?;
    writer.flush()?;
    Ok(())
}

/// Parse a complete snapshot image.
fn parse_snapshot(buf: &[u8]) -> Result<MemoryStore> {
    if buf.len() < HEADER_SIZE {
        return Err(StoreError::Corrupt("file shorter than snapshot header"));
    }

    let header: SnapshotHeader = pod_read_unaligned(&buf[..HEADER_SIZE]);

    if header.magic != SNAPSHOT_MAGIC {
        return Err(StoreError::Corrupt("bad magic"));
    }
    if header.version != SNAPSHOT_VERSION {
        return Err(StoreError::VersionMismatch {
            on_disk: header.version,
            expected: SNAPSHOT_VERSION,
        });
    }

    let body = &buf[HEADER_SIZE..];
    if body.len() as u64 != header.body_len {
        return Err(StoreError::Corrupt("body length does not match header"));
    }
    if body_crc(body) != header.body_crc32 {
        return Err(StoreError::Corrupt("body checksum mismatch"));
    }

    let (entries, _read): (Vec<(String, Vec<u8>)>, usize) =
        bincode::serde::decode_from_slice(body, config::standard())?;
    if entries.len() as u64 != u64::from(header.entry_count) {
        return Err(StoreError::Corrupt("entry count does not match header"));
    }

    let entries: HashMap<String, Vec<u8>> = entries.into_iter().collect();
    Ok(MemoryStore { entries })
}

impl MemoryStore {
    /// Load a snapshot; a missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        let buf = match fs::read(path) {
            Ok(buf) => buf,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no snapshot at {}, starting empty", path.display());
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };

        let store = parse_snapshot(&buf)?;
        debug!(
            "loaded {} entries from {}",
            store.entries.len(),
            path.display()
        );
        Ok(store)
    }

    /// Atomic snapshot write
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let tmp = NamedTempFile::new_in(parent)?;
        write_snapshot_to(tmp.as_file(), self)?;
        tmp.as_file().sync_all()?;

        // Atomically rename temp file to target path
        tmp.persist(path).map_err(|e| e.error)?;

        #[cfg(unix)]
        {
            if let Ok(dir) = File::open(parent) {
                let _ = dir.sync_all();
            }
        }

        debug!("saved {} entries to {}", self.entries.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
