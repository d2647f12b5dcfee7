use super::*;
use crate::MetadataStore;
use metacache_core::{FileAttributes, FileMetadataRecord, encode};
use tempfile::tempdir;

fn populated_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    for (i, path) in ["/b.txt", "/a.txt", "/dir/c.bin"].iter().enumerate() {
        let rec = FileMetadataRecord::new(*path, i as u64, FileAttributes::ARCHIVE, 7).unwrap();
        store.put(path, encode(&rec));
    }
    store
}

#[test]
fn save_then_load_round_trip() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("nested").join("store.bin");
    let store = populated_store();

    store.save(&path).expect("save");
    let loaded = MemoryStore::load(&path).expect("load");

    assert_eq!(loaded, store);
    assert_eq!(loaded.keys(), vec!["/a.txt", "/b.txt", "/dir/c.bin"]);
}

#[test]
fn missing_file_loads_empty() {
    let dir = tempdir().expect("create temp dir");
    let store = MemoryStore::load(&dir.path().join("absent.bin")).expect("load");
    assert!(store.is_empty());
}

#[test]
fn empty_store_round_trip() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("store.bin");

    MemoryStore::new().save(&path).unwrap();
    assert!(MemoryStore::load(&path).unwrap().is_empty());
}

#[test]
fn header_is_written_first() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("store.bin");
    populated_store().save(&path).unwrap();

    let buf = fs::read(&path).unwrap();
    let header: SnapshotHeader = pod_read_unaligned(&buf[..HEADER_SIZE]);
    assert_eq!(header.magic, SNAPSHOT_MAGIC);
    assert_eq!(header.version, SNAPSHOT_VERSION);
    assert_eq!(header.entry_count, 3);
    assert_eq!(header.body_len as usize, buf.len() - HEADER_SIZE);
}

#[test]
fn damaged_snapshots_are_rejected() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("store.bin");
    populated_store().save(&path).unwrap();
    let good = fs::read(&path).unwrap();

    let flip_body = {
        let mut b = good.clone();
        let last = b.len() - 1;
        b[last] ^= 0xFF;
        b
    };
    let bad_magic = {
        let mut b = good.clone();
        b[0] ^= 0xFF;
        b
    };
    let truncated = good[..good.len() - 1].to_vec();
    let short = good[..HEADER_SIZE - 1].to_vec();

    for (name, bytes) in [
        ("flipped body", flip_body),
        ("bad magic", bad_magic),
        ("truncated", truncated),
        ("short", short),
    ] {
        fs::write(&path, &bytes).unwrap();
        match MemoryStore::load(&path) {
            Err(StoreError::Corrupt(_)) => {}
            other => panic!("{name}: expected Corrupt, got {other:?}"),
        }
    }
}

#[test]
fn future_version_is_reported() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("store.bin");
    populated_store().save(&path).unwrap();

    let mut buf = fs::read(&path).unwrap();
    buf[4..8].copy_from_slice(&(SNAPSHOT_VERSION + 1).to_ne_bytes());
    fs::write(&path, &buf).unwrap();

    match MemoryStore::load(&path) {
        Err(StoreError::VersionMismatch { on_disk, expected }) => {
            assert_eq!(on_disk, SNAPSHOT_VERSION + 1);
            assert_eq!(expected, SNAPSHOT_VERSION);
        }
        other => panic!("expected VersionMismatch, got {other:?}"),
    }
}

#[test]
fn save_replaces_existing_snapshot() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("store.bin");

    populated_store().save(&path).unwrap();
    let mut smaller = MemoryStore::new();
    smaller.put("/only", vec![0; 14]);
    smaller.save(&path).unwrap();

    assert_eq!(MemoryStore::load(&path).unwrap().keys(), vec!["/only"]);
}
