use std::{
    fs::{self, Metadata},
    path::Path,
};

use log::debug;

use crate::{
    attributes::{FileAttributes, reparse_tag},
    error::{Error, Result},
    record::FileMetadataRecord,
    time::FileTime,
};

/// Stat `path` (without following a final symlink) and build a fresh record
/// keyed by the path string.
///
/// `volume_serial` overrides the serial derived from the device id.
pub fn observe_path(path: &Path, volume_serial: Option<u32>) -> Result<FileMetadataRecord> {
    let key = path
        .to_str()
        .ok_or(Error::InvalidInput("path is not valid UTF-8"))?;
    let metadata = fs::symlink_metadata(path)?;
    let serial = volume_serial.unwrap_or_else(|| volume_serial_of(&metadata));
    FileMetadataRecord::from_metadata(key, &metadata, serial)
}

impl FileMetadataRecord {
    /// Build a record from already-fetched filesystem metadata.
    pub fn from_metadata(
        key: impl Into<String>,
        metadata: &Metadata,
        volume_serial_number: u32,
    ) -> Result<Self> {
        let key = key.into();
        let attributes = attributes_of(&key, metadata);

        // Creation time is unsupported on many unix filesystems; fall back to now.
        let mut record = Self::with_times(
            key,
            file_index_of(metadata),
            attributes,
            volume_serial_number,
            metadata.created().ok().map(FileTime::from),
            metadata.accessed().ok().map(FileTime::from),
            metadata.modified().ok().map(FileTime::from),
        )?;

        if !metadata.is_dir() {
            record.set_size(metadata.len());
        }
        record.set_number_of_links(link_count_of(metadata));
        if metadata.is_symlink() {
            record.set_reserved0(reparse_tag::SYMLINK);
        }

        debug!(
            "observed {}: size={} index={} attrs={:#x}",
            record.path(),
            record.size(),
            record.index(),
            record.attributes().bits()
        );
        Ok(record)
    }
}

#[cfg(windows)]
fn attributes_of(_key: &str, metadata: &Metadata) -> FileAttributes {
    use std::os::windows::fs::MetadataExt;
    FileAttributes::from_raw(metadata.file_attributes())
}

#[cfg(not(windows))]
fn attributes_of(key: &str, metadata: &Metadata) -> FileAttributes {
    let mut attrs = FileAttributes::empty();

    if metadata.is_dir() {
        attrs |= FileAttributes::DIRECTORY;
    } else if metadata.is_file() {
        attrs |= FileAttributes::ARCHIVE;
    }
    if metadata.is_symlink() {
        attrs |= FileAttributes::REPARSE_POINT;
    }
    if metadata.permissions().readonly() {
        attrs |= FileAttributes::READONLY;
    }

    let name = key.rsplit(['/', '\\']).next().unwrap_or(key);
    if name.starts_with('.') && name != "." && name != ".." {
        attrs |= FileAttributes::HIDDEN;
    }

    if attrs.is_empty() {
        attrs = FileAttributes::NORMAL;
    }
    attrs
}

#[cfg(unix)]
fn file_index_of(metadata: &Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    metadata.ino()
}

#[cfg(not(unix))]
fn file_index_of(_metadata: &Metadata) -> u64 {
    0
}

#[cfg(unix)]
fn link_count_of(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::MetadataExt;
    u32::try_from(metadata.nlink()).unwrap_or(u32::MAX)
}

#[cfg(not(unix))]
fn link_count_of(_metadata: &Metadata) -> u32 {
    1
}

/// A stable per-device serial: the low 32 bits of the device id.
#[cfg(unix)]
pub fn volume_serial_of(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::MetadataExt;
    metadata.dev() as u32
}

#[cfg(not(unix))]
pub fn volume_serial_of(_metadata: &Metadata) -> u32 {
    0
}

#[cfg(test)]
#[path = "observe_tests.rs"]
mod tests;
