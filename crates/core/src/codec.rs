//! Persisted byte format for [`FileMetadataRecord`].
//!
//! Layout: fourteen integers in a fixed order, each a bincode "standard"
//! varint (little-endian; values below 251 take one byte, larger values a tag
//! byte followed by a u16/u32/u64). The path is the store key and is never
//! part of the value.
//!
//! | # | field              | width |
//! |---|--------------------|-------|
//! | 1 | file size          | u64   |
//! | 2 | file size high     | u32   |
//! | 3 | file size low      | u32   |
//! | 4 | file index         | u64   |
//! | 5 | file index high    | u32   |
//! | 6 | file index low     | u32   |
//! | 7 | attributes         | u32   |
//! | 8 | creation time      | u64   |
//! | 9 | last access time   | u64   |
//! | 10| last write time    | u64   |
//! | 11| number of links    | u32   |
//! | 12| volume serial      | u32   |
//! | 13| reserved0          | u32   |
//! | 14| reserved1          | u32   |

use bincode::config::{self, Configuration};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{
    attributes::FileAttributes,
    error::{Error, Result},
    record::{FileMetadataRecord, join_u64},
    time::FileTime,
};

/// Smallest possible encoding: every field fits in a single byte.
pub const MIN_ENCODED_LEN: usize = 14;

/// Largest possible encoding: 5 x u64 (9 bytes) + 9 x u32 (5 bytes).
pub const MAX_ENCODED_LEN: usize = 5 * 9 + 9 * 5;

#[inline]
fn wire_config() -> Configuration {
    config::standard()
}

/// Field-for-field image of the stored value. Declaration order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct StoredFields {
    pub file_size: u64,
    pub file_size_high: u32,
    pub file_size_low: u32,
    pub file_index: u64,
    pub file_index_high: u32,
    pub file_index_low: u32,
    pub attributes: u32,
    pub creation_time: u64,
    pub last_access_time: u64,
    pub last_write_time: u64,
    pub number_of_links: u32,
    pub volume_serial_number: u32,
    pub reserved0: u32,
    pub reserved1: u32,
}

impl From<&FileMetadataRecord> for StoredFields {
    fn from(r: &FileMetadataRecord) -> Self {
        Self {
            file_size: r.size(),
            file_size_high: r.size_high(),
            file_size_low: r.size_low(),
            file_index: r.index(),
            file_index_high: r.index_high(),
            file_index_low: r.index_low(),
            attributes: r.attributes().bits(),
            creation_time: r.creation_time().ticks(),
            last_access_time: r.last_access_time().ticks(),
            last_write_time: r.last_write_time().ticks(),
            number_of_links: r.number_of_links(),
            volume_serial_number: r.volume_serial_number(),
            reserved0: r.reserved0(),
            reserved1: r.reserved1(),
        }
    }
}

pub(crate) fn encode_fields(fields: &StoredFields) -> Vec<u8> {
    // Integers into a Vec have no failure mode.
    bincode::serde::encode_to_vec(fields, wire_config())
        .expect("encoding fixed integer fields into a Vec cannot fail")
}

/// Serialize a record into its stored byte form.
pub fn encode(record: &FileMetadataRecord) -> Vec<u8> {
    encode_fields(&StoredFields::from(record))
}

fn check_split(field: &'static str, value: u64, high: u32, low: u32) -> Result<()> {
    if join_u64(high, low) != value {
        return Err(Error::SplitMismatch {
            field,
            value,
            high,
            low,
        });
    }
    Ok(())
}

/// Rebuild a record from stored bytes and the path they were keyed under.
///
/// Fails with [`Error::InvalidInput`] on an empty path or byte slice, with
/// [`Error::Decode`] if the bytes end before all fields are read, and with
/// [`Error::SplitMismatch`] if a stored 64-bit value disagrees with its stored
/// halves. Both of the latter report `true` from [`Error::is_corruption`].
/// A stored link count of 0 is raised to 1.
pub fn decode(path: impl Into<String>, bytes: &[u8]) -> Result<FileMetadataRecord> {
    let path = path.into();
    if path.is_empty() {
        return Err(Error::InvalidInput(
            "path was empty and thus file info could not be created",
        ));
    }
    if bytes.is_empty() {
        return Err(Error::InvalidInput(
            "stored bytes were empty and thus file info could not be created",
        ));
    }

    debug!("decoding file info from store: {path}");

    let (fields, read): (StoredFields, usize) =
        bincode::serde::decode_from_slice(bytes, wire_config())?;
    if read < bytes.len() {
        trace!("{path}: ignoring {} trailing bytes", bytes.len() - read);
    }

    check_split(
        "file size",
        fields.file_size,
        fields.file_size_high,
        fields.file_size_low,
    )?;
    check_split(
        "file index",
        fields.file_index,
        fields.file_index_high,
        fields.file_index_low,
    )?;

    if fields.number_of_links == 0 {
        debug!("{path}: stored link count was 0, raising to 1");
    }

    Ok(FileMetadataRecord::from_parts(
        path,
        fields.file_size,
        fields.file_index,
        FileAttributes::from_raw(fields.attributes),
        [
            FileTime::from_ticks(fields.creation_time),
            FileTime::from_ticks(fields.last_access_time),
            FileTime::from_ticks(fields.last_write_time),
        ],
        fields.number_of_links,
        fields.volume_serial_number,
        [fields.reserved0, fields.reserved1],
    ))
}

impl FileMetadataRecord {
    /// Shorthand for [`encode`].
    pub fn to_bytes(&self) -> Vec<u8> {
        encode(self)
    }
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
