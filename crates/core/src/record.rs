use log::trace;

use crate::{
    attributes::FileAttributes,
    error::{Error, Result},
    time::FileTime,
};

/// Everything needed to answer a "get file information" query for one path.
///
/// Size and index are held as single 64-bit values; the legacy 32-bit halves
/// used by the native structures are derived on read, so the two
/// representations cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadataRecord {
    path: String,
    size: u64,
    index: u64,
    attributes: FileAttributes,
    creation_time: FileTime,
    last_access_time: FileTime,
    last_write_time: FileTime,
    number_of_links: u32,
    volume_serial_number: u32,
    reserved0: u32,
    reserved1: u32,
}

#[inline]
pub(crate) const fn split_u64(value: u64) -> (u32, u32) {
    ((value >> 32) as u32, value as u32)
}

#[inline]
pub(crate) const fn join_u64(high: u32, low: u32) -> u64 {
    ((high as u64) << 32) | low as u64
}

/// Link count floor: an entry with zero links is hidden from directory listings.
#[inline]
pub(crate) const fn floor_links(links: u32) -> u32 {
    if links == 0 { 1 } else { links }
}

impl FileMetadataRecord {
    /// Fresh record for an observed file, all timestamps set to now.
    pub fn new(
        path: impl Into<String>,
        index: u64,
        attributes: FileAttributes,
        volume_serial_number: u32,
    ) -> Result<Self> {
        Self::with_times(path, index, attributes, volume_serial_number, None, None, None)
    }

    /// Fresh record with explicit timestamps; any `None` becomes the current instant.
    pub fn with_times(
        path: impl Into<String>,
        index: u64,
        attributes: FileAttributes,
        volume_serial_number: u32,
        creation_time: Option<FileTime>,
        last_access_time: Option<FileTime>,
        last_write_time: Option<FileTime>,
    ) -> Result<Self> {
        let path = path.into();
        if path.is_empty() {
            return Err(Error::InvalidInput(
                "path was empty and thus file info could not be created",
            ));
        }

        let now = FileTime::now();
        let record = Self {
            path,
            size: 0,
            index,
            attributes,
            creation_time: creation_time.unwrap_or(now),
            last_access_time: last_access_time.unwrap_or(now),
            last_write_time: last_write_time.unwrap_or(now),
            number_of_links: 1,
            volume_serial_number,
            reserved0: 0,
            reserved1: 0,
        };
        trace!("created {record:?}");
        Ok(record)
    }

    /// Rebuild a record from bytes produced by [`crate::codec::encode`].
    pub fn from_stored(path: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        crate::codec::decode(path, bytes)
    }

    /// Assemble a record from already-validated parts. Used by the decoder.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        path: String,
        size: u64,
        index: u64,
        attributes: FileAttributes,
        times: [FileTime; 3],
        number_of_links: u32,
        volume_serial_number: u32,
        reserved: [u32; 2],
    ) -> Self {
        let [creation_time, last_access_time, last_write_time] = times;
        let [reserved0, reserved1] = reserved;
        Self {
            path,
            size,
            index,
            attributes,
            creation_time,
            last_access_time,
            last_write_time,
            number_of_links: floor_links(number_of_links),
            volume_serial_number,
            reserved0,
            reserved1,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    // Size

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn size_high(&self) -> u32 {
        split_u64(self.size).0
    }

    pub fn size_low(&self) -> u32 {
        split_u64(self.size).1
    }

    pub fn set_size(&mut self, size: u64) {
        self.size = size;
    }

    pub fn set_size_halves(&mut self, high: u32, low: u32) {
        self.size = join_u64(high, low);
    }

    // Index

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn index_high(&self) -> u32 {
        split_u64(self.index).0
    }

    pub fn index_low(&self) -> u32 {
        split_u64(self.index).1
    }

    pub fn set_index(&mut self, index: u64) {
        self.index = index;
    }

    pub fn set_index_halves(&mut self, high: u32, low: u32) {
        self.index = join_u64(high, low);
    }

    pub fn attributes(&self) -> FileAttributes {
        self.attributes
    }

    pub fn set_attributes(&mut self, attributes: FileAttributes) {
        self.attributes = attributes;
    }

    pub fn creation_time(&self) -> FileTime {
        self.creation_time
    }

    pub fn last_access_time(&self) -> FileTime {
        self.last_access_time
    }

    pub fn last_write_time(&self) -> FileTime {
        self.last_write_time
    }

    /// Update timestamps; `None` leaves the current value untouched.
    pub fn set_times(
        &mut self,
        creation_time: Option<FileTime>,
        last_access_time: Option<FileTime>,
        last_write_time: Option<FileTime>,
    ) {
        if let Some(t) = creation_time {
            self.creation_time = t;
        }
        if let Some(t) = last_access_time {
            self.last_access_time = t;
        }
        if let Some(t) = last_write_time {
            self.last_write_time = t;
        }
    }

    pub fn number_of_links(&self) -> u32 {
        self.number_of_links
    }

    /// A value of 0 is stored as 1.
    pub fn set_number_of_links(&mut self, links: u32) {
        self.number_of_links = floor_links(links);
    }

    pub fn volume_serial_number(&self) -> u32 {
        self.volume_serial_number
    }

    pub fn set_volume_serial_number(&mut self, serial: u32) {
        self.volume_serial_number = serial;
    }

    pub fn reserved0(&self) -> u32 {
        self.reserved0
    }

    pub fn set_reserved0(&mut self, value: u32) {
        self.reserved0 = value;
    }

    pub fn reserved1(&self) -> u32 {
        self.reserved1
    }

    pub fn set_reserved1(&mut self, value: u32) {
        self.reserved1 = value;
    }

    /// The reparse tag, only meaningful when the reparse attribute bit is set.
    pub fn reparse_tag(&self) -> Option<u32> {
        self.attributes
            .contains(FileAttributes::REPARSE_POINT)
            .then_some(self.reserved0)
    }

    pub fn is_directory(&self) -> bool {
        self.attributes.contains(FileAttributes::DIRECTORY)
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
