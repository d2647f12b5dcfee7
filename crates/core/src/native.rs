//! Fixed-layout structures handed to the OS driver boundary.
//!
//! These mirror `WIN32_FIND_DATAW` and `BY_HANDLE_FILE_INFORMATION`. They are
//! one-way projections of a [`FileMetadataRecord`] and are never persisted.

use bytemuck::{Pod, Zeroable, bytes_of};

use crate::{record::FileMetadataRecord, time::FileTime};

/// Capacity of the primary filename buffer, terminator included.
pub const MAX_PATH: usize = 260;

/// Capacity of the 8.3 alternate filename buffer.
pub const ALTERNATE_NAME_LEN: usize = 14;

/// FILETIME: tick count split into two little-endian dwords.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct NativeFileTime {
    pub low: u32,
    pub high: u32,
}

impl From<FileTime> for NativeFileTime {
    fn from(t: FileTime) -> Self {
        Self {
            low: t.low(),
            high: t.high(),
        }
    }
}

impl From<NativeFileTime> for FileTime {
    fn from(t: NativeFileTime) -> Self {
        FileTime::from_halves(t.high, t.low)
    }
}

/// Directory entry returned from find/list operations.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct Win32FindData {
    pub file_attributes: u32,
    pub creation_time: NativeFileTime,
    pub last_access_time: NativeFileTime,
    pub last_write_time: NativeFileTime,
    pub file_size_high: u32,
    pub file_size_low: u32,
    /// Reparse tag when the reparse-point attribute is set.
    pub reserved0: u32,
    pub reserved1: u32,
    /// UTF-16, NUL terminated.
    pub file_name: [u16; MAX_PATH],
    /// Always empty. Filling it made every entry show up twice in Explorer
    /// listings; the cause at the driver boundary is still unknown.
    pub alternate_file_name: [u16; ALTERNATE_NAME_LEN],
}

impl Win32FindData {
    /// The filename buffer decoded up to its terminator.
    pub fn file_name(&self) -> String {
        utf16_until_nul(&self.file_name)
    }

    pub fn alternate_file_name(&self) -> String {
        utf16_until_nul(&self.alternate_file_name)
    }

    /// Number of UTF-16 units before the terminator.
    pub fn file_name_len(&self) -> usize {
        self.file_name.iter().position(|&c| c == 0).unwrap_or(MAX_PATH)
    }

    /// Raw bytes in native layout.
    pub fn as_bytes(&self) -> &[u8] {
        bytes_of(self)
    }
}

impl From<&FileMetadataRecord> for Win32FindData {
    fn from(r: &FileMetadataRecord) -> Self {
        let mut data = Self {
            file_attributes: r.attributes().bits(),
            creation_time: r.creation_time().into(),
            last_access_time: r.last_access_time().into(),
            last_write_time: r.last_write_time().into(),
            file_size_high: r.size_high(),
            file_size_low: r.size_low(),
            reserved0: r.reserved0(),
            reserved1: r.reserved1(),
            ..Zeroable::zeroed()
        };
        fill_utf16(&mut data.file_name, projected_name(r.path()));
        data
    }
}

/// File information queried through an open handle.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct ByHandleFileInformation {
    pub file_attributes: u32,
    pub creation_time: NativeFileTime,
    pub last_access_time: NativeFileTime,
    pub last_write_time: NativeFileTime,
    pub volume_serial_number: u32,
    pub file_size_high: u32,
    pub file_size_low: u32,
    pub number_of_links: u32,
    pub file_index_high: u32,
    pub file_index_low: u32,
}

impl ByHandleFileInformation {
    pub fn as_bytes(&self) -> &[u8] {
        bytes_of(self)
    }
}

impl From<&FileMetadataRecord> for ByHandleFileInformation {
    fn from(r: &FileMetadataRecord) -> Self {
        Self {
            file_attributes: r.attributes().bits(),
            creation_time: r.creation_time().into(),
            last_access_time: r.last_access_time().into(),
            last_write_time: r.last_write_time().into(),
            volume_serial_number: r.volume_serial_number(),
            file_size_high: r.size_high(),
            file_size_low: r.size_low(),
            number_of_links: r.number_of_links(),
            file_index_high: r.index_high(),
            file_index_low: r.index_low(),
        }
    }
}

impl FileMetadataRecord {
    /// Project into the directory-entry structure. Lossy for long paths.
    pub fn to_find_data(&self) -> Win32FindData {
        Win32FindData::from(self)
    }

    pub fn to_by_handle(&self) -> ByHandleFileInformation {
        ByHandleFileInformation::from(self)
    }
}

/// The name placed in the find-data buffer: the path without leading separators.
pub fn projected_name(path: &str) -> &str {
    path.trim_start_matches(['/', '\\'])
}

/// Copy `s` as UTF-16 into `buf`, always leaving room for a NUL.
/// Stops before a character that would not fit whole.
fn fill_utf16(buf: &mut [u16], s: &str) {
    let cap = buf.len().saturating_sub(1);
    let mut pos = 0;
    let mut scratch = [0u16; 2];

    for ch in s.chars() {
        let units = ch.encode_utf16(&mut scratch);
        if pos + units.len() > cap {
            break;
        }
        buf[pos..pos + units.len()].copy_from_slice(units);
        pos += units.len();
    }

    buf[pos..].fill(0);
}

fn utf16_until_nul(buf: &[u16]) -> String {
    let end = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..end])
}

#[cfg(test)]
#[path = "native_tests.rs"]
mod tests;
