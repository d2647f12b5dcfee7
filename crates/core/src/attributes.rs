use bitflags::bitflags;

bitflags! {
    /// Windows file attribute bits as reported to the driver boundary.
    ///
    /// The codec treats this as an opaque `u32`: bits without a named constant
    /// are retained verbatim through encode/decode.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FileAttributes: u32 {
        const READONLY = 0x0000_0001;
        const HIDDEN = 0x0000_0002;
        const SYSTEM = 0x0000_0004;
        const DIRECTORY = 0x0000_0010;
        const ARCHIVE = 0x0000_0020;
        const DEVICE = 0x0000_0040;
        /// Only valid when no other attribute is set.
        const NORMAL = 0x0000_0080;
        const TEMPORARY = 0x0000_0100;
        const SPARSE_FILE = 0x0000_0200;
        /// When set, `reserved0` carries the reparse tag.
        const REPARSE_POINT = 0x0000_0400;
        const COMPRESSED = 0x0000_0800;
        const OFFLINE = 0x0000_1000;
        const NOT_CONTENT_INDEXED = 0x0000_2000;
        const ENCRYPTED = 0x0000_4000;
    }
}

impl FileAttributes {
    /// Build from a raw bitmask, keeping unknown bits.
    #[inline]
    pub fn from_raw(bits: u32) -> Self {
        Self::from_bits_retain(bits)
    }
}

impl From<u32> for FileAttributes {
    fn from(bits: u32) -> Self {
        Self::from_raw(bits)
    }
}

impl From<FileAttributes> for u32 {
    fn from(attrs: FileAttributes) -> Self {
        attrs.bits()
    }
}

/// Well-known reparse point tags carried in `reserved0`.
pub mod reparse_tag {
    pub const CSV: u32 = 0x8000_0009;
    pub const DEDUP: u32 = 0x8000_0013;
    pub const DFS: u32 = 0x8000_000A;
    pub const DFSR: u32 = 0x8000_0012;
    pub const HSM: u32 = 0xC000_0004;
    pub const HSM2: u32 = 0x8000_0006;
    pub const MOUNT_POINT: u32 = 0xA000_0003;
    pub const NFS: u32 = 0x8000_0014;
    pub const SIS: u32 = 0x8000_0007;
    pub const SYMLINK: u32 = 0xA000_000C;
    pub const WIM: u32 = 0x8000_0008;

    /// Human-readable name for a known tag.
    pub fn name(tag: u32) -> Option<&'static str> {
        let name = match tag {
            CSV => "csv",
            DEDUP => "dedup",
            DFS => "dfs",
            DFSR => "dfsr",
            HSM => "hsm",
            HSM2 => "hsm2",
            MOUNT_POINT => "mount-point",
            NFS => "nfs",
            SIS => "sis",
            SYMLINK => "symlink",
            WIM => "wim",
            _ => return None,
        };
        Some(name)
    }
}
