use bincode::error::DecodeError;
use thiserror::Error;

/// Errors raised while building or decoding a [`FileMetadataRecord`](crate::FileMetadataRecord).
#[derive(Error, Debug)]
pub enum Error {
    /// A required argument (path or stored bytes) was empty.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// Stored bytes ended early or held a value out of range for its field.
    #[error("malformed metadata record: {0}")]
    Decode(#[from] DecodeError),

    /// Stored 64-bit value and its stored 32-bit halves disagree.
    #[error("inconsistent {field}: {value:#x} does not match halves {high:#x}:{low:#x}")]
    SplitMismatch {
        field: &'static str,
        value: u64,
        high: u32,
        low: u32,
    },

    /// The file could not be stat'ed while observing it.
    #[error("failed to read file metadata: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the error means the stored entry is unusable and should be dropped.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Error::Decode(_) | Error::SplitMismatch { .. })
    }
}
