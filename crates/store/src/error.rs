use std::io;

use bincode::error::{DecodeError, EncodeError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("corrupt snapshot: {0}")]
    Corrupt(&'static str),

    #[error("snapshot version {on_disk} is not supported (expected {expected})")]
    VersionMismatch { on_disk: u32, expected: u32 },

    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] EncodeError),

    #[error("failed to decode snapshot body: {0}")]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Record(#[from] metacache_core::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
