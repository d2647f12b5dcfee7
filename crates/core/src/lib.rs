mod attributes;
pub mod codec;
mod error;
pub mod native;
mod observe;
mod record;
mod time;

pub use attributes::{FileAttributes, reparse_tag};
pub use codec::{decode, encode};
pub use error::{Error, Result};
pub use native::{ByHandleFileInformation, NativeFileTime, Win32FindData};
pub use observe::{observe_path, volume_serial_of};
pub use record::FileMetadataRecord;
pub use time::{FileTime, TICKS_PER_SEC, UNIX_EPOCH_TICKS};
