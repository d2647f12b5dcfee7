mod config;
pub mod logging;

pub use config::{
    PROGRAM_LOG_LEVEL, PROGRAM_NAME, STORE_FILE_NAME, STORE_PATH_ENV, default_store_path,
    metacache_dir, resolve_store_path,
};

pub use logging::init;
