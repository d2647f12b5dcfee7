use std::path::{Path, PathBuf};

pub const PROGRAM_NAME: &str = "metacache";
pub const PROGRAM_LOG_LEVEL: &str = "METACACHE_LOG_LEVEL";
/// Overrides the default snapshot location.
pub const STORE_PATH_ENV: &str = "METACACHE_STORE";
pub const STORE_FILE_NAME: &str = "store.bin";

pub fn xdg_or_home(xdg_var: &str, home_suffix: &str) -> PathBuf {
    match std::env::var_os(xdg_var) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(home_suffix),
    }
}

pub fn metacache_dir() -> PathBuf {
    xdg_or_home("XDG_CACHE_HOME", ".cache").join(PROGRAM_NAME)
}

/// Snapshot path: `METACACHE_STORE` if set, else `$XDG_CACHE_HOME/metacache/store.bin`.
pub fn default_store_path() -> PathBuf {
    match std::env::var_os(STORE_PATH_ENV) {
        Some(p) if !p.is_empty() => PathBuf::from(p),
        _ => metacache_dir().join(STORE_FILE_NAME),
    }
}

/// Command-line override first, then environment, then the default.
pub fn resolve_store_path(cli_override: Option<&Path>) -> PathBuf {
    cli_override
        .map(Path::to_path_buf)
        .unwrap_or_else(default_store_path)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
