pub mod dump;
pub mod forget;
pub mod list;
pub mod observe;
pub mod show;

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{debug, error};
use metacache_runtime::resolve_store_path;
use metacache_store::{MemoryStore, MetadataCache, MetadataStore};

pub use dump::DumpArgs;
pub use forget::ForgetArgs;
pub use list::ListArgs;
pub use observe::ObserveArgs;
pub use show::ShowArgs;

use crate::printer::{HumanPrinter, JsonPrinter, RecordPrinter};

#[derive(Parser, Debug)]
#[command(
    name = "metacache",
    version,
    about = "Inspect and maintain the file metadata cache",
    propagate_version = true
)]
pub struct Cli {
    /// Snapshot file to operate on (defaults to $METACACHE_STORE or the cache dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Stat files and store their metadata.
    ///
    /// Example:
    ///   metacache observe ./Cargo.toml ./src
    ///   metacache observe --volume-serial 0x1A2B3C4D report.txt
    Observe(ObserveArgs),

    /// Decode and print stored records.
    Show(ShowArgs),

    /// List every stored record.
    List(ListArgs),

    /// Remove stored records.
    Forget(ForgetArgs),

    /// Print the raw stored bytes of a record as hex.
    Dump(DumpArgs),
}

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Output records as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,
}

impl OutputOptions {
    pub fn make_printer(&self) -> Box<dyn RecordPrinter> {
        if self.json {
            Box::new(JsonPrinter::stdout())
        } else {
            Box::new(HumanPrinter::stdout())
        }
    }
}

/// Accepts decimal or `0x`-prefixed hex.
pub fn parse_u32(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse::<u32>(),
    };
    parsed.map_err(|e| format!("invalid 32-bit value {s:?}: {e}"))
}

/// An opened snapshot; written back on [`Session::finish`] only if it changed.
pub struct Session {
    path: PathBuf,
    pub cache: MetadataCache<MemoryStore>,
    loaded_len: usize,
    dirty: bool,
}

impl Session {
    pub fn open(store_override: Option<&Path>) -> Result<Self> {
        let path = resolve_store_path(store_override);
        let store = MemoryStore::load(&path)
            .with_context(|| format!("failed to load store {}", path.display()))?;
        let loaded_len = store.len();
        debug!("opened {} ({loaded_len} entries)", path.display());

        Ok(Self {
            path,
            cache: MetadataCache::new(store),
            loaded_len,
            dirty: false,
        })
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Persist if records were written or corrupt entries were dropped.
    pub fn finish(self) -> Result<()> {
        if !self.dirty && self.cache.len() == self.loaded_len {
            return Ok(());
        }
        let store = self.cache.into_inner();
        store
            .save(&self.path)
            .with_context(|| format!("failed to save store {}", self.path.display()))
    }
}

/// Shared error edge for command handlers.
pub fn exit_with(name: &str, result: Result<ExitCode>) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(e) => {
            error!("[{name}] {e:#}");
            eprintln!("[{name}] {e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
