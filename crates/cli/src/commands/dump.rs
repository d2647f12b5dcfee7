use std::{fmt::Write as _, path::Path, process::ExitCode};

use anyhow::Result;
use clap::Args;
use metacache_store::MetadataStore;

use super::{Session, exit_with};

#[derive(Debug, Args)]
pub struct DumpArgs {
    /// Stored key to dump
    pub path: String,
}

pub fn run(store: Option<&Path>, args: DumpArgs) -> ExitCode {
    exit_with("dump", execute(store, args))
}

fn execute(store: Option<&Path>, args: DumpArgs) -> Result<ExitCode> {
    let session = Session::open(store)?;

    let Some(bytes) = session.cache.store().get(&args.path) else {
        eprintln!("[dump] no entry for {}", args.path);
        return Ok(ExitCode::from(1));
    };

    println!("{} bytes: {}", bytes.len(), to_hex(bytes));
    Ok(ExitCode::SUCCESS)
}

pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{b:02x}");
    }
    out
}
