use std::{path::Path, process::ExitCode};

use anyhow::Result;
use clap::Args;

use super::{Session, exit_with};

#[derive(Debug, Args)]
pub struct ForgetArgs {
    /// Stored keys to remove
    #[arg(required = true)]
    pub paths: Vec<String>,
}

pub fn run(store: Option<&Path>, args: ForgetArgs) -> ExitCode {
    exit_with("forget", execute(store, args))
}

fn execute(store: Option<&Path>, args: ForgetArgs) -> Result<ExitCode> {
    let mut session = Session::open(store)?;

    let removed = args
        .paths
        .iter()
        .filter(|path| session.cache.remove(path))
        .count();

    session.finish()?;
    println!("Removed {removed} of {} entries", args.paths.len());
    Ok(ExitCode::SUCCESS)
}
