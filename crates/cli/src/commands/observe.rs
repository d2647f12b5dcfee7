use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Args;
use log::info;

use super::{OutputOptions, Session, exit_with, parse_u32};

#[derive(Debug, Args)]
pub struct ObserveArgs {
    /// Files or directories to stat (symlinks are not followed)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Volume serial number to record instead of the one derived from the device
    #[arg(long, value_name = "N", value_parser = parse_u32)]
    pub volume_serial: Option<u32>,

    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn run(store: Option<&Path>, args: ObserveArgs) -> ExitCode {
    exit_with("observe", execute(store, args))
}

fn execute(store: Option<&Path>, args: ObserveArgs) -> Result<ExitCode> {
    let mut session = Session::open(store)?;
    let mut printer = args.output.make_printer();

    for path in &args.paths {
        let record = session
            .cache
            .observe(path, args.volume_serial)
            .with_context(|| format!("failed to observe {}", path.display()))?;
        session.mark_dirty();
        printer.print_record(&record)?;
    }

    info!("observed {} paths", args.paths.len());
    session.finish()?;
    Ok(ExitCode::SUCCESS)
}
