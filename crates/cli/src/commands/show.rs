use std::{path::Path, process::ExitCode};

use anyhow::Result;
use clap::Args;

use super::{OutputOptions, Session, exit_with};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Stored keys to display
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Print the native directory-entry projection instead of the record
    #[arg(long)]
    pub native: bool,

    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn run(store: Option<&Path>, args: ShowArgs) -> ExitCode {
    exit_with("show", execute(store, args))
}

fn execute(store: Option<&Path>, args: ShowArgs) -> Result<ExitCode> {
    let mut session = Session::open(store)?;
    let mut printer = args.output.make_printer();
    let mut missing = 0usize;

    for path in &args.paths {
        match session.cache.lookup(path)? {
            Some(record) if args.native => printer.print_find_data(&record.to_find_data())?,
            Some(record) => printer.print_record(&record)?,
            None => {
                eprintln!("[show] no usable entry for {path}");
                missing += 1;
            }
        }
    }

    // Corrupt entries dropped by lookup are persisted away.
    session.finish()?;

    if missing > 0 {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}
