use std::{path::Path, process::ExitCode};

use anyhow::Result;
use clap::Args;

use super::{OutputOptions, Session, exit_with};

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn run(store: Option<&Path>, args: ListArgs) -> ExitCode {
    exit_with("list", execute(store, args))
}

fn execute(store: Option<&Path>, args: ListArgs) -> Result<ExitCode> {
    let mut session = Session::open(store)?;
    let mut printer = args.output.make_printer();

    let records = session.cache.records()?;
    if records.is_empty() && !args.output.json {
        println!("No entries.");
    }
    for record in &records {
        printer.print_row(record)?;
    }

    session.finish()?;
    Ok(ExitCode::SUCCESS)
}
