use std::process::ExitCode;

use clap::Parser;

mod commands;
mod printer;

use commands::{Cli, Command};
use metacache_runtime::logging;

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    let store = cli.store.as_deref();
    match cli.command {
        Command::Observe(args) => commands::observe::run(store, args),
        Command::Show(args) => commands::show::run(store, args),
        Command::List(args) => commands::list::run(store, args),
        Command::Forget(args) => commands::forget::run(store, args),
        Command::Dump(args) => commands::dump::run(store, args),
    }
}
