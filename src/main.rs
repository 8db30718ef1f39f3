//! SPRITEKEY CLI entrypoint.
//!
//! Provides a thin wrapper over the `cli` module: parse args, dispatch to
//! single-file or manifest processing, and exit with status 1 on any usage
//! or processing error. For programmatic use, prefer the library API
//! (`spritekey::api`).

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

mod cli;

fn main() {
    let args = match cli::CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    if let Err(e) = cli::run(args) {
        eprintln!("Error: {}", e);
        if matches!(e, cli::AppError::MissingArgument { .. }) {
            eprintln!("{}", cli::CliArgs::command().render_usage());
        }
        std::process::exit(1);
    }
}
