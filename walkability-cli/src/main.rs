//! Binary crate for the `walkability` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Resolving credentials, interactively if needed
//! - Human-friendly output formatting

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod report;

#[tokio::main]
async fn main() -> ExitCode {
    let cmd = cli::Cli::parse();
    init_logging(cmd.verbose);

    match cmd.run().await {
        Ok(cli::Outcome::Reported) => ExitCode::SUCCESS,
        Ok(cli::Outcome::Night) => {
            println!("{}", cli::NIGHT_MESSAGE);
            ExitCode::from(2)
        }
        Err(err) => {
            tracing::debug!(error = ?err, "run failed");
            eprintln!("{err:#}\nType 'walkability --help' for more details.");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; `RUST_LOG` wins over the `-v` count.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
