//! Protowrap - protobuf schema to Java archive packager
//!
//! Entry point for the protowrap command-line application.

use anyhow::Result;
use clap::Parser;

use protowrap::cli::args::normalize_args;
use protowrap::cli::output::display_error;
use protowrap::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.run() {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
