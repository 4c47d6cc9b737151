//! Command-line interface for folio content collections.

use std::{io, process::ExitCode};

use clap::Parser;
use folio::cli::{CommandContext, args::Cli, commands};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = match CommandContext::load(cli.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &ctx)
}

/// Installs a stderr subscriber filtered by `RUST_LOG`, else by verbosity.
fn init_tracing(verbose: u8) {
    let default_level = if verbose > 0 { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
