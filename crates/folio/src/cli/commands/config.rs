//! Implementation of `folio config`.

use std::process::ExitCode;

use crate::cli::context::CommandContext;

/// Shows effective configuration settings as TOML.
pub fn run(ctx: &CommandContext) -> ExitCode {
    match ctx.config.settings_to_toml() {
        Ok(toml) => {
            print!("{toml}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
