//! Command implementations and dispatch.

pub mod aggregate;
pub mod check;
pub mod config;
pub mod find;
pub mod get;
pub mod ls;
pub mod nav;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Check => check::run(ctx),
        Commands::Config => config::run(ctx),
        Commands::Ls(cmd) => ls::run(ctx, &cmd),
        Commands::Get(cmd) => get::run(ctx, &cmd),
        Commands::Find(cmd) => find::run(ctx, &cmd),
        Commands::Nav(cmd) => nav::run(ctx, &cmd),
        Commands::Tags(cmd) => aggregate::tags(ctx, &cmd),
        Commands::Authors(cmd) => aggregate::authors(ctx, &cmd),
        Commands::Months(cmd) => aggregate::months(ctx, &cmd),
    }
}
