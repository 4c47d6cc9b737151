//! Implementation of `folio find`.

use std::process::ExitCode;

use crate::cli::{args::FindCommand, context::CommandContext, output::print_nodes};

/// Prints the documents matching the filter flags, in tree order.
pub fn run(ctx: &CommandContext, cmd: &FindCommand) -> ExitCode {
    let registry = match ctx.registry(&cmd.collection) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let nodes = registry.filter(&cmd.criteria());
    print_nodes(&nodes, cmd.output.json)
}
