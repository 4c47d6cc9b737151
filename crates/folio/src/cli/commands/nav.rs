//! Implementation of `folio nav`.

use std::process::ExitCode;

use folio_document::NodeRef;

use crate::cli::{args::NavCommand, context::CommandContext, output::node_line};

/// Prints the neighbours of a document within the filtered order.
pub fn run(ctx: &CommandContext, cmd: &NavCommand) -> ExitCode {
    let registry = match ctx.registry(&cmd.collection) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let node = match registry.get(&cmd.uri) {
        Ok(node) => node,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let criteria = cmd.criteria();
    print_neighbour("previous", registry.previous(node.uri(), &criteria));
    print_neighbour("next", registry.next(node.uri(), &criteria));
    ExitCode::SUCCESS
}

/// Prints one labelled neighbour, or a dash when there is none.
fn print_neighbour(label: &str, node: Option<NodeRef<'_>>) {
    match node {
        Some(node) => println!("{label:<9}{}", node_line(node)),
        None => println!("{label:<9}-"),
    }
}
