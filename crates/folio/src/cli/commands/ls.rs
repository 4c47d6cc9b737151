//! Implementation of `folio ls`.

use std::process::ExitCode;

use folio_index::Registry;

use crate::cli::{args::LsCommand, context::CommandContext};

/// Lists configured collections, or prints one collection's tree.
pub fn run(ctx: &CommandContext, cmd: &LsCommand) -> ExitCode {
    match &cmd.collection {
        Some(name) => match ctx.registry(name) {
            Ok(registry) => cmd_ls_tree(registry, cmd.long),
            Err(code) => code,
        },
        None => cmd_ls_collections(ctx, cmd.long),
    }
}

/// Lists all configured collections.
fn cmd_ls_collections(ctx: &CommandContext, long: bool) -> ExitCode {
    let config = &ctx.config;

    if config.collections.is_empty() {
        println!("No collections configured.");
        return ExitCode::SUCCESS;
    }

    for collection in &config.collections {
        println!(
            "{} ({}) -> {}",
            collection.name,
            collection.kind,
            collection.path.display()
        );

        if long {
            for pattern in &collection.include {
                println!("  + {pattern}");
            }
            for pattern in &collection.exclude {
                println!("  - {pattern}");
            }
            println!();
        }
    }

    ExitCode::SUCCESS
}

/// Prints the visible nodes of a collection, indented by level.
fn cmd_ls_tree(registry: &Registry, long: bool) -> ExitCode {
    let mut printed = 0;
    registry.walk(None, |node| {
        if !node.allowed(registry.includes_drafts())
            || node.ancestors().iter().any(|a| !a.allowed(registry.includes_drafts()))
        {
            return;
        }
        let indent = "  ".repeat(node.level() - 1);
        if long {
            println!(
                "{indent}{} [{}] {} {}",
                node.slug(),
                node.category(),
                node.date_string(),
                node.title()
            );
        } else {
            println!("{indent}{}", node.slug());
        }
        printed += 1;
    });

    if printed == 0 {
        println!("No documents found.");
    }
    ExitCode::SUCCESS
}
