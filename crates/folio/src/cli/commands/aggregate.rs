//! Implementation of `folio tags`, `folio authors` and `folio months`.

use std::process::ExitCode;

use crate::cli::{
    args::AggregateCommand,
    context::CommandContext,
    output::{count_table, print_json},
};

/// Lists the tags of a collection.
pub fn tags(ctx: &CommandContext, cmd: &AggregateCommand) -> ExitCode {
    let registry = match ctx.registry(&cmd.collection) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let tags = registry.tags();
    if cmd.output.json {
        return print_json(tags);
    }
    if tags.is_empty() {
        println!("No tags found.");
        return ExitCode::SUCCESS;
    }

    let rows = tags
        .iter()
        .map(|t| (t.name.clone(), t.slug.clone(), t.count));
    println!("{}", count_table(["Tag", "Slug", "Documents"], rows));
    ExitCode::SUCCESS
}

/// Lists the authors of a collection.
pub fn authors(ctx: &CommandContext, cmd: &AggregateCommand) -> ExitCode {
    let registry = match ctx.registry(&cmd.collection) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let authors = registry.authors();
    if cmd.output.json {
        return print_json(authors);
    }
    if authors.is_empty() {
        println!("No authors found.");
        return ExitCode::SUCCESS;
    }

    let rows = authors
        .iter()
        .map(|a| (a.name.clone(), a.slug.clone(), a.count));
    println!("{}", count_table(["Author", "Slug", "Documents"], rows));
    ExitCode::SUCCESS
}

/// Lists the publication months of a collection, most recent first.
pub fn months(ctx: &CommandContext, cmd: &AggregateCommand) -> ExitCode {
    let registry = match ctx.registry(&cmd.collection) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let months = registry.months();
    if cmd.output.json {
        return print_json(months);
    }
    if months.is_empty() {
        println!("No documents found.");
        return ExitCode::SUCCESS;
    }

    let rows = months
        .iter()
        .map(|m| (m.name.clone(), m.slug.clone(), m.count));
    println!("{}", count_table(["Month", "Slug", "Documents"], rows));
    ExitCode::SUCCESS
}
