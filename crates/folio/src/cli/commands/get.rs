//! Implementation of `folio get`.

use std::process::ExitCode;

use folio_document::NodeRef;

use crate::cli::{args::GetCommand, context::CommandContext, output::print_json};

/// Prints one document by URI.
pub fn run(ctx: &CommandContext, cmd: &GetCommand) -> ExitCode {
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

    if cmd.output.json {
        return print_json(&node.snapshot());
    }

    print_document(node);
    ExitCode::SUCCESS
}

/// Prints a document header followed by its body.
fn print_document(node: NodeRef<'_>) {
    println!("# {}", node.title());
    println!();
    println!("id:       {}", node.id());
    println!("uri:      {}", node.uri());
    println!("category: {}", node.category());
    println!("date:     {}", node.date_string());
    println!("link:     {}", node.links().this.href);

    let tags: Vec<&str> = node.tags().iter().map(|t| t.name.as_str()).collect();
    if !tags.is_empty() {
        println!("tags:     {}", tags.join(", "));
    }
    let authors: Vec<&str> = node.authors().iter().map(|a| a.name.as_str()).collect();
    println!("authors:  {}", authors.join(", "));

    let children: Vec<&str> = node.children().map(NodeRef::uri).collect();
    if !children.is_empty() {
        println!("children: {}", children.join(", "));
    }
    for attachment in node.attachments() {
        println!("attached: {}", attachment.file_name());
    }

    println!();
    println!("{}", node.data());
}
