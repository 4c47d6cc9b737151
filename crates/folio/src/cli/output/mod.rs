//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL_CONDENSED};
use folio_document::{NodeRef, Snapshot};
use serde::Serialize;

/// Prints a value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Formats a one-line summary of a node: uri, date and title.
pub fn node_line(node: NodeRef<'_>) -> String {
    format!("{}  {}  {}", node.uri(), node.date_string(), node.title())
}

/// Prints a list of nodes, one per line or as a JSON array of snapshots.
pub fn print_nodes(nodes: &[NodeRef<'_>], json: bool) -> ExitCode {
    if json {
        let snapshots: Vec<Snapshot> = nodes.iter().map(|n| n.snapshot()).collect();
        return print_json(&snapshots);
    }

    if nodes.is_empty() {
        println!("No documents found.");
        return ExitCode::SUCCESS;
    }
    for node in nodes {
        println!("{}", node_line(*node));
    }
    ExitCode::SUCCESS
}

/// Builds a table with a header row and a right-aligned final count column.
pub fn count_table<I>(header: [&str; 3], rows: I) -> Table
where
    I: IntoIterator<Item = (String, String, usize)>,
{
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(header.to_vec());
    for (name, slug, count) in rows {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(slug),
            Cell::new(count).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
