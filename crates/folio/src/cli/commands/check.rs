//! Implementation of `folio check`.

use std::process::ExitCode;

use folio_config::ConfigWarning;

use crate::cli::context::CommandContext;

/// Shows the loaded configuration file, collections and validation warnings.
///
/// Exits with failure when any warning is reported.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    match &config.config_root {
        Some(root) => println!("Config root: {}", root.display()),
        None => println!("No configuration file found; using defaults."),
    }
    println!("Environment: {}", config.settings.environment);
    println!();

    println!("Collections:");
    if config.collections.is_empty() {
        println!("   (none defined)");
    }
    for collection in &config.collections {
        let status = if collection.path.is_dir() {
            "ok"
        } else {
            "missing"
        };
        println!(
            "   {} ({}) [{status}] -> {}",
            collection.name,
            collection.kind,
            collection.path.display()
        );
    }
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("Warnings ({}):", warnings.len());
    for w in &warnings {
        println!("   - {w}");
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<&str> = warnings
        .iter()
        .map(|w| match w {
            ConfigWarning::NoCollections => {
                "Hint: add [collection.NAME] tables with a path to folio.toml"
            }
            ConfigWarning::CollectionPathMissing { .. } => {
                "Hint: create the missing directory or update the collection path"
            }
            ConfigWarning::CollectionPathNotDirectory { .. } => {
                "Hint: collection paths must point to directories, not files"
            }
            ConfigWarning::IncludePatternMatchesNothing { .. } => {
                "Hint: check include patterns or collection paths"
            }
        })
        .collect();
    hints.sort_unstable();
    hints.dedup();

    for hint in hints {
        println!("{hint}");
    }
}
