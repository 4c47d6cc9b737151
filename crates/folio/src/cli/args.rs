//! Clap argument definitions for the `folio` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use folio_index::Criteria;

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Query file-backed content collections")]
pub struct Cli {
    /// Use this configuration file instead of searching for folio.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log scan progress to stderr (RUST_LOG takes precedence)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared output mode flag.
#[derive(Args, Debug, Clone, Default)]
pub struct JsonArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `folio ls`.
#[derive(Args, Debug, Clone)]
pub struct LsCommand {
    /// Collection to print; lists configured collections when omitted
    pub collection: Option<String>,

    /// Show detailed information
    #[arg(short = 'l', long)]
    pub long: bool,
}

/// Arguments for `folio get`.
#[derive(Args, Debug, Clone)]
pub struct GetCommand {
    /// Collection name
    pub collection: String,

    /// Document URI (slash-joined slugs)
    pub uri: String,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: JsonArgs,
}

/// Arguments for `folio find`.
#[derive(Args, Debug, Clone)]
pub struct FindCommand {
    /// Collection name
    pub collection: String,

    /// Only documents carrying this tag slug
    #[arg(long)]
    pub tag: Option<String>,

    /// Only documents crediting this author slug
    #[arg(long)]
    pub author: Option<String>,

    /// Case-insensitive text to find in title, description or body
    #[arg(short, long)]
    pub search: Option<String>,

    /// Publication year (requires --month)
    #[arg(long, requires = "month")]
    pub year: Option<String>,

    /// Publication month, 1-12 (requires --year)
    #[arg(long, requires = "year")]
    pub month: Option<String>,

    /// Only documents with this type label
    #[arg(long = "type")]
    pub type_name: Option<String>,

    /// Only documents with this category label
    #[arg(long)]
    pub category: Option<String>,

    /// Only documents with this slug
    #[arg(long)]
    pub slug: Option<String>,

    /// Page size
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// One-based page number [default: 1]
    #[arg(long, requires = "limit")]
    pub page: Option<usize>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: JsonArgs,
}

impl FindCommand {
    /// Builds registry criteria from the flags.
    pub fn criteria(&self) -> Criteria {
        Criteria {
            type_name: self.type_name.clone(),
            category: self.category.clone(),
            slug: self.slug.clone(),
            search: self.search.clone(),
            tag: self.tag.clone(),
            author: self.author.clone(),
            year: self.year.clone(),
            month: self.month.clone(),
            limit: self.limit,
            page: self.page,
            ..Criteria::default()
        }
    }
}

/// Arguments for `folio nav`.
#[derive(Args, Debug, Clone)]
pub struct NavCommand {
    /// Collection name
    pub collection: String,

    /// Document URI to navigate from
    pub uri: String,

    /// Only step between documents with this category label
    #[arg(long)]
    pub category: Option<String>,
}

impl NavCommand {
    /// Builds the navigation window criteria.
    pub fn criteria(&self) -> Criteria {
        Criteria {
            category: self.category.clone(),
            ..Criteria::default()
        }
    }
}

/// Arguments for the aggregate commands.
#[derive(Args, Debug, Clone)]
pub struct AggregateCommand {
    /// Collection name
    pub collection: String,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: JsonArgs,
}

/// Supported `folio` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Validate configuration and diagnose issues
    Check,

    /// Show effective configuration settings
    Config,

    /// List collections, or print a collection's tree
    Ls(LsCommand),

    /// Print one document
    Get(GetCommand),

    /// Filter documents
    #[command(after_help = "\
EXAMPLES:
  folio find blog --tag rust
  folio find blog --year 2024 --month 3
  folio find blog --search release -n 10 --page 2
  folio find academy --category lesson --json")]
    Find(FindCommand),

    /// Show the previous and next documents
    Nav(NavCommand),

    /// List tags with usage counts
    Tags(AggregateCommand),

    /// List authors with document counts
    Authors(AggregateCommand),

    /// List publication months with document counts
    Months(AggregateCommand),
}
