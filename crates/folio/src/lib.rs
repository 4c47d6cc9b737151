//! folio: file-backed content collections.
//!
//! The `folio` binary loads a `folio.toml`, builds one registry per configured
//! collection and answers lookups, filters, navigation and aggregate queries
//! over the content trees from the command line.

#![warn(missing_docs)]

pub mod cli;
