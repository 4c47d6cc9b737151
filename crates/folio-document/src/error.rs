//! Error types for content documents and the document tree.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when opening or parsing content documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Failed to read a file.
    #[error("failed to read file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The path exists but is not a regular file.
    #[error("path {path} must be a readable regular file")]
    NotAFile {
        /// The offending path.
        path: PathBuf,
    },

    /// A content kind name is not registered.
    #[error("unknown content kind '{name}'")]
    UnknownKind {
        /// The name that failed to resolve.
        name: String,
    },

    /// The front matter block could not be parsed as YAML.
    #[error("invalid front matter: {source}")]
    Frontmatter {
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },
}

/// Errors raised while linking nodes into a content tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// The child already has a parent, or is already a root.
    #[error("node '{slug}' is already attached")]
    AlreadyAttached {
        /// Slug of the node being attached.
        slug: String,
    },

    /// A sibling with the same slug already exists at this level.
    #[error("a sibling with slug '{slug}' already exists")]
    DuplicateSlug {
        /// The conflicting slug.
        slug: String,
    },

    /// Attaching would make a node its own ancestor.
    #[error("attaching '{slug}' would create a cycle")]
    Cycle {
        /// Slug of the node being attached.
        slug: String,
    },
}
