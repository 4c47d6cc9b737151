//! Error types for folio configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use toml::{de, ser};

/// Errors that can occur when loading or processing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: de::Error,
    },

    /// Failed to render settings as TOML.
    #[error("failed to serialize settings: {source}")]
    SerializeToml {
        /// Underlying TOML serialization error.
        source: ser::Error,
    },

    /// The environment override names no known environment.
    #[error("unknown environment '{value}' (expected production or development)")]
    InvalidEnvironment {
        /// The rejected value.
        value: String,
    },

    /// Failed to compile a glob pattern.
    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The invalid pattern.
        pattern: String,
        /// Underlying glob error.
        source: globset::Error,
    },

    /// Failed to determine home directory.
    #[error("could not determine home directory")]
    NoHomeDirectory,

    /// Failed to canonicalize a path.
    #[error("failed to resolve path {path}: {source}")]
    PathResolution {
        /// The path that could not be resolved.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}
