//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::{fmt, path::Path};

use walkdir::WalkDir;

use crate::{Collection, CompiledPatterns, Config, is_skipped_dir};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No collections are defined.
    NoCollections,
    /// A collection path does not exist.
    CollectionPathMissing {
        /// Name of the collection.
        collection: String,
        /// Path that doesn't exist.
        path: String,
    },
    /// A collection path exists but is not a directory.
    CollectionPathNotDirectory {
        /// Name of the collection.
        collection: String,
        /// Path that is not a directory.
        path: String,
    },
    /// An include pattern doesn't match any files.
    IncludePatternMatchesNothing {
        /// Name of the collection.
        collection: String,
        /// Pattern that matched nothing.
        pattern: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCollections => write!(f, "no collections are defined in configuration"),
            Self::CollectionPathMissing { collection, path } => {
                write!(f, "collection '{collection}' path does not exist: {path}")
            }
            Self::CollectionPathNotDirectory { collection, path } => {
                write!(f, "collection '{collection}' path is not a directory: {path}")
            }
            Self::IncludePatternMatchesNothing {
                collection,
                pattern,
            } => write!(
                f,
                "include pattern '{pattern}' for collection '{collection}' matches no files"
            ),
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    if config.collections.is_empty() {
        return vec![ConfigWarning::NoCollections];
    }

    config.collections.iter().flat_map(validate_collection).collect()
}

/// Validates a single collection's path and include patterns.
fn validate_collection(collection: &Collection) -> Vec<ConfigWarning> {
    let path = collection.path.display().to_string();

    if !collection.path.exists() {
        return vec![ConfigWarning::CollectionPathMissing {
            collection: collection.name.clone(),
            path,
        }];
    }

    if !collection.path.is_dir() {
        return vec![ConfigWarning::CollectionPathNotDirectory {
            collection: collection.name.clone(),
            path,
        }];
    }

    collection
        .include
        .iter()
        .filter(|pattern| !pattern_matches_any_file(&collection.path, pattern, &collection.exclude))
        .map(|pattern| ConfigWarning::IncludePatternMatchesNothing {
            collection: collection.name.clone(),
            pattern: pattern.clone(),
        })
        .collect()
}

/// Checks if a pattern selects any file the registry would scan.
///
/// Walks the same way content discovery does: hidden and attachment
/// directories are skipped and the collection's exclude patterns apply.
fn pattern_matches_any_file(root: &Path, pattern: &str, exclude: &[String]) -> bool {
    // Invalid patterns surface as errors when the registry compiles them.
    let Ok(patterns) = CompiledPatterns::from_patterns(&[pattern.to_string()], exclude) else {
        return false;
    };

    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e.file_name()))
        .flatten()
        .filter(|e| e.file_type().is_file())
        .any(|e| {
            e.path()
                .strip_prefix(root)
                .is_ok_and(|relative| patterns.matches(relative))
        })
}
