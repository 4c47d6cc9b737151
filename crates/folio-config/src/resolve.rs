//! Path resolution for collection definitions.
//!
//! Resolves relative and tilde-prefixed collection paths to absolute paths.

use std::{
    io,
    path::{Path, PathBuf},
};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a collection path to an absolute path.
///
/// Handles three cases:
/// - Tilde paths (`~/content`) - expanded to home directory
/// - Relative paths (`./content`, `../shared`) - resolved relative to `config_dir`
/// - Absolute paths - returned as-is
///
/// Existing paths are canonicalized. A path that does not exist is returned
/// un-canonicalized; missing content directories are reported by validation,
/// not here.
pub fn resolve_collection_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(&expanded)
    };

    match absolute.canonicalize() {
        Ok(canonical) => Ok(canonical),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(absolute),
        Err(source) => Err(ConfigError::PathResolution {
            path: absolute,
            source,
        }),
    }
}

/// Expands a tilde prefix to the home directory.
///
/// - `~` alone becomes the home directory
/// - `~/foo` becomes home directory joined with `foo`
/// - Paths not starting with `~` are returned unchanged
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        let home = home_dir()?;
        return Ok(home.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}
