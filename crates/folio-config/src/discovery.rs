//! Configuration file discovery.
//!
//! Finds the nearest `folio.toml` by walking up the directory tree from a starting point.

use std::path::{Path, PathBuf};

/// The configuration filename.
pub const CONFIG_FILENAME: &str = "folio.toml";

/// Finds the configuration file closest to `cwd`.
///
/// Checks `cwd` itself first, then each ancestor up to the filesystem root.
/// Directories named `folio.toml` are skipped. Returns `None` if no file is found.
pub fn find_config_file(cwd: &Path) -> Option<PathBuf> {
    cwd.ancestors()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|candidate| candidate.is_file())
}
