//! File discovery for content collections.
//!
//! Walks a collection root and returns the files selected by its
//! include/exclude patterns, in lexicographic path order.

use std::path::{Path, PathBuf};

use folio_config::{CompiledPatterns, is_skipped_dir};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A content file found under a collection root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Absolute path to the file.
    pub abs_path: PathBuf,
    /// Path relative to the collection root.
    pub rel_path: PathBuf,
}

/// Discovers all content files under `root`.
///
/// Returns files that:
/// - Match at least one include pattern and no exclude pattern
/// - Are regular files (symlinks are not followed)
/// - Do not live in a hidden directory or an attachments directory
///
/// A missing or unreadable root yields an empty list.
pub fn discover_files(root: &Path, patterns: &CompiledPatterns) -> Vec<DiscoveredFile> {
    if !root.is_dir() {
        debug!(root = %root.display(), "content root missing, nothing to scan");
        return Vec::new();
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e.file_name()));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let abs_path = entry.path().to_path_buf();
        let Ok(rel_path) = abs_path.strip_prefix(root).map(Path::to_path_buf) else {
            continue;
        };

        if patterns.matches(&rel_path) {
            files.push(DiscoveredFile { abs_path, rel_path });
        }
    }

    files.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    debug!(root = %root.display(), files = files.len(), "scanned content root");
    files
}
