//! Include/exclude pattern compilation and matching.
//!
//! Compiles a collection's glob patterns into matchers deciding which files
//! under the collection root become content nodes.

use std::{ffi::OsStr, path::Path};

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::{Collection, ConfigError};

/// Compiled glob patterns for one collection.
#[derive(Debug, Clone)]
pub struct CompiledPatterns {
    /// Compiled include patterns.
    include: GlobSet,
    /// Compiled exclude patterns.
    exclude: GlobSet,
}

impl CompiledPatterns {
    /// Compiles a collection's include and exclude patterns.
    pub fn compile(collection: &Collection) -> Result<Self, ConfigError> {
        Self::from_patterns(&collection.include, &collection.exclude)
    }

    /// Compiles raw include and exclude pattern lists.
    pub fn from_patterns(include: &[String], exclude: &[String]) -> Result<Self, ConfigError> {
        Ok(Self {
            include: build_set(include, "include")?,
            exclude: build_set(exclude, "exclude")?,
        })
    }

    /// Checks if a path is selected by these patterns.
    ///
    /// A file matches if it matches at least one include pattern
    /// and does not match any exclude pattern. The path should be relative
    /// to the collection root.
    pub fn matches(&self, path: &Path) -> bool {
        self.include.is_match(path) && !self.exclude.is_match(path)
    }
}

/// Name of the per-document attachments directory.
const ATTACHMENTS_DIR: &str = "_attachments";

/// Checks if a directory is left out of content scans.
///
/// Hidden directories and attachment directories never hold content files.
pub fn is_skipped_dir(name: &OsStr) -> bool {
    name.to_str()
        .is_some_and(|s| s.starts_with('.') || s == ATTACHMENTS_DIR)
}

/// Builds one glob set from a pattern list.
fn build_set(patterns: &[String], label: &str) -> Result<GlobSet, ConfigError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(compile_glob(pattern)?);
    }
    builder.build().map_err(|e| ConfigError::InvalidPattern {
        pattern: format!("<combined {label} patterns>"),
        source: e,
    })
}

/// Compiles a single glob pattern.
fn compile_glob(pattern: &str) -> Result<Glob, ConfigError> {
    Glob::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_INCLUDE;

    fn patterns(include: &[&str], exclude: &[&str]) -> CompiledPatterns {
        let include: Vec<String> = include.iter().map(|s| s.to_string()).collect();
        let exclude: Vec<String> = exclude.iter().map(|s| s.to_string()).collect();
        CompiledPatterns::from_patterns(&include, &exclude).unwrap()
    }

    #[test]
    fn test_default_include_matches_markdown() {
        let p = patterns(&[DEFAULT_INCLUDE], &[]);
        assert!(p.matches(Path::new("post.md")));
        assert!(p.matches(Path::new("guide/intro.markdown")));
        assert!(!p.matches(Path::new("image.png")));
        assert!(!p.matches(Path::new("notes.txt")));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let p = patterns(&["**/*.md"], &["drafts/**"]);
        assert!(p.matches(Path::new("a/post.md")));
        assert!(!p.matches(Path::new("drafts/wip.md")));
    }

    #[test]
    fn test_multiple_include_patterns() {
        let p = patterns(&["*.md", "*.txt"], &[]);
        assert!(p.matches(Path::new("a.md")));
        assert!(p.matches(Path::new("b.txt")));
        assert!(!p.matches(Path::new("c.rs")));
    }

    #[test]
    fn test_empty_include_matches_nothing() {
        let p = patterns(&[], &[]);
        assert!(!p.matches(Path::new("a.md")));
    }

    #[test]
    fn test_skipped_dirs() {
        assert!(is_skipped_dir(OsStr::new(".git")));
        assert!(is_skipped_dir(OsStr::new("_attachments")));
        assert!(!is_skipped_dir(OsStr::new("guide")));
        assert!(!is_skipped_dir(OsStr::new("attachments")));
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        let err = CompiledPatterns::from_patterns(&["[".to_string()], &[]).unwrap_err();
        match err {
            ConfigError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "["),
            other => panic!("unexpected error: {other}"),
        }
    }
}
