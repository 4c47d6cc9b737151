//! Lazy access to one file on disk.
//!
//! A [`Source`] is validated when it is opened: the path must name an existing,
//! readable regular file. File contents are loaded on first use and cached for
//! the lifetime of the value, so a document is read from disk at most once no
//! matter how many of its attributes are derived.

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
    sync::OnceLock,
    time::SystemTime,
};

use sha2::{Digest, Sha256};
use tracing::warn;

use crate::DocumentError;

/// A readable file with memoized content and checksum.
#[derive(Debug)]
pub struct Source {
    /// Absolute or caller-supplied path to the file.
    path: PathBuf,
    /// File stem (name without the final extension).
    name: String,
    /// Final extension without the leading dot, or empty.
    extension: String,
    /// File size in bytes at open time.
    size: u64,
    /// Creation time, falling back to modification time where unsupported.
    created: SystemTime,
    /// Last modification time.
    modified: SystemTime,
    /// Full file content, loaded on first access.
    raw: OnceLock<Vec<u8>>,
    /// Hex-encoded SHA-256 of the content, computed on first access.
    checksum: OnceLock<String>,
}

impl Source {
    /// Opens a source, failing if the path is not a readable regular file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|source| DocumentError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(DocumentError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        // Opening proves readability without loading the content.
        File::open(path).map_err(|source| DocumentError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        let created = metadata.created().unwrap_or(modified);

        Ok(Self {
            path: path.to_path_buf(),
            name: path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            extension: path
                .extension()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            size: metadata.len(),
            created,
            modified,
            raw: OnceLock::new(),
            checksum: OnceLock::new(),
        })
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the directory containing the file.
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Returns the file stem.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the file name including its extension.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Returns the extension without the leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Returns the size recorded when the source was opened.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns the filesystem creation time.
    pub fn created(&self) -> SystemTime {
        self.created
    }

    /// Returns the filesystem modification time.
    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    /// Returns the full file content, reading it on first call.
    ///
    /// A read failure after a successful [`Source::open`] is logged and
    /// cached as empty content.
    pub fn raw(&self) -> &[u8] {
        self.raw.get_or_init(|| match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read content file");
                Vec::new()
            }
        })
    }

    /// Returns the content as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(self.raw()).into_owned()
    }

    /// Returns the hex SHA-256 checksum of the content.
    pub fn checksum(&self) -> &str {
        self.checksum
            .get_or_init(|| format!("{:x}", Sha256::digest(self.raw())))
    }

    /// Returns true once the content has been loaded into memory.
    pub fn is_loaded(&self) -> bool {
        self.raw.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn open_rejects_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Source::open(dir.path().join("nope.md")).unwrap_err();
        assert!(matches!(err, DocumentError::ReadFile { .. }));
    }

    #[test]
    fn open_rejects_directory() {
        let dir = TempDir::new().unwrap();
        let err = Source::open(dir.path()).unwrap_err();
        assert!(matches!(err, DocumentError::NotAFile { .. }));
    }

    #[test]
    fn exposes_path_components() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("2024-01-05-hello.md");
        fs::write(&path, "hi").unwrap();

        let source = Source::open(&path).unwrap();
        assert_eq!(source.name(), "2024-01-05-hello");
        assert_eq!(source.extension(), "md");
        assert_eq!(source.file_name(), "2024-01-05-hello.md");
        assert_eq!(source.directory(), dir.path());
        assert_eq!(source.size(), 2);
    }

    #[test]
    fn content_is_loaded_lazily_and_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.md");
        fs::write(&path, "first").unwrap();

        let source = Source::open(&path).unwrap();
        assert!(!source.is_loaded());
        assert_eq!(source.raw(), b"first");
        assert!(source.is_loaded());

        // Later changes on disk are not observed.
        fs::write(&path, "second").unwrap();
        assert_eq!(source.raw(), b"first");
        assert_eq!(source.text(), "first");
    }

    #[test]
    fn checksum_is_sha256_of_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.md");
        fs::write(&path, "abc").unwrap();

        let source = Source::open(&path).unwrap();
        assert_eq!(
            source.checksum(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert!(source.is_loaded());
    }
}
