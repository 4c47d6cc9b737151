//! Error types for the folio-index crate.

use folio_config::ConfigError;
use thiserror::Error;

/// Errors raised by registries and the catalog.
#[derive(Debug, Error)]
pub enum IndexError {
    /// No visible document has this URI.
    #[error("content not found: {uri}")]
    NotFound {
        /// The requested URI.
        uri: String,
    },

    /// A course has no visible module with this slug.
    #[error("module '{module}' not found in course '{course}'")]
    ModuleNotFound {
        /// Course slug.
        course: String,
        /// Requested module slug.
        module: String,
    },

    /// A module has no visible lesson with this slug.
    #[error("lesson '{lesson}' not found in module '{module}'")]
    LessonNotFound {
        /// Module slug.
        module: String,
        /// Requested lesson slug.
        lesson: String,
    },

    /// No collection with this name is configured.
    #[error("unknown collection: {name}")]
    UnknownCollection {
        /// The requested collection name.
        name: String,
    },

    /// A collection names a content kind that does not exist.
    #[error("collection '{collection}' has unknown kind '{kind}'")]
    UnknownKind {
        /// Collection name.
        collection: String,
        /// The rejected kind name.
        kind: String,
    },

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
