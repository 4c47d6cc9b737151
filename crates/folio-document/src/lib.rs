//! Content documents for folio.
//!
//! This crate turns individual files into addressable content nodes:
//! - [`Source`] gives lazy, memoized access to one file on disk
//! - [`Frontmatter`] splits a file into YAML metadata and body text
//! - [`ContentNode`] derives slugs, titles, previews, dates, tags and authors
//! - [`ContentTree`] links nodes into a hierarchy addressed by slug URIs

#![warn(missing_docs)]

mod attachment;
pub mod dates;
mod error;
pub mod excerpt;
mod frontmatter;
mod kind;
pub mod media;
mod node;
mod slug;
mod snapshot;
mod source;
mod taxonomy;
mod tree;

pub use attachment::{Attachment, AttachmentInfo};
pub use error::{DocumentError, TreeError};
pub use frontmatter::{DELIMITER, Frontmatter, Metadata};
pub use kind::ContentKind;
pub use node::{ATTACHMENTS_DIR, ContentNode};
pub use slug::slugify;
pub use snapshot::Snapshot;
pub use source::Source;
pub use taxonomy::{ANONYMOUS, Author, Tag};
pub use tree::{ContentTree, Href, Links, NodeId, NodeRef, PreorderIter};
