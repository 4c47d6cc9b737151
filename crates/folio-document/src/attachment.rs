//! Files attached to a content node.

use std::path::Path;

use serde::Serialize;

use crate::{NodeRef, Source, media};

/// A file from a node's `_attachments` directory, with a link back to the node.
#[derive(Debug, Clone, Copy)]
pub struct Attachment<'a> {
    /// The node owning the attachment.
    owner: NodeRef<'a>,
    /// The attached file.
    source: &'a Source,
}

impl<'a> Attachment<'a> {
    /// Pairs an attachment file with its owner.
    pub fn new(owner: NodeRef<'a>, source: &'a Source) -> Self {
        Self { owner, source }
    }

    /// Returns the node the file is attached to.
    pub fn owner(&self) -> NodeRef<'a> {
        self.owner
    }

    /// Returns the attached file.
    pub fn source(&self) -> &'a Source {
        self.source
    }

    /// Returns the file name including extension.
    pub fn file_name(&self) -> String {
        self.source.file_name()
    }

    /// Returns the file path.
    pub fn path(&self) -> &'a Path {
        self.source.path()
    }

    /// Returns the file size in bytes.
    pub fn size(&self) -> u64 {
        self.source.size()
    }

    /// Returns the MIME type inferred from the extension.
    pub fn content_type(&self) -> &'static str {
        media::content_type(self.source.extension())
    }

    /// Returns a serializable description of the attachment.
    pub fn info(&self) -> AttachmentInfo {
        AttachmentInfo {
            name: self.file_name(),
            size: self.size(),
            content_type: self.content_type().to_string(),
        }
    }
}

/// Serializable attachment description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentInfo {
    /// File name including extension.
    pub name: String,
    /// File size in bytes.
    pub size: u64,
    /// MIME type.
    pub content_type: String,
}
