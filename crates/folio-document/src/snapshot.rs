//! Serializable snapshots of content nodes.

use serde::Serialize;

use crate::{
    AttachmentInfo, Links, Metadata, NodeRef,
    dates::format_day,
    taxonomy::{Author, Tag},
};

/// A self-contained copy of a node's attributes, ready for rendering or JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Content id: `<type>_<category>_<uri>`.
    pub id: String,
    /// Hex SHA-256 of the file.
    pub checksum: String,
    /// Type label.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Category label.
    pub category: String,
    /// Slash-joined slugs from the root.
    pub uri: String,
    /// Slug among siblings.
    pub slug: String,
    /// Depth in the tree, 1 for roots.
    pub level: usize,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Keywords.
    pub keywords: Vec<String>,
    /// Body preview.
    pub preview: String,
    /// Image URL.
    pub image: Option<String>,
    /// Embeddable video URL.
    pub video: Option<String>,
    /// Tags.
    pub tags: Vec<Tag>,
    /// Authors.
    pub authors: Vec<Author>,
    /// Reading time in minutes.
    pub time: u32,
    /// Draft flag.
    pub draft: bool,
    /// Unlisted flag.
    pub unlisted: bool,
    /// Publication date, `YYYY-MM-DD`.
    pub date: String,
    /// Last update date, `YYYY-MM-DD`.
    pub last_update: String,
    /// Deprecation date, `YYYY-MM-DD`.
    pub deprecated: Option<String>,
    /// Ordering key among siblings.
    pub position: i64,
    /// Attached files.
    pub attachments: Vec<AttachmentInfo>,
    /// Header metadata.
    pub metadata: Metadata,
    /// Body with the header removed.
    pub data: String,
    /// Links to the node and its collection.
    #[serde(rename = "_links")]
    pub links: Links,
}

impl Snapshot {
    /// Captures every attribute of a node.
    pub fn of(node: NodeRef<'_>) -> Self {
        Self {
            id: node.id(),
            checksum: node.checksum().to_string(),
            type_name: node.type_name().to_string(),
            category: node.category().to_string(),
            uri: node.uri().to_string(),
            slug: node.slug().to_string(),
            level: node.level(),
            title: node.title().to_string(),
            description: node.description().to_string(),
            keywords: node.keywords().to_vec(),
            preview: node.preview().to_string(),
            image: node.image(),
            video: node.video().map(String::from),
            tags: node.tags().to_vec(),
            authors: node.authors().to_vec(),
            time: node.time(),
            draft: node.draft(),
            unlisted: node.unlisted(),
            date: format_day(&node.date()),
            last_update: format_day(&node.last_update()),
            deprecated: node.deprecated().map(|d| format_day(&d)),
            position: node.position(),
            attachments: node.attachments().iter().map(|a| a.info()).collect(),
            metadata: node.metadata().clone(),
            data: node.data().to_string(),
            links: node.links(),
        }
    }
}
