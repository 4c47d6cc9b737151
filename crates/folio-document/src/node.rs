//! Content nodes: one document with lazily derived attributes.
//!
//! A [`ContentNode`] owns a [`Source`] and derives every attribute from the
//! file bytes and its front matter on first request. Each attribute has its
//! own [`OnceLock`] cell, so derivation happens at most once per node and
//! concurrent first readers converge on the same value.
//!
//! Attributes that depend on the node's position in a tree (URI, level,
//! category, links) live on [`NodeRef`](crate::NodeRef).

use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path,
    sync::OnceLock,
};

use chrono::{DateTime, FixedOffset};
use serde_yaml::Mapping;
use tracing::{debug_span, warn};

use crate::{
    ContentKind, DocumentError, NodeId, Source,
    dates,
    excerpt::{self, DEFAULT_PREVIEW_LENGTH},
    frontmatter::{Frontmatter, Metadata},
    media,
    slug::slugify,
    taxonomy::{Author, Tag},
};

/// Name of the directory, next to a node's children, holding its attachments.
pub const ATTACHMENTS_DIR: &str = "_attachments";

/// Allowed range for table-of-contents heading levels.
const TOC_LEVELS: (u8, u8) = (2, 6);

/// One document in a content collection.
#[derive(Debug)]
pub struct ContentNode {
    /// The backing file.
    source: Source,
    /// Kind of the collection the node belongs to.
    kind: ContentKind,
    /// Maximum length of the memoized preview.
    preview_length: usize,

    /// Parent node, set once when attached.
    pub(crate) parent: Option<NodeId>,
    /// Children in attachment order.
    pub(crate) children: Vec<NodeId>,
    /// Children keyed by slug.
    pub(crate) child_slugs: HashMap<String, NodeId>,
    /// Whether the node has been attached to a parent or added as a root.
    pub(crate) attached: bool,
    /// Slash-joined slugs from the root, computed on first request.
    pub(crate) uri: OnceLock<String>,

    /// Parsed header and body.
    frontmatter: OnceLock<Frontmatter>,
    /// Memoized slug.
    slug: OnceLock<String>,
    /// Memoized title.
    title: OnceLock<String>,
    /// Memoized description.
    description: OnceLock<String>,
    /// Memoized preview at the configured length.
    preview: OnceLock<String>,
    /// Memoized keywords.
    keywords: OnceLock<Vec<String>>,
    /// Memoized embeddable video URL.
    video: OnceLock<Option<String>>,
    /// Memoized tags, unique by slug.
    tags: OnceLock<Vec<Tag>>,
    /// Memoized authors, never empty.
    authors: OnceLock<Vec<Author>>,
    /// Memoized publication date.
    date: OnceLock<DateTime<FixedOffset>>,
    /// Memoized last update time.
    last_update: OnceLock<DateTime<FixedOffset>>,
    /// Memoized deprecation date.
    deprecated: OnceLock<Option<DateTime<FixedOffset>>>,
    /// Memoized ordering key.
    position: OnceLock<i64>,
    /// Memoized reading time of this document alone.
    reading_time: OnceLock<u32>,
    /// Memoized attachment files.
    attachments: OnceLock<Vec<Source>>,
}

impl ContentNode {
    /// Opens the file at `path` as a node of the given kind.
    pub fn open(path: impl AsRef<Path>, kind: ContentKind) -> Result<Self, DocumentError> {
        Ok(Self::from_source(Source::open(path)?, kind))
    }

    /// Wraps an already opened source.
    pub fn from_source(source: Source, kind: ContentKind) -> Self {
        Self {
            source,
            kind,
            preview_length: DEFAULT_PREVIEW_LENGTH,
            parent: None,
            children: Vec::new(),
            child_slugs: HashMap::new(),
            attached: false,
            uri: OnceLock::new(),
            frontmatter: OnceLock::new(),
            slug: OnceLock::new(),
            title: OnceLock::new(),
            description: OnceLock::new(),
            preview: OnceLock::new(),
            keywords: OnceLock::new(),
            video: OnceLock::new(),
            tags: OnceLock::new(),
            authors: OnceLock::new(),
            date: OnceLock::new(),
            last_update: OnceLock::new(),
            deprecated: OnceLock::new(),
            position: OnceLock::new(),
            reading_time: OnceLock::new(),
            attachments: OnceLock::new(),
        }
    }

    /// Sets the length used for [`preview`](Self::preview) and the description fallback.
    pub fn with_preview_length(mut self, preview_length: usize) -> Self {
        self.preview_length = preview_length;
        self
    }

    /// Returns the backing file.
    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Returns the content kind.
    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        self.source.path()
    }

    /// Returns the directory containing the file.
    pub fn directory(&self) -> &Path {
        self.source.directory()
    }

    /// Returns the file stem.
    pub fn name(&self) -> &str {
        self.source.name()
    }

    /// Returns the file extension.
    pub fn extension(&self) -> &str {
        self.source.extension()
    }

    /// Returns the hex SHA-256 checksum of the file.
    pub fn checksum(&self) -> &str {
        self.source.checksum()
    }

    /// Returns the raw file bytes.
    pub fn raw(&self) -> &[u8] {
        self.source.raw()
    }

    /// Parses the header once.
    fn frontmatter(&self) -> &Frontmatter {
        self.frontmatter.get_or_init(|| {
            let _span = debug_span!("document", path = %self.path().display()).entered();
            Frontmatter::parse(&self.source.text())
        })
    }

    /// Returns the header metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.frontmatter().metadata
    }

    /// Returns the body with the header removed, trimmed.
    pub fn data(&self) -> &str {
        &self.frontmatter().body
    }

    /// Returns a non-empty, trimmed metadata string.
    fn meta_string(&self, key: &str) -> Option<String> {
        self.metadata()
            .string(key)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Returns the first date-valued metadata key that parses.
    fn meta_date(&self, keys: &[&str]) -> Option<DateTime<FixedOffset>> {
        keys.iter()
            .filter_map(|key| self.metadata().get(key))
            .find_map(dates::parse_value)
    }

    /// Returns the slug: the `slug` metadata value, else derived from the name.
    pub fn slug(&self) -> &str {
        self.slug.get_or_init(|| {
            self.meta_string("slug")
                .or_else(|| Some(slugify(self.name())).filter(|s| !s.is_empty()))
                .unwrap_or_else(|| self.name().to_string())
        })
    }

    /// Returns the title: the `title` metadata value, else the file name.
    pub fn title(&self) -> &str {
        self.title
            .get_or_init(|| self.meta_string("title").unwrap_or_else(|| self.name().to_string()))
    }

    /// Returns the `summary` metadata value.
    pub fn summary(&self) -> Option<String> {
        self.meta_string("summary")
    }

    /// Returns the description: metadata `description`, else `summary`, else the preview.
    pub fn description(&self) -> &str {
        self.description.get_or_init(|| {
            self.meta_string("description")
                .or_else(|| self.summary())
                .unwrap_or_else(|| self.preview().to_string())
        })
    }

    /// Returns the preview of the body at the configured length.
    pub fn preview(&self) -> &str {
        self.preview
            .get_or_init(|| excerpt::preview(self.data(), self.preview_length))
    }

    /// Returns a preview of the body at an arbitrary length, without caching.
    pub fn preview_with(&self, max_length: usize) -> String {
        if max_length == self.preview_length {
            return self.preview().to_string();
        }
        excerpt::preview(self.data(), max_length)
    }

    /// Returns the `keywords` metadata list.
    pub fn keywords(&self) -> &[String] {
        self.keywords
            .get_or_init(|| self.metadata().strings("keywords").unwrap_or_default())
    }

    /// Returns the `image` metadata value.
    pub fn image(&self) -> Option<String> {
        self.meta_string("image")
    }

    /// Returns the `video` metadata value, rewritten to an embeddable URL.
    pub fn video(&self) -> Option<&str> {
        self.video
            .get_or_init(|| self.meta_string("video").map(|url| media::embed_video_url(&url)))
            .as_deref()
    }

    /// Returns the tags, unique by slug, in metadata order.
    pub fn tags(&self) -> &[Tag] {
        self.tags.get_or_init(|| {
            let mut seen = HashSet::new();
            self.metadata()
                .strings("tags")
                .unwrap_or_default()
                .into_iter()
                .map(Tag::new)
                .filter(|tag| !tag.slug.is_empty() && seen.insert(tag.slug.clone()))
                .collect()
        })
    }

    /// Returns true if the node carries a tag with this slug.
    pub fn has_tag(&self, slug: &str) -> bool {
        self.tags().iter().any(|tag| tag.slug == slug)
    }

    /// Returns the authors, unique by slug, defaulting to a single anonymous author.
    pub fn authors(&self) -> &[Author] {
        self.authors.get_or_init(|| {
            let metadata = self.metadata();
            let mut authors = match (metadata.get("authors"), metadata.get("author")) {
                (Some(value), _) => Author::list_from_value(value, false),
                (None, Some(value)) => Author::list_from_value(value, true),
                (None, None) => Vec::new(),
            };
            let mut seen = HashSet::new();
            authors.retain(|author| seen.insert(author.slug.clone()));
            if authors.is_empty() {
                authors.push(Author::anonymous());
            }
            authors
        })
    }

    /// Returns true if one of the authors has this slug.
    pub fn has_author(&self, slug: &str) -> bool {
        self.authors().iter().any(|author| author.slug == slug)
    }

    /// Returns the publication date.
    ///
    /// Taken from metadata (`date`, `created`, `published`), else a leading
    /// `YYYY-MM-DD-` in the file name, else the file creation time.
    pub fn date(&self) -> DateTime<FixedOffset> {
        *self.date.get_or_init(|| {
            self.meta_date(&["date", "created", "published"])
                .or_else(|| dates::from_name_prefix(self.name()))
                .unwrap_or_else(|| dates::from_system(self.source.created()))
        })
    }

    /// Returns the last update time: metadata `last_update`/`modified`, else the file mtime.
    pub fn last_update(&self) -> DateTime<FixedOffset> {
        *self.last_update.get_or_init(|| {
            self.meta_date(&["last_update", "modified"])
                .unwrap_or_else(|| dates::from_system(self.source.modified()))
        })
    }

    /// Returns the `deprecated` metadata date, if any.
    pub fn deprecated(&self) -> Option<DateTime<FixedOffset>> {
        *self
            .deprecated
            .get_or_init(|| self.meta_date(&["deprecated"]))
    }

    /// Returns the ordering key among siblings (ascending).
    ///
    /// An explicit `sidebar_position` or `order` wins; otherwise the key is
    /// [`dates::MAX_EPOCH`] minus the publication timestamp, so newer
    /// documents sort first.
    pub fn position(&self) -> i64 {
        *self.position.get_or_init(|| {
            let metadata = self.metadata();
            metadata
                .integer("sidebar_position")
                .or_else(|| metadata.integer("order"))
                .unwrap_or_else(|| dates::MAX_EPOCH - self.date().timestamp())
        })
    }

    /// Returns the estimated reading time of this document in minutes.
    ///
    /// A non-negative `time` metadata value overrides the word-count estimate.
    pub fn reading_time(&self) -> u32 {
        *self.reading_time.get_or_init(|| {
            self.metadata()
                .integer("time")
                .and_then(|t| u32::try_from(t).ok())
                .unwrap_or_else(|| excerpt::reading_time(self.data()))
        })
    }

    /// Returns true if the `draft` metadata flag is set.
    pub fn draft(&self) -> bool {
        self.metadata().boolean("draft").unwrap_or(false)
    }

    /// Returns true if the `unlisted` metadata flag is set.
    pub fn unlisted(&self) -> bool {
        self.metadata().boolean("unlisted").unwrap_or(false)
    }

    /// Returns true unless the node is a draft and drafts are hidden.
    pub fn allowed(&self, include_drafts: bool) -> bool {
        include_drafts || !self.draft()
    }

    /// Label for navigation sidebars, defaulting to the title.
    pub fn sidebar_label(&self) -> String {
        self.meta_string("sidebar_label")
            .unwrap_or_else(|| self.title().to_string())
    }

    /// Label for previous/next links, defaulting to the title.
    pub fn pagination_label(&self) -> String {
        self.meta_string("pagination_label")
            .unwrap_or_else(|| self.title().to_string())
    }

    /// CSS class for the sidebar entry.
    pub fn sidebar_class_name(&self) -> Option<String> {
        self.meta_string("sidebar_class_name")
    }

    /// Free-form properties attached to the sidebar entry.
    pub fn sidebar_custom_props(&self) -> Option<&Mapping> {
        self.metadata()
            .get("sidebar_custom_props")
            .and_then(|v| v.as_mapping())
    }

    /// Whether the title heading is hidden.
    pub fn hide_title(&self) -> bool {
        self.metadata().boolean("hide_title").unwrap_or(false)
    }

    /// Whether the table of contents is hidden, defaulting per kind.
    pub fn hide_table_of_contents(&self) -> bool {
        self.metadata()
            .boolean("hide_table_of_contents")
            .unwrap_or_else(|| self.kind.hides_table_of_contents())
    }

    /// Smallest heading level shown in the table of contents.
    pub fn toc_min_heading_level(&self) -> u8 {
        self.toc_level("toc_min_heading_level", TOC_LEVELS.0)
    }

    /// Largest heading level shown in the table of contents.
    pub fn toc_max_heading_level(&self) -> u8 {
        self.toc_level("toc_max_heading_level", TOC_LEVELS.1)
    }

    /// Reads a heading level, clamped to the allowed range.
    fn toc_level(&self, key: &str, default: u8) -> u8 {
        self.metadata()
            .integer(key)
            .map_or(default, |level| {
                let clamped = level.clamp(i64::from(TOC_LEVELS.0), i64::from(TOC_LEVELS.1));
                u8::try_from(clamped).unwrap_or(default)
            })
    }

    /// Returns the files in this node's attachments directory, sorted by name.
    ///
    /// The directory is `<directory>/<name>/_attachments`. A missing directory
    /// yields no attachments; unreadable entries are skipped with a warning.
    pub fn attachment_sources(&self) -> &[Source] {
        self.attachments.get_or_init(|| {
            let dir = self.directory().join(self.name()).join(ATTACHMENTS_DIR);
            let Ok(entries) = fs::read_dir(&dir) else {
                return Vec::new();
            };
            let mut paths: Vec<_> = entries
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|path| path.is_file())
                .collect();
            paths.sort();
            paths
                .into_iter()
                .filter_map(|path| match Source::open(&path) {
                    Ok(source) => Some(source),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "skipping attachment");
                        None
                    }
                })
                .collect()
        })
    }

    /// Returns the parent's id, if attached under a parent.
    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the children's ids in sibling order.
    pub fn child_ids(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns the id of the child with the given slug.
    pub fn child_id(&self, slug: &str) -> Option<NodeId> {
        self.child_slugs.get(slug).copied()
    }

    /// Returns true if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
