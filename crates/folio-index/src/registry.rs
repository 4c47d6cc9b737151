//! Content registries.
//!
//! A [`Registry`] owns the tree of one content collection. The tree is built
//! on first access and never changes afterwards; aggregate collections are
//! memoized the same way.

use std::{
    path::{Path, PathBuf},
    sync::OnceLock,
};

use folio_config::{Collection, CompiledPatterns, Settings};
use folio_document::{
    Author, ContentKind, ContentNode, ContentTree, NodeRef, Tag, excerpt::DEFAULT_PREVIEW_LENGTH,
};
use tracing::debug;

use crate::{
    Criteria, IndexError, Month,
    aggregate::{collect_authors, collect_months, collect_tags},
    discovery::discover_files,
    hierarchy::{Hierarchy, build},
};

/// Lookup, traversal, filtering and navigation over one content collection.
#[derive(Debug)]
pub struct Registry {
    /// Collection name.
    name: String,
    /// Kind of every node in the collection.
    kind: ContentKind,
    /// Collection root directory.
    root: PathBuf,
    /// File selection patterns.
    patterns: CompiledPatterns,
    /// Base path for links.
    url_base: String,
    /// Preview length applied to every node.
    preview_length: usize,
    /// Whether draft documents are visible.
    include_drafts: bool,
    /// The tree, built on first access.
    tree: OnceLock<ContentTree>,
    /// Memoized tag aggregate.
    tags: OnceLock<Vec<Tag>>,
    /// Memoized author aggregate.
    authors: OnceLock<Vec<Author>>,
    /// Memoized month aggregate.
    months: OnceLock<Vec<Month>>,
}

impl Registry {
    /// Creates a registry over `root` that builds nodes of `kind`.
    ///
    /// Links default to the kind's base path, previews to the default length,
    /// and drafts are hidden.
    pub fn new(kind: ContentKind, root: impl Into<PathBuf>, patterns: CompiledPatterns) -> Self {
        Self {
            name: kind.name().to_string(),
            kind,
            root: root.into(),
            patterns,
            url_base: kind.default_url_base(),
            preview_length: DEFAULT_PREVIEW_LENGTH,
            include_drafts: false,
            tree: OnceLock::new(),
            tags: OnceLock::new(),
            authors: OnceLock::new(),
            months: OnceLock::new(),
        }
    }

    /// Creates a registry from a configured collection.
    pub fn from_collection(collection: &Collection, settings: &Settings) -> Result<Self, IndexError> {
        let kind: ContentKind = collection.kind.parse().map_err(|_| IndexError::UnknownKind {
            collection: collection.name.clone(),
            kind: collection.kind.clone(),
        })?;
        let patterns = collection.compile_patterns()?;

        let mut registry = Self::new(kind, &collection.path, patterns)
            .with_name(&collection.name)
            .with_preview_length(settings.preview_length)
            .with_drafts(settings.environment.includes_drafts());
        if let Some(url_base) = &collection.url_base {
            registry = registry.with_url_base(url_base);
        }
        Ok(registry)
    }

    /// Sets the collection name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the base path for links.
    pub fn with_url_base(mut self, url_base: impl Into<String>) -> Self {
        self.url_base = url_base.into();
        self
    }

    /// Sets the preview length of every node.
    pub fn with_preview_length(mut self, preview_length: usize) -> Self {
        self.preview_length = preview_length;
        self
    }

    /// Sets whether draft documents are visible.
    pub fn with_drafts(mut self, include_drafts: bool) -> Self {
        self.include_drafts = include_drafts;
        self
    }

    /// Returns the collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the content kind.
    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    /// Returns the collection root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns whether draft documents are visible.
    pub fn includes_drafts(&self) -> bool {
        self.include_drafts
    }

    /// Returns the tree, scanning the collection on first call.
    pub fn tree(&self) -> &ContentTree {
        self.tree.get_or_init(|| self.load())
    }

    /// Scans the collection root and builds the tree.
    fn load(&self) -> ContentTree {
        let files = discover_files(&self.root, &self.patterns);
        let hierarchy = Hierarchy::from_files(&files);
        let tree = build(&hierarchy, &self.url_base, |path| {
            Ok(ContentNode::open(path, self.kind)?.with_preview_length(self.preview_length))
        });
        debug!(
            collection = %self.name,
            files = files.len(),
            nodes = tree.len(),
            "built content tree"
        );
        tree
    }

    /// Returns the top-level nodes in sibling order.
    pub fn all(&self) -> impl ExactSizeIterator<Item = NodeRef<'_>> {
        self.tree().roots()
    }

    /// Finds a visible node by URI.
    ///
    /// Descends one slug segment per level. A segment that lands on a node
    /// without children ends the descent, so trailing segments are ignored.
    pub fn get(&self, uri: &str) -> Result<NodeRef<'_>, IndexError> {
        let not_found = || IndexError::NotFound {
            uri: uri.to_string(),
        };
        let mut segments = uri.trim_matches('/').split('/').peekable();

        let first = segments.next().ok_or_else(not_found)?;
        let mut node = self.tree().root(first).ok_or_else(not_found)?;
        while let Some(&segment) = segments.peek() {
            if node.is_leaf() {
                break;
            }
            node = node.child(segment).ok_or_else(not_found)?;
            segments.next();
        }

        if node.allowed(self.include_drafts) {
            Ok(node)
        } else {
            Err(not_found())
        }
    }

    /// Visits nodes in pre-order: the whole tree, or the subtree under `start`.
    pub fn walk<'a, F>(&'a self, start: Option<NodeRef<'a>>, mut callback: F)
    where
        F: FnMut(NodeRef<'a>),
    {
        match start {
            Some(node) => node.iter_preorder().for_each(&mut callback),
            None => self.tree().iter_preorder().for_each(&mut callback),
        }
    }

    /// Iterates over every node in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.tree().iter_preorder()
    }

    /// Returns the nodes matching `criteria` in pre-order, paginated if a
    /// limit is set.
    pub fn filter(&self, criteria: &Criteria) -> Vec<NodeRef<'_>> {
        let matched: Vec<_> = self
            .iter()
            .filter(|&node| criteria.matches(node, self.include_drafts))
            .collect();
        criteria.page_of(matched)
    }

    /// Returns the node before `uri` in the filtered, unpaginated sequence.
    pub fn previous(&self, uri: &str, criteria: &Criteria) -> Option<NodeRef<'_>> {
        let (items, index) = self.locate(uri, criteria)?;
        index.checked_sub(1).and_then(|i| items.get(i).copied())
    }

    /// Returns the node after `uri` in the filtered, unpaginated sequence.
    pub fn next(&self, uri: &str, criteria: &Criteria) -> Option<NodeRef<'_>> {
        let (items, index) = self.locate(uri, criteria)?;
        items.get(index + 1).copied()
    }

    /// Filters without a limit and finds the position of `uri`.
    fn locate(&self, uri: &str, criteria: &Criteria) -> Option<(Vec<NodeRef<'_>>, usize)> {
        let items = self.filter(&criteria.without_limit());
        let index = items.iter().position(|node| node.uri() == uri)?;
        Some((items, index))
    }

    /// Returns every tag in the collection with usage counts, sorted by name.
    pub fn tags(&self) -> &[Tag] {
        self.tags.get_or_init(|| collect_tags(self.iter()))
    }

    /// Returns every author in the collection with document counts, sorted
    /// by name.
    pub fn authors(&self) -> &[Author] {
        self.authors.get_or_init(|| collect_authors(self.iter()))
    }

    /// Returns publication months with counts, most recent first.
    pub fn months(&self) -> &[Month] {
        self.months.get_or_init(|| collect_months(self.iter()))
    }

    /// Finds a visible module of a course.
    pub fn module(&self, course: &str, module: &str) -> Result<NodeRef<'_>, IndexError> {
        let course_node = self.get(course)?;
        course_node
            .child(module)
            .filter(|node| node.allowed(self.include_drafts))
            .ok_or_else(|| IndexError::ModuleNotFound {
                course: course.to_string(),
                module: module.to_string(),
            })
    }

    /// Finds a visible lesson of a course module.
    pub fn lesson(
        &self,
        course: &str,
        module: &str,
        lesson: &str,
    ) -> Result<NodeRef<'_>, IndexError> {
        self.module(course, module)?
            .child(lesson)
            .filter(|node| node.allowed(self.include_drafts))
            .ok_or_else(|| IndexError::LessonNotFound {
                module: module.to_string(),
                lesson: lesson.to_string(),
            })
    }
}
