//! The content tree: an arena of nodes linked by parent and child ids.
//!
//! Nodes are owned by the [`ContentTree`]; links between them are
//! [`NodeId`]s. A child's parent is set exactly once through
//! [`ContentTree::attach`], which also registers the child under its slug in
//! the parent's children, so the two sides of a link can never disagree.
//!
//! Read access goes through [`NodeRef`], a copyable handle pairing a tree with
//! a node id. It derefs to [`ContentNode`] and adds the attributes that depend
//! on tree position.

use std::{
    collections::HashMap,
    fmt,
    ops::Deref,
    ptr,
};

use serde::Serialize;

use crate::{Attachment, ContentNode, Snapshot, TreeError, dates};

/// Index of a node within its [`ContentTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

/// Hyperlinks describing where a node is served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Links {
    /// Link to the node itself.
    #[serde(rename = "self")]
    pub this: Href,
    /// Link to the collection the node belongs to.
    pub collection: Href,
}

/// A single hyperlink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Href {
    /// Target path.
    pub href: String,
}

/// An arena of content nodes with a list of ordered roots.
#[derive(Debug, Default)]
pub struct ContentTree {
    /// Every node ever inserted, indexed by [`NodeId`].
    nodes: Vec<ContentNode>,
    /// Top-level nodes in insertion order.
    roots: Vec<NodeId>,
    /// Top-level nodes keyed by slug.
    root_slugs: HashMap<String, NodeId>,
    /// Base path prefixed to node URIs in links.
    url_base: String,
}

impl ContentTree {
    /// Creates an empty tree whose links start with `url_base`.
    pub fn new(url_base: impl Into<String>) -> Self {
        Self {
            url_base: url_base.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Returns the base path used for links.
    pub fn url_base(&self) -> &str {
        &self.url_base
    }

    /// Moves a node into the arena, unattached.
    pub fn insert(&mut self, node: ContentNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Adds an unattached node as the last top-level node.
    pub fn add_root(&mut self, id: NodeId) -> Result<(), TreeError> {
        let node = &self.nodes[id.0];
        let slug = node.slug().to_string();
        if node.attached {
            return Err(TreeError::AlreadyAttached { slug });
        }
        if self.root_slugs.contains_key(&slug) {
            return Err(TreeError::DuplicateSlug { slug });
        }

        self.nodes[id.0].attached = true;
        self.roots.push(id);
        self.root_slugs.insert(slug, id);
        Ok(())
    }

    /// Attaches `child` as the last child of `parent`.
    ///
    /// Fails without changing the tree if the child is already attached, if
    /// the parent already has a child with the same slug, or if the link would
    /// make a node its own ancestor.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let slug = self.nodes[child.0].slug().to_string();
        if self.nodes[child.0].attached {
            return Err(TreeError::AlreadyAttached { slug });
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(TreeError::Cycle { slug });
        }
        if self.nodes[parent.0].child_slugs.contains_key(&slug) {
            return Err(TreeError::DuplicateSlug { slug });
        }

        let child_node = &mut self.nodes[child.0];
        child_node.parent = Some(parent);
        child_node.attached = true;
        let parent_node = &mut self.nodes[parent.0];
        parent_node.children.push(child);
        parent_node.child_slugs.insert(slug, child);

        self.reset_uris(child);
        Ok(())
    }

    /// Returns true if `ancestor` is `node` or one of its ancestors.
    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes[id.0].parent;
        }
        false
    }

    /// Clears cached URIs below a node whose ancestry just changed.
    fn reset_uris(&mut self, root: NodeId) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = &mut self.nodes[id.0];
            node.uri.take();
            stack.extend(node.children.iter().copied());
        }
    }

    /// Returns a handle to a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree.
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        assert!(id.0 < self.nodes.len(), "node id {} out of range", id.0);
        NodeRef { tree: self, id }
    }

    /// Returns a handle to a node, or `None` if the id is out of range.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Returns the top-level nodes in order.
    pub fn roots(&self) -> impl ExactSizeIterator<Item = NodeRef<'_>> {
        self.roots.iter().map(|&id| NodeRef { tree: self, id })
    }

    /// Returns the top-level node with this slug.
    pub fn root(&self, slug: &str) -> Option<NodeRef<'_>> {
        self.root_slugs
            .get(slug)
            .map(|&id| NodeRef { tree: self, id })
    }

    /// Returns the number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over every node reachable from the roots, in pre-order.
    pub fn iter_preorder(&self) -> PreorderIter<'_> {
        PreorderIter {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }
}

/// A node together with the tree it lives in.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    /// The owning tree.
    tree: &'a ContentTree,
    /// The node's index.
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    /// Returns the node's arena id.
    pub fn node_id(self) -> NodeId {
        self.id
    }

    /// Returns the underlying node.
    pub fn node(self) -> &'a ContentNode {
        &self.tree.nodes[self.id.0]
    }

    /// Returns the owning tree.
    pub fn tree(self) -> &'a ContentTree {
        self.tree
    }

    /// Returns the parent node.
    pub fn parent(self) -> Option<Self> {
        self.node().parent.map(|id| self.with_id(id))
    }

    /// Returns the children in sibling order.
    pub fn children(self) -> impl ExactSizeIterator<Item = Self> + 'a {
        self.node().children.iter().map(move |&id| self.with_id(id))
    }

    /// Returns the child with the given slug.
    pub fn child(self, slug: &str) -> Option<Self> {
        self.node().child_id(slug).map(|id| self.with_id(id))
    }

    /// Returns the ancestors from the root down to the parent.
    pub fn ancestors(self) -> Vec<Self> {
        let mut ancestors = Vec::new();
        let mut current = self.parent();
        while let Some(node) = current {
            ancestors.push(node);
            current = node.parent();
        }
        ancestors.reverse();
        ancestors
    }

    /// Returns the depth of the node: 1 for roots.
    pub fn level(self) -> usize {
        let mut level = 1;
        let mut current = self.node().parent;
        while let Some(id) = current {
            level += 1;
            current = self.tree.nodes[id.0].parent;
        }
        level
    }

    /// Returns the slash-joined slugs from the root down to this node.
    pub fn uri(self) -> &'a str {
        self.node().uri.get_or_init(|| {
            let mut slugs: Vec<&str> = self.ancestors().iter().map(|n| n.node().slug()).collect();
            slugs.push(self.node().slug());
            slugs.join("/")
        })
    }

    /// Returns the type label of the node's kind.
    pub fn type_name(self) -> &'static str {
        self.kind().type_name()
    }

    /// Returns the category label, which may depend on the level.
    pub fn category(self) -> &'static str {
        self.kind().category(self.level())
    }

    /// Returns the content id: `<type>_<category>_<uri with '/' as '_'>`.
    pub fn id(self) -> String {
        format!(
            "{}_{}_{}",
            self.type_name(),
            self.category(),
            self.uri().replace('/', "_")
        )
    }

    /// Returns the reading time in minutes.
    ///
    /// Academy modules report the sum of their lessons' reading times.
    pub fn time(self) -> u32 {
        if self.category() == "module" && !self.node().is_leaf() {
            return self
                .children()
                .map(NodeRef::time)
                .fold(0, u32::saturating_add);
        }
        self.reading_time()
    }

    /// Returns the node's links under the tree's base path.
    pub fn links(self) -> Links {
        let base = self.tree.url_base();
        Links {
            this: Href {
                href: format!("{base}/{}", self.uri()),
            },
            collection: Href {
                href: base.to_string(),
            },
        }
    }

    /// Returns the node's attachments.
    pub fn attachments(self) -> Vec<Attachment<'a>> {
        self.node()
            .attachment_sources()
            .iter()
            .map(|source| Attachment::new(self, source))
            .collect()
    }

    /// Returns the attachment with this exact file name.
    pub fn attachment(self, file_name: &str) -> Option<Attachment<'a>> {
        self.node()
            .attachment_sources()
            .iter()
            .find(|source| source.file_name() == file_name)
            .map(|source| Attachment::new(self, source))
    }

    /// Returns the publication date formatted as `YYYY-MM-DD`.
    pub fn date_string(self) -> String {
        dates::format_day(&self.date())
    }

    /// Returns a serializable snapshot of the node's attributes.
    pub fn snapshot(self) -> Snapshot {
        Snapshot::of(self)
    }

    /// Iterates over this node and its descendants in pre-order.
    pub fn iter_preorder(self) -> PreorderIter<'a> {
        PreorderIter {
            tree: self.tree,
            stack: vec![self.id],
        }
    }

    /// Returns a handle to another node of the same tree.
    fn with_id(self, id: NodeId) -> Self {
        Self {
            tree: self.tree,
            id,
        }
    }
}

impl Deref for NodeRef<'_> {
    type Target = ContentNode;

    fn deref(&self) -> &ContentNode {
        &self.tree.nodes[self.id.0]
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("path", &self.path())
            .finish()
    }
}

/// Iterator for pre-order traversal of nodes.
pub struct PreorderIter<'a> {
    /// The tree being walked.
    tree: &'a ContentTree,
    /// Stack of nodes to visit (rightmost children pushed first).
    stack: Vec<NodeId>,
}

impl<'a> Iterator for PreorderIter<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.tree.nodes[id.0];
        self.stack.extend(node.children.iter().rev().copied());
        Some(NodeRef {
            tree: self.tree,
            id,
        })
    }
}
