//! Hierarchy construction from a flat file list.
//!
//! A file `X.md` and the files inside a sibling directory `X/` share the key
//! `X`: the file becomes a node and the directory's files become its children,
//! recursively. A group without its own file is dropped together with
//! everything beneath it.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use folio_document::{ContentNode, ContentTree, DocumentError, NodeId};
use tracing::{debug, warn};

use crate::DiscoveredFile;

/// Files grouped by stem, nested by directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    /// Groups at this level, keyed by stem.
    groups: BTreeMap<String, Group>,
}

/// One key of the hierarchy: an optional file plus nested groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    /// The file named after the key, if present.
    file: Option<PathBuf>,
    /// Groups from the same-named directory.
    children: Hierarchy,
}

impl Hierarchy {
    /// Groups discovered files by their extension-less relative path.
    ///
    /// Files must be sorted; when two files share a stem the first one wins.
    pub fn from_files(files: &[DiscoveredFile]) -> Self {
        let mut hierarchy = Self::default();
        for file in files {
            hierarchy.add(file);
        }
        hierarchy
    }

    /// Places one file in the nested structure.
    fn add(&mut self, file: &DiscoveredFile) {
        let mut keys: Vec<String> = file
            .rel_path
            .parent()
            .into_iter()
            .flat_map(Path::components)
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let Some(stem) = file.rel_path.file_stem() else {
            return;
        };
        keys.push(stem.to_string_lossy().into_owned());
        let Some((last, dirs)) = keys.split_last() else {
            return;
        };

        let mut level = self;
        for key in dirs {
            level = &mut level.groups.entry(key.clone()).or_default().children;
        }
        let group = level.groups.entry(last.clone()).or_default();
        match &group.file {
            Some(existing) => warn!(
                kept = %existing.display(),
                skipped = %file.abs_path.display(),
                "duplicate content file stem"
            ),
            None => group.file = Some(file.abs_path.clone()),
        }
    }

    /// Returns true if no file was grouped.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterates over the groups at this level in key order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &Group)> {
        self.groups.iter().map(|(k, g)| (k.as_str(), g))
    }
}

impl Group {
    /// Returns the group's own file.
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Returns the nested groups.
    pub fn children(&self) -> &Hierarchy {
        &self.children
    }
}

/// Builds a content tree from a hierarchy.
///
/// `factory` turns a file path into a node. Files the factory rejects are
/// skipped with a warning, as are nodes whose slug collides with a sibling.
/// Each level is ordered by ascending position, ties broken by file path.
pub fn build<F>(hierarchy: &Hierarchy, url_base: &str, factory: F) -> ContentTree
where
    F: Fn(&Path) -> Result<ContentNode, DocumentError>,
{
    let mut tree = ContentTree::new(url_base);
    let roots = build_level(&mut tree, hierarchy, &factory);
    for id in roots {
        if let Err(e) = tree.add_root(id) {
            warn!(error = %e, path = %tree.node(id).path().display(), "skipping document");
        }
    }
    tree
}

/// Builds one level, attaching each node's children, and returns the level's
/// node ids in sibling order.
fn build_level<F>(tree: &mut ContentTree, level: &Hierarchy, factory: &F) -> Vec<NodeId>
where
    F: Fn(&Path) -> Result<ContentNode, DocumentError>,
{
    let mut ids = Vec::new();

    for (key, group) in level.groups() {
        let Some(path) = group.file() else {
            debug!(key, "skipping group without its own file");
            continue;
        };

        let node = match factory(path) {
            Ok(node) => node,
            Err(e) => {
                warn!(error = %e, "skipping document");
                continue;
            }
        };
        let id = tree.insert(node);

        for child in build_level(tree, group.children(), factory) {
            if let Err(e) = tree.attach(id, child) {
                warn!(error = %e, path = %tree.node(child).path().display(), "skipping document");
            }
        }
        ids.push(id);
    }

    sort_siblings(tree, &mut ids);
    ids
}

/// Orders sibling nodes by ascending position, then by path.
fn sort_siblings(tree: &ContentTree, ids: &mut [NodeId]) {
    ids.sort_by(|&a, &b| {
        let (a, b) = (tree.node(a), tree.node(b));
        a.position()
            .cmp(&b.position())
            .then_with(|| a.path().cmp(b.path()))
    });
}

#[cfg(test)]
mod tests {
    use std::fs;

    use folio_document::ContentKind;
    use tempfile::TempDir;

    use super::*;

    fn file(root: &Path, rel: &str) -> DiscoveredFile {
        DiscoveredFile {
            abs_path: root.join(rel),
            rel_path: PathBuf::from(rel),
        }
    }

    fn write(root: &Path, rel: &str, content: &str) -> DiscoveredFile {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        file(root, rel)
    }

    fn docs_factory(path: &Path) -> Result<ContentNode, DocumentError> {
        ContentNode::open(path, ContentKind::Docs)
    }

    #[test]
    fn groups_file_with_same_named_directory() {
        let root = Path::new("/content");
        let files = vec![
            file(root, "guide/part1.md"),
            file(root, "guide/part2.md"),
            file(root, "guide.md"),
        ];

        let hierarchy = Hierarchy::from_files(&files);
        let groups: Vec<_> = hierarchy.groups().collect();
        assert_eq!(groups.len(), 1);

        let (key, guide) = groups[0];
        assert_eq!(key, "guide");
        assert_eq!(guide.file(), Some(root.join("guide.md").as_path()));
        let children: Vec<_> = guide.children().groups().map(|(k, _)| k).collect();
        assert_eq!(children, vec!["part1", "part2"]);
    }

    #[test]
    fn first_file_wins_for_duplicate_stems() {
        let root = Path::new("/content");
        let files = vec![file(root, "intro.markdown"), file(root, "intro.md")];

        let hierarchy = Hierarchy::from_files(&files);
        let (_, intro) = hierarchy.groups().next().unwrap();
        assert_eq!(intro.file(), Some(root.join("intro.markdown").as_path()));
    }

    #[test]
    fn build_drops_orphan_directories() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let files = vec![
            write(root, "guide/part1.md", "Part one"),
            write(root, "guide.md", "Guide"),
            write(root, "orphan/part1.md", "Orphan child"),
        ];

        let tree = build(&Hierarchy::from_files(&files), "/docs", docs_factory);

        let roots: Vec<_> = tree.roots().map(|n| n.slug().to_string()).collect();
        assert_eq!(roots, vec!["guide"]);
        let guide = tree.root("guide").unwrap();
        let children: Vec<_> = guide.children().map(|n| n.uri().to_string()).collect();
        assert_eq!(children, vec!["guide/part1"]);
        assert!(tree.root("orphan").is_none());
    }

    #[test]
    fn build_orders_siblings_by_position() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let files = vec![
            write(root, "a.md", "---\nsidebar_position: 5\n---\nA"),
            write(root, "b.md", "---\nsidebar_position: 1\n---\nB"),
            write(root, "c.md", "---\nsidebar_position: 3\n---\nC"),
        ];

        let tree = build(&Hierarchy::from_files(&files), "/docs", docs_factory);

        let order: Vec<_> = tree.roots().map(|n| n.position()).collect();
        assert_eq!(order, vec![1, 3, 5]);
    }

    #[test]
    fn build_breaks_position_ties_by_path() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let files = vec![
            write(root, "a.md", "---\norder: 2\n---\nA"),
            write(root, "b.md", "---\norder: 2\n---\nB"),
        ];

        let tree = build(&Hierarchy::from_files(&files), "/docs", docs_factory);

        let order: Vec<_> = tree.roots().map(|n| n.slug().to_string()).collect();
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn build_skips_duplicate_sibling_slugs() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let files = vec![
            write(root, "first.md", "---\nslug: same\norder: 1\n---\nFirst"),
            write(root, "second.md", "---\nslug: same\norder: 2\n---\nSecond"),
        ];

        let tree = build(&Hierarchy::from_files(&files), "/docs", docs_factory);

        let roots: Vec<_> = tree.roots().map(|n| n.title().to_string()).collect();
        assert_eq!(roots, vec!["first"]);
    }

    #[test]
    fn build_skips_files_the_factory_rejects() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let files = vec![write(root, "kept.md", "Kept"), file(root, "vanished.md")];

        let tree = build(&Hierarchy::from_files(&files), "/docs", docs_factory);

        let roots: Vec<_> = tree.roots().map(|n| n.slug().to_string()).collect();
        assert_eq!(roots, vec!["kept"]);
    }

    #[test]
    fn build_empty_hierarchy() {
        let tree = build(&Hierarchy::default(), "/docs", docs_factory);
        assert!(tree.is_empty());
        assert_eq!(tree.roots().len(), 0);
    }
}
