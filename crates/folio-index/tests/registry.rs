//! End-to-end tests: scan a content directory and query the registry.

#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use folio_config::{CompiledPatterns, Config};
use folio_document::{ContentKind, NodeRef};
use folio_index::{Catalog, Criteria, IndexError, Registry};

/// A temporary content directory.
struct Site {
    /// Owned temporary directory.
    root: tempfile::TempDir,
}

impl Site {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    /// Writes a content file relative to the root.
    fn write(&self, rel_path: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn registry(&self, kind: ContentKind) -> Registry {
        let patterns =
            CompiledPatterns::from_patterns(&["**/*.{md,markdown}".to_string()], &[]).unwrap();
        Registry::new(kind, self.path(), patterns)
    }
}

fn uris<'a>(nodes: impl IntoIterator<Item = NodeRef<'a>>) -> Vec<String> {
    nodes.into_iter().map(|n| n.uri().to_string()).collect()
}

#[test]
fn uri_is_ancestor_slugs_joined() {
    let site = Site::new();
    site.write("book.md", "Book");
    site.write("book/chapter.md", "Chapter");
    site.write("book/chapter/section.md", "---\nslug: intro\n---\nSection");

    let registry = site.registry(ContentKind::Docs);
    for node in registry.iter() {
        let mut slugs: Vec<&str> = node
            .ancestors()
            .into_iter()
            .map(|a| a.node().slug())
            .collect();
        slugs.push(node.node().slug());
        assert_eq!(node.uri(), slugs.join("/"));
    }
    assert_eq!(registry.get("book/chapter/intro").unwrap().level(), 3);
}

#[test]
fn attachment_round_trips() {
    let site = Site::new();
    site.write("guide.md", "Guide");
    site.write("guide/part1.md", "One");
    site.write("guide/part2.md", "Two");
    site.write("guide/part2/deep.md", "Deep");

    let registry = site.registry(ContentKind::Docs);
    for node in registry.iter() {
        if let Some(parent) = node.parent() {
            assert_eq!(parent.child(node.slug()), Some(node));
        }
    }
}

#[test]
fn attributes_are_memoized_and_file_read_once() {
    let site = Site::new();
    site.write(
        "post.md",
        "---\ntitle: Post\ntags: [go]\n---\nBody text for the preview.",
    );

    let registry = site.registry(ContentKind::Blog);
    let node = registry.get("post").unwrap();

    let title = node.title();
    let preview = node.preview();
    let checksum = node.checksum();
    fs::write(site.path().join("post.md"), "changed on disk").unwrap();

    assert!(std::ptr::eq(title, node.title()));
    assert!(std::ptr::eq(preview, node.preview()));
    assert_eq!(checksum, node.checksum());
    assert_eq!(node.data(), "Body text for the preview.");
    assert!(node.source().is_loaded());
}

#[test]
fn explicit_positions_sort_ascending() {
    let site = Site::new();
    site.write("five.md", "---\nsidebar_position: 5\n---\n5");
    site.write("one.md", "---\nsidebar_position: 1\n---\n1");
    site.write("three.md", "---\nsidebar_position: 3\n---\n3");

    let registry = site.registry(ContentKind::Docs);
    assert_eq!(uris(registry.all()), vec!["one", "three", "five"]);
}

#[test]
fn dated_siblings_sort_newest_first() {
    let site = Site::new();
    site.write("old.md", "---\ndate: 2024-01-01\n---\nOld");
    site.write("new.md", "---\ndate: 2024-06-01\n---\nNew");

    let registry = site.registry(ContentKind::Blog);
    assert_eq!(uris(registry.all()), vec!["new", "old"]);
}

#[test]
fn previous_and_next_follow_filtered_order() {
    let site = Site::new();
    site.write("a.md", "---\norder: 1\n---\nA");
    site.write("b.md", "---\norder: 2\n---\nB");
    site.write("c.md", "---\norder: 3\n---\nC");

    let registry = site.registry(ContentKind::Pages);
    let all = Criteria::new();

    assert_eq!(registry.previous("b", &all).unwrap().uri(), "a");
    assert_eq!(registry.next("b", &all).unwrap().uri(), "c");
    assert!(registry.previous("a", &all).is_none());
    assert!(registry.next("c", &all).is_none());
    assert!(registry.next("missing", &all).is_none());

    // Pagination does not narrow the navigation window.
    let paged = Criteria::new().paginate(1, 1);
    assert_eq!(registry.next("b", &paged).unwrap().uri(), "c");
}

#[test]
fn academy_navigation_by_category() {
    let site = Site::new();
    site.write("rust.md", "Course");
    site.write("rust/basics.md", "---\norder: 1\n---\nModule");
    site.write("rust/basics/one.md", "---\norder: 1\n---\nLesson one");
    site.write("rust/basics/two.md", "---\norder: 2\n---\nLesson two");
    site.write("rust/advanced.md", "---\norder: 2\n---\nModule");
    site.write("rust/advanced/three.md", "Lesson three");

    let registry = site.registry(ContentKind::Academy);
    let lessons = Criteria::new().category("lesson");

    assert_eq!(
        uris(registry.filter(&lessons)),
        vec!["rust/basics/one", "rust/basics/two", "rust/advanced/three"]
    );
    assert_eq!(
        registry.next("rust/basics/two", &lessons).unwrap().uri(),
        "rust/advanced/three"
    );
    assert_eq!(
        registry.next("rust/basics", &Criteria::new().category("module")).unwrap().uri(),
        "rust/advanced"
    );
}

#[test]
fn module_time_sums_lessons() {
    let site = Site::new();
    site.write("course.md", "Course");
    site.write("course/module.md", "Module");
    site.write("course/module/a.md", "---\ntime: 4\n---\nA");
    site.write("course/module/b.md", "---\ntime: 6\n---\nB");

    let registry = site.registry(ContentKind::Academy);
    assert_eq!(registry.module("course", "module").unwrap().time(), 10);
}

#[test]
fn tags_aggregate_counts_documents() {
    let site = Site::new();
    site.write("a.md", "---\ntags: [go]\n---\nA");
    site.write("b.md", "---\ntags: [go, rust]\n---\nB");

    let registry = site.registry(ContentKind::Blog);
    let go: Vec<_> = registry.tags().iter().filter(|t| t.slug == "go").collect();
    assert_eq!(go.len(), 1);
    assert_eq!(go[0].count, 2);
}

#[test]
fn months_aggregate_most_recent_first() {
    let site = Site::new();
    site.write("2024-01-10-a.md", "A");
    site.write("2024-02-10-b.md", "B");
    site.write("2024-02-20-c.md", "C");

    let registry = site.registry(ContentKind::Blog);
    let months: Vec<_> = registry
        .months()
        .iter()
        .map(|m| (m.slug.as_str(), m.count))
        .collect();
    assert_eq!(months, vec![("202402-02-2024", 2), ("202401-01-2024", 1)]);
}

#[test]
fn offset_dates_keep_authored_day() {
    let site = Site::new();
    site.write("launch.md", "---\ndate: 2024-03-01T00:30:00+02:00\n---\nLaunch");

    let registry = site.registry(ContentKind::Blog);
    let launch = registry.get("launch").unwrap();
    assert_eq!(launch.date_string(), "2024-03-01");

    let months: Vec<_> = registry.months().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(months, vec!["03/2024"]);

    let march = registry.filter(&Criteria::new().published_in("2024", "3"));
    assert_eq!(uris(march), vec!["launch"]);
}

#[test]
fn missing_root_is_empty() {
    let site = Site::new();
    let patterns = CompiledPatterns::from_patterns(&["**/*.md".to_string()], &[]).unwrap();
    let registry = Registry::new(ContentKind::Blog, site.path().join("absent"), patterns);

    assert_eq!(registry.all().len(), 0);
    assert!(registry.filter(&Criteria::new()).is_empty());
    assert!(registry.tags().is_empty());
}

#[test]
fn same_named_directory_becomes_children() {
    let site = Site::new();
    site.write("guide.md", "Guide");
    site.write("guide/part1.md", "Part one");
    site.write("orphan/part1.md", "Orphan");

    let registry = site.registry(ContentKind::Docs);
    assert_eq!(uris(registry.all()), vec!["guide"]);
    assert_eq!(uris(registry.get("guide").unwrap().children()), vec!["guide/part1"]);
    assert!(registry.get("orphan").is_err());
    assert!(registry.iter().all(|n| !n.uri().starts_with("orphan")));
}

#[test]
fn get_missing_reports_uri() {
    let site = Site::new();
    site.write("guide.md", "Guide");

    let registry = site.registry(ContentKind::Docs);
    match registry.get("missing/uri") {
        Err(IndexError::NotFound { uri }) => assert_eq!(uri, "missing/uri"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn filter_combines_criteria() {
    let site = Site::new();
    site.write(
        "2024-03-01-launch.md",
        "---\ntitle: Launch Day\ntags: [news]\nauthor: Ann\n---\nWe shipped it.",
    );
    site.write(
        "2024-03-09-patch.md",
        "---\ntitle: Patch\ntags: [news]\nauthor: Bo\n---\nA small fix.",
    );
    site.write(
        "2024-04-02-recap.md",
        "---\ntitle: Recap\ntags: [recap]\nauthor: Ann\n---\nLooking back at the launch.",
    );

    let registry = site.registry(ContentKind::Blog);

    let by_tag = registry.filter(&Criteria::new().tag("news"));
    assert_eq!(by_tag.len(), 2);

    let by_author = registry.filter(&Criteria::new().author("ann").tag("news"));
    assert_eq!(uris(by_author), vec!["2024-03-01-launch"]);

    let search = registry.filter(&Criteria::new().search("LAUNCH"));
    assert_eq!(search.len(), 2);

    let march = registry.filter(&Criteria::new().published_in("2024", "3"));
    assert_eq!(march.len(), 2);

    let bad_month = registry.filter(&Criteria::new().published_in("2024", "march"));
    assert!(bad_month.is_empty());

    let page = registry.filter(&Criteria::new().paginate(2, 2));
    assert_eq!(uris(page), vec!["2024-03-01-launch"]);
}

#[test]
fn catalog_from_config_file() {
    let site = Site::new();
    site.write("content/faq/billing.md", "---\ntitle: Billing\n---\nHow we bill.");
    site.write("content/faq/billing/refunds.md", "Refunds.");
    let config_path = site.write(
        "folio.toml",
        "[collection.faq]\npath = \"content/faq\"\nurl_base = \"/help\"\n",
    );

    let config = Config::load_file(&config_path).unwrap();
    let catalog = Catalog::from_config(&config).unwrap();
    let faq = catalog.registry("faq").unwrap();

    let refunds = faq.get("billing/refunds").unwrap();
    assert_eq!(refunds.id(), "faq_question_billing_refunds");
    assert_eq!(refunds.links().this.href, "/help/billing/refunds");
    assert_eq!(refunds.links().collection.href, "/help");
}
