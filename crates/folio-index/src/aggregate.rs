//! Aggregate collections over a content tree.
//!
//! Tags and authors are keyed by slug and counted once per document that
//! carries them. Months bucket documents by the year and month of their
//! publication date.

use std::collections::HashMap;

use chrono::Datelike;
use folio_document::{Author, NodeRef, Tag, slugify};
use serde::Serialize;

/// A calendar month with the number of documents published in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Month {
    /// Four-digit year.
    pub year: i32,
    /// Month number, 1-12.
    pub month: u32,
    /// Display name, `MM/YYYY`.
    pub name: String,
    /// Sortable identifier, `YYYYMM-MM-YYYY`.
    pub slug: String,
    /// Number of documents published in the month.
    pub count: usize,
}

impl Month {
    /// Creates an empty bucket for a year and month.
    pub fn new(year: i32, month: u32) -> Self {
        let name = format!("{month:02}/{year:04}");
        let slug = format!("{year:04}{month:02}-{}", slugify(&name));
        Self {
            year,
            month,
            name,
            slug,
            count: 0,
        }
    }
}

/// Collects unique tags with usage counts, sorted by name.
pub fn collect_tags<'a>(nodes: impl IntoIterator<Item = NodeRef<'a>>) -> Vec<Tag> {
    let mut tags: Vec<Tag> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for node in nodes {
        for tag in node.tags() {
            match index.get(&tag.slug) {
                Some(&i) => tags[i].count += 1,
                None => {
                    index.insert(tag.slug.clone(), tags.len());
                    tags.push(Tag {
                        count: 1,
                        ..tag.clone()
                    });
                }
            }
        }
    }

    tags.sort_by(|a, b| a.name.cmp(&b.name));
    tags
}

/// Collects unique authors with document counts, sorted by name.
pub fn collect_authors<'a>(nodes: impl IntoIterator<Item = NodeRef<'a>>) -> Vec<Author> {
    let mut authors: Vec<Author> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for node in nodes {
        for author in node.authors() {
            match index.get(&author.slug) {
                Some(&i) => authors[i].count += 1,
                None => {
                    index.insert(author.slug.clone(), authors.len());
                    authors.push(Author {
                        count: 1,
                        ..author.clone()
                    });
                }
            }
        }
    }

    authors.sort_by(|a, b| a.name.cmp(&b.name));
    authors
}

/// Collects publication months with counts, most recent first.
pub fn collect_months<'a>(nodes: impl IntoIterator<Item = NodeRef<'a>>) -> Vec<Month> {
    let mut months: HashMap<(i32, u32), Month> = HashMap::new();

    for node in nodes {
        let date = node.date();
        let key = (date.year(), date.month());
        months
            .entry(key)
            .or_insert_with(|| Month::new(key.0, key.1))
            .count += 1;
    }

    let mut months: Vec<Month> = months.into_values().collect();
    months.sort_by(|a, b| b.slug.cmp(&a.slug));
    months
}
