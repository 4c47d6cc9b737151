//! Filter criteria for registry queries.

use chrono::Datelike;
use folio_document::NodeRef;
use serde::Deserialize;

/// A conjunction of optional filters plus pagination.
///
/// Every supplied criterion must match. Values that cannot be interpreted,
/// such as a non-numeric year, match nothing instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Criteria {
    /// Exact type label.
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    /// Exact category label.
    pub category: Option<String>,
    /// Exact content id.
    pub id: Option<String>,
    /// Exact URI.
    pub uri: Option<String>,
    /// Exact slug.
    pub slug: Option<String>,
    /// Case-insensitive substring of title, description or body.
    pub search: Option<String>,
    /// Tag slug the document must carry.
    pub tag: Option<String>,
    /// Author slug the document must credit.
    pub author: Option<String>,
    /// Publication year; applied together with `month`.
    pub year: Option<String>,
    /// Publication month, 1-12; applied together with `year`.
    pub month: Option<String>,
    /// Page size; no pagination when unset.
    pub limit: Option<usize>,
    /// One-based page number, default 1.
    pub page: Option<usize>,
}

impl Criteria {
    /// Creates criteria matching every visible, listed document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to a type label.
    pub fn type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Restricts to a category label.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restricts to one content id; unlisted documents become eligible.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Restricts to one URI; unlisted documents become eligible.
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Restricts to a slug.
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Restricts to documents containing a search string.
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Restricts to documents carrying a tag slug.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Restricts to documents crediting an author slug.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Restricts to documents published in a calendar month.
    pub fn published_in(mut self, year: impl Into<String>, month: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self.month = Some(month.into());
        self
    }

    /// Returns one page of `limit` results.
    pub fn paginate(mut self, limit: usize, page: usize) -> Self {
        self.limit = Some(limit);
        self.page = Some(page);
        self
    }

    /// Returns a copy without pagination.
    pub fn without_limit(&self) -> Self {
        Self {
            limit: None,
            page: None,
            ..self.clone()
        }
    }

    /// Checks every criterion against a node.
    pub fn matches(&self, node: NodeRef<'_>, include_drafts: bool) -> bool {
        if !node.allowed(include_drafts) {
            return false;
        }
        if given(&self.id).is_none() && given(&self.uri).is_none() && node.unlisted() {
            return false;
        }

        given(&self.type_name).is_none_or(|t| node.type_name() == t)
            && given(&self.category).is_none_or(|c| node.category() == c)
            && given(&self.id).is_none_or(|id| node.id() == id)
            && given(&self.uri).is_none_or(|uri| node.uri() == uri)
            && given(&self.slug).is_none_or(|slug| node.slug() == slug)
            && given(&self.search).is_none_or(|s| contains_text(node, s))
            && given(&self.tag).is_none_or(|t| node.has_tag(t))
            && given(&self.author).is_none_or(|a| node.has_author(a))
            && self.matches_month(node)
    }

    /// Checks the year and month criteria; ignored unless both are set.
    fn matches_month(&self, node: NodeRef<'_>) -> bool {
        let (Some(year), Some(month)) = (given(&self.year), given(&self.month)) else {
            return true;
        };
        let (Ok(year), Ok(month)) = (year.trim().parse::<i32>(), month.trim().parse::<u32>())
        else {
            return false;
        };
        let date = node.date();
        date.year() == year && date.month() == month
    }

    /// Slices a full match list down to the requested page.
    pub fn page_of<T>(&self, matched: Vec<T>) -> Vec<T> {
        let Some(limit) = self.limit else {
            return matched;
        };
        let page = self.page.unwrap_or(1).max(1);
        let offset = (page - 1).saturating_mul(limit);
        matched.into_iter().skip(offset).take(limit).collect()
    }
}

/// Returns a criterion's value, treating an empty string as unset.
fn given(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Case-insensitive search over title, description and body.
fn contains_text(node: NodeRef<'_>, search: &str) -> bool {
    let needle = search.to_lowercase();
    [node.title(), node.description(), node.data()]
        .iter()
        .any(|text| text.to_lowercase().contains(&needle))
}
