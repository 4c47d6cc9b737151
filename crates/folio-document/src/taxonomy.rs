//! Tags and authors attached to documents.

use serde::Serialize;
use serde_yaml::Value;

use crate::{frontmatter::scalar_to_string, slug::slugify};

/// Name used when a document declares no author.
pub const ANONYMOUS: &str = "Anonymous";

/// A tag attached to one or more documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    /// Display name as written in metadata.
    pub name: String,
    /// URL-safe identifier derived from the name.
    pub slug: String,
    /// Number of documents carrying the tag (1 on a single document).
    pub count: usize,
}

impl Tag {
    /// Creates a tag with a slug derived from its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = slugify(&name);
        Self {
            name,
            slug,
            count: 1,
        }
    }
}

/// A document author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    /// Display name.
    pub name: String,
    /// URL-safe identifier, explicit or derived from the name.
    pub slug: String,
    /// Number of documents by this author (1 on a single document).
    pub count: usize,
}

impl Author {
    /// Creates an author, deriving the slug from the name when not given.
    pub fn new(name: impl Into<String>, slug: Option<String>) -> Self {
        let name = name.into();
        let slug = slug
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| slugify(&name));
        Self {
            name,
            slug,
            count: 1,
        }
    }

    /// The placeholder author for documents without one.
    pub fn anonymous() -> Self {
        Self::new(ANONYMOUS, None)
    }

    /// Reads one author entry.
    ///
    /// Accepts a plain name, a `{name, slug}` mapping, or a `[name, slug]` list.
    pub fn from_value(value: &Value) -> Option<Self> {
        let (name, slug) = match value {
            Value::Sequence(items) => (
                items.first().and_then(scalar_to_string)?,
                items.get(1).and_then(scalar_to_string),
            ),
            Value::Mapping(map) => (
                map.get("name").and_then(scalar_to_string)?,
                map.get("slug").and_then(scalar_to_string),
            ),
            other => (scalar_to_string(other)?, None),
        };
        let name = name.trim();
        (!name.is_empty()).then(|| Self::new(name, slug))
    }

    /// Reads an author field, which may hold one entry or a list of entries.
    ///
    /// Under a singular key (`author`) a two-item scalar list is read as
    /// `[name, slug]`; otherwise every list item is its own entry.
    pub fn list_from_value(value: &Value, singular: bool) -> Vec<Self> {
        match value {
            Value::Sequence(items) if singular && is_name_slug_pair(items) => {
                Self::from_value(value).into_iter().collect()
            }
            Value::Sequence(items) => items.iter().filter_map(Self::from_value).collect(),
            other => Self::from_value(other).into_iter().collect(),
        }
    }
}

/// Returns true for a two-element list of scalars.
fn is_name_slug_pair(items: &[Value]) -> bool {
    items.len() == 2 && items.iter().all(|v| scalar_to_string(v).is_some())
}
