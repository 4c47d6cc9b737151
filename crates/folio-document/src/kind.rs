//! Content kinds: the registration table mapping collection kinds to labels.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::DocumentError;

/// The kind of content a collection holds.
///
/// A kind decides the type and category labels of its nodes, the default
/// base URL for links, and some presentation defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Dated blog posts.
    Blog,
    /// Documentation pages.
    Docs,
    /// Frequently asked questions.
    Faq,
    /// Courses made of modules made of lessons.
    Academy,
    /// Standalone pages.
    Pages,
}

impl ContentKind {
    /// Every registered kind.
    pub const ALL: [Self; 5] = [Self::Blog, Self::Docs, Self::Faq, Self::Academy, Self::Pages];

    /// Configuration name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::Docs => "docs",
            Self::Faq => "faq",
            Self::Academy => "academy",
            Self::Pages => "pages",
        }
    }

    /// Type label reported by nodes of this kind.
    pub fn type_name(self) -> &'static str {
        self.name()
    }

    /// Category label for a node at the given tree level.
    pub fn category(self, level: usize) -> &'static str {
        match self {
            Self::Blog => "post",
            Self::Docs => "doc",
            Self::Faq => "question",
            Self::Academy => match level {
                0 | 1 => "course",
                2 => "module",
                _ => "lesson",
            },
            Self::Pages => "page",
        }
    }

    /// Base path for links when the collection does not configure one.
    pub fn default_url_base(self) -> String {
        format!("/{}", self.type_name())
    }

    /// Whether the table of contents is hidden unless metadata says otherwise.
    pub fn hides_table_of_contents(self) -> bool {
        matches!(self, Self::Blog | Self::Faq)
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContentKind {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| DocumentError::UnknownKind {
                name: s.to_string(),
            })
    }
}
