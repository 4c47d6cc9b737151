//! YAML front matter parsing for content files.
//!
//! Front matter is an optional metadata block at the very start of a file,
//! delimited by `---` lines:
//!
//! ```markdown
//! ---
//! title: My Document
//! tags: [rust, tutorial]
//! ---
//!
//! Body starts here
//! ```
//!
//! The lenient entry point, [`Frontmatter::parse`], never fails: a missing
//! header yields empty metadata and the whole content as body, and a header
//! whose YAML is malformed yields empty metadata with the header block still
//! removed from the body. [`Frontmatter::parse_strict`] reports the YAML error
//! instead.

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use tracing::warn;

use crate::DocumentError;

/// The delimiter line that opens and closes a header block.
pub const DELIMITER: &str = "---";

/// Parsed metadata mapping from a front matter block.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Metadata(Mapping);

impl Metadata {
    /// Wraps an existing YAML mapping.
    pub fn new(mapping: Mapping) -> Self {
        Self(mapping)
    }

    /// Returns true if no keys are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of top-level keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the raw value for a key. Null values count as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Returns true if the key is present with a non-null value.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns a value rendered as a string.
    ///
    /// Strings are returned as-is; numbers and booleans are formatted.
    pub fn string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Returns a value as a signed integer, accepting numeric strings.
    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns a value as a boolean, accepting `"true"`/`"false"` strings.
    pub fn boolean(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns a list of strings.
    ///
    /// Accepts a YAML sequence of scalars or a single comma-separated string.
    pub fn strings(&self, key: &str) -> Option<Vec<String>> {
        match self.get(key)? {
            Value::Sequence(items) => Some(items.iter().filter_map(scalar_to_string).collect()),
            Value::String(s) => Some(
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Returns the underlying mapping.
    pub fn as_mapping(&self) -> &Mapping {
        &self.0
    }
}

/// Renders a scalar YAML value as a string.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A document split into its metadata and body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    /// Parsed header keys (empty when there is no usable header).
    pub metadata: Metadata,
    /// Content after the header block, trimmed.
    pub body: String,
}

impl Frontmatter {
    /// Splits content into metadata and body, never failing.
    pub fn parse(content: &str) -> Self {
        let Some((yaml, remaining)) = split_header(content) else {
            return Self {
                metadata: Metadata::default(),
                body: content.trim().to_string(),
            };
        };

        let metadata = match parse_mapping(yaml) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(error = %e, "ignoring malformed front matter");
                Metadata::default()
            }
        };

        Self {
            metadata,
            body: remaining.trim().to_string(),
        }
    }

    /// Splits content into metadata and body, reporting malformed YAML.
    pub fn parse_strict(content: &str) -> Result<Self, DocumentError> {
        let Some((yaml, remaining)) = split_header(content) else {
            return Ok(Self {
                metadata: Metadata::default(),
                body: content.trim().to_string(),
            });
        };

        Ok(Self {
            metadata: parse_mapping(yaml).map_err(|source| DocumentError::Frontmatter { source })?,
            body: remaining.trim().to_string(),
        })
    }
}

/// Parses header YAML into a mapping. Non-mapping documents yield empty metadata.
fn parse_mapping(yaml: &str) -> Result<Metadata, serde_yaml::Error> {
    if yaml.trim().is_empty() {
        return Ok(Metadata::default());
    }
    match serde_yaml::from_str::<Value>(yaml)? {
        Value::Mapping(mapping) => Ok(Metadata(mapping)),
        _ => Ok(Metadata::default()),
    }
}

/// Locates a header block, returning the YAML text and the remaining content.
///
/// The block must start at the beginning of the content (after an optional
/// BOM) and be closed by a delimiter on its own line.
fn split_header(content: &str) -> Option<(&str, &str)> {
    let content = content.trim_start_matches('\u{feff}');
    let first_line_end = content.find('\n').unwrap_or(content.len());
    if content[..first_line_end].trim_end_matches('\r') != DELIMITER {
        return None;
    }

    let after_opening = content.get(first_line_end + 1..)?;
    let closing = find_closing_delimiter(after_opening)?;
    let yaml = &after_opening[..closing.start];
    let remaining = &after_opening[closing.end..];
    Some((yaml, remaining))
}

/// Byte span of the closing delimiter line, including its line break.
struct LineSpan {
    /// Offset of the first byte of the line.
    start: usize,
    /// Offset just past the line terminator.
    end: usize,
}

/// Finds the closing `---` delimiter line.
fn find_closing_delimiter(content: &str) -> Option<LineSpan> {
    let mut pos = 0;
    for line in content.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == DELIMITER {
            return Some(LineSpan {
                start: pos,
                end: pos + line.len(),
            });
        }
        pos += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_frontmatter() {
        let content = r#"---
title: Rust Error Handling
tags: [rust, errors, patterns]
---

# Content starts here"#;

        let fm = Frontmatter::parse(content);
        assert_eq!(fm.metadata.string("title"), Some("Rust Error Handling".into()));
        assert_eq!(
            fm.metadata.strings("tags"),
            Some(vec!["rust".into(), "errors".into(), "patterns".into()])
        );
        assert_eq!(fm.body, "# Content starts here");
    }

    #[test]
    fn no_frontmatter_keeps_content() {
        let content = "  # Just a heading\n\nSome content\n";
        let fm = Frontmatter::parse(content);
        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, "# Just a heading\n\nSome content");
    }

    #[test]
    fn empty_frontmatter() {
        let fm = Frontmatter::parse("---\n---\n\nContent after empty frontmatter");
        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, "Content after empty frontmatter");
    }

    #[test]
    fn malformed_yaml_is_ignored_but_header_removed() {
        let content = r#"---
title: [unclosed bracket
tags: not: valid: yaml:
---

Content"#;

        let fm = Frontmatter::parse(content);
        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, "Content");
    }

    #[test]
    fn strict_parse_reports_malformed_yaml() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        let err = Frontmatter::parse_strict(content).unwrap_err();
        assert!(matches!(err, DocumentError::Frontmatter { .. }));
    }

    #[test]
    fn strict_parse_accepts_valid_yaml() {
        let fm = Frontmatter::parse_strict("---\ntitle: Ok\n---\nBody").unwrap();
        assert_eq!(fm.metadata.string("title"), Some("Ok".into()));
        assert_eq!(fm.body, "Body");
    }

    #[test]
    fn missing_closing_delimiter() {
        let content = "---\ntitle: No closing delimiter\n\nText";
        let fm = Frontmatter::parse(content);
        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, content);
    }

    #[test]
    fn delimiter_not_at_start() {
        let content = "Some text before\n---\ntitle: Not frontmatter\n---";
        let fm = Frontmatter::parse(content);
        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, content);
    }

    #[test]
    fn longer_dash_line_is_not_a_delimiter() {
        let content = "----\ntitle: x\n----\nBody";
        let fm = Frontmatter::parse(content);
        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, content);
    }

    #[test]
    fn nested_values_are_kept() {
        let content = r#"---
sidebar_custom_props:
  icon: star
  weight: 3
---
Body"#;
        let fm = Frontmatter::parse(content);
        let props = fm.metadata.get("sidebar_custom_props").unwrap();
        assert_eq!(props.get("icon").and_then(Value::as_str), Some("star"));
    }

    #[test]
    fn scalar_document_yields_empty_metadata() {
        let fm = Frontmatter::parse("---\njust a string\n---\nBody");
        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, "Body");
    }

    #[test]
    fn typed_accessors() {
        let fm = Frontmatter::parse(
            "---\norder: 3\ntime: \"7\"\ndraft: true\nkeywords: a, b ,c\nnothing: ~\n---\n",
        );
        let m = &fm.metadata;
        assert_eq!(m.integer("order"), Some(3));
        assert_eq!(m.integer("time"), Some(7));
        assert_eq!(m.boolean("draft"), Some(true));
        assert_eq!(
            m.strings("keywords"),
            Some(vec!["a".into(), "b".into(), "c".into()])
        );
        assert!(!m.contains("nothing"));
        assert_eq!(m.string("order"), Some("3".into()));
        assert_eq!(fm.body, "");
    }

    #[test]
    fn bom_handling() {
        let fm = Frontmatter::parse("\u{feff}---\ntitle: With BOM\n---\n\nContent");
        assert_eq!(fm.metadata.string("title"), Some("With BOM".into()));
        assert_eq!(fm.body, "Content");
    }

    #[test]
    fn windows_line_endings() {
        let fm = Frontmatter::parse("---\r\ntitle: Windows\r\ntags: [test]\r\n---\r\n\r\nContent");
        assert_eq!(fm.metadata.string("title"), Some("Windows".into()));
        assert_eq!(fm.body, "Content");
    }

    #[test]
    fn closing_delimiter_at_end_of_file() {
        let fm = Frontmatter::parse("---\ntitle: Only header\n---");
        assert_eq!(fm.metadata.string("title"), Some("Only header".into()));
        assert_eq!(fm.body, "");
    }
}
