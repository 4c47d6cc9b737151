//! Configuration file parsing.
//!
//! Parses `folio.toml` into intermediate `RawConfig` structures that keep every
//! field optional, so defaults are applied in exactly one place when the
//! typed [`Config`](crate::Config) is built.

use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::{ConfigError, Environment};

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// General settings section.
    pub settings: Option<RawSettings>,
    /// Collection definitions: name -> collection config.
    pub collection: Option<BTreeMap<String, RawCollection>>,
}

/// Raw general settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSettings {
    /// Deployment environment.
    pub environment: Option<Environment>,
    /// Default preview length in characters.
    pub preview_length: Option<usize>,
}

/// Raw collection definition from TOML.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct RawCollection {
    /// Content kind (defaults to the collection name).
    pub kind: Option<String>,
    /// Path to the content directory.
    pub path: String,
    /// Include pattern(s). Accepts a single string or an array of strings.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    #[serde(default)]
    pub include: Option<Vec<String>>,
    /// Exclude pattern(s). Accepts a single string or an array of strings.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    /// Base path for links to this collection's documents.
    pub url_base: Option<String>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config_str("", Path::new("folio.toml")).unwrap();
        assert!(config.settings.is_none());
        assert!(config.collection.is_none());
    }

    #[test]
    fn test_parse_minimal_collection() {
        let toml = r#"
[collection.blog]
path = "content/blog"
"#;
        let config = parse_config_str(toml, Path::new("folio.toml")).unwrap();
        let collections = config.collection.unwrap();
        let blog = collections.get("blog").unwrap();
        assert_eq!(blog.path, "content/blog");
        assert!(blog.kind.is_none());
        assert!(blog.include.is_none());
        assert!(blog.exclude.is_none());
        assert!(blog.url_base.is_none());
    }

    #[test]
    fn test_parse_full_collection() {
        let toml = r#"
[settings]
environment = "development"
preview_length = 120

[collection.guides]
kind = "docs"
path = "./guides"
include = ["**/*.md", "**/*.markdown"]
exclude = "**/drafts/**"
url_base = "/guides"
"#;
        let config = parse_config_str(toml, Path::new("folio.toml")).unwrap();
        let settings = config.settings.unwrap();
        assert_eq!(settings.environment, Some(Environment::Development));
        assert_eq!(settings.preview_length, Some(120));

        let collections = config.collection.unwrap();
        let guides = collections.get("guides").unwrap();
        assert_eq!(guides.kind.as_deref(), Some("docs"));
        assert_eq!(
            guides.include,
            Some(vec!["**/*.md".to_string(), "**/*.markdown".to_string()])
        );
        assert_eq!(guides.exclude, Some(vec!["**/drafts/**".to_string()]));
        assert_eq!(guides.url_base.as_deref(), Some("/guides"));
    }

    #[test]
    fn test_parse_environment_aliases() {
        let toml = "[settings]\nenvironment = \"dev\"\n";
        let config = parse_config_str(toml, Path::new("folio.toml")).unwrap();
        assert_eq!(
            config.settings.unwrap().environment,
            Some(Environment::Development)
        );
    }

    #[test]
    fn test_parse_unknown_keys_are_ignored() {
        let toml = r#"
theme = "dark"

[collection.faq]
path = "faq"
icon = "question"
"#;
        let config = parse_config_str(toml, Path::new("folio.toml")).unwrap();
        assert!(config.collection.unwrap().contains_key("faq"));
    }

    #[test]
    fn test_parse_missing_path_fails() {
        let toml = "[collection.blog]\nkind = \"blog\"\n";
        let err = parse_config_str(toml, Path::new("folio.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
    }

    #[test]
    fn test_parse_invalid_toml() {
        let err = parse_config_str("[collection", Path::new("bad.toml")).unwrap_err();
        match err {
            ConfigError::ParseToml { path, .. } => assert_eq!(path, Path::new("bad.toml")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_missing_file() {
        let err = parse_config_file(Path::new("/nonexistent/folio.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
