//! Configuration system for folio.
//!
//! folio reads a single TOML file named `folio.toml`, found by walking up the
//! directory tree from the current working directory. The file declares global
//! settings and one `[collection.<name>]` table per content collection.

#![warn(missing_docs)]

mod discovery;
mod error;
mod parse;
mod patterns;
mod resolve;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    env, fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

pub use discovery::{CONFIG_FILENAME, find_config_file};
pub use error::ConfigError;
pub use parse::{RawCollection, RawConfig, RawSettings, parse_config_file, parse_config_str};
pub use patterns::{CompiledPatterns, is_skipped_dir};
pub use resolve::resolve_collection_path;
use serde::{Deserialize, Serialize};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Environment variable overriding `settings.environment`.
pub const ENVIRONMENT_VAR: &str = "FOLIO_ENV";

/// Include pattern used when a collection declares none.
pub const DEFAULT_INCLUDE: &str = "**/*.{md,markdown}";

/// Default excerpt length in characters.
pub const DEFAULT_PREVIEW_LENGTH: usize = 300;

/// Fully resolved folio configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// General settings.
    pub settings: Settings,
    /// Collections in name order, with absolute paths and patterns.
    pub collections: Vec<Collection>,
    /// Directory containing the loaded config file, if any.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads the configuration nearest to `cwd`.
    ///
    /// Applies the `FOLIO_ENV` override. Returns the default configuration
    /// when no `folio.toml` is found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config = match find_config_file(cwd) {
            Some(path) => Self::load_file(&path)?,
            None => Self::default(),
        };
        config.with_environment_override(env::var(ENVIRONMENT_VAR).ok().as_deref())
    }

    /// Loads configuration from a specific file, without the environment override.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = parse_config_file(path)?;
        let config_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut config = Self::from_raw(raw, config_dir)?;
        config.config_root = Some(config_dir.to_path_buf());
        Ok(config)
    }

    /// Builds a typed configuration from parsed TOML, applying defaults.
    ///
    /// Relative collection paths are resolved against `config_dir`.
    pub fn from_raw(raw: RawConfig, config_dir: &Path) -> Result<Self, ConfigError> {
        let settings = raw.settings.map(Settings::from_raw).unwrap_or_default();

        let collections = raw
            .collection
            .unwrap_or_default()
            .into_iter()
            .map(|(name, raw)| Collection::from_raw(name, raw, config_dir))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            settings,
            collections,
            config_root: None,
        })
    }

    /// Replaces the configured environment with `value` when present.
    ///
    /// Accepts `dev`, `development`, `prod` and `production`, case-insensitively.
    pub fn with_environment_override(mut self, value: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(value) = value {
            self.settings.environment = value.parse()?;
        }
        Ok(self)
    }

    /// Returns the collection with the given name.
    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - Empty configuration (no collections defined)
    /// - Collection paths that don't exist or aren't directories
    /// - Include patterns that don't match any files
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            settings: self.settings.clone(),
        };
        toml::to_string_pretty(&serializable)
            .map_err(|source| ConfigError::SerializeToml { source })
    }
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Drafts are hidden.
    #[default]
    #[serde(alias = "prod")]
    Production,
    /// Drafts are visible.
    #[serde(alias = "dev")]
    Development,
}

impl Environment {
    /// Returns whether draft documents are visible in this environment.
    pub fn includes_drafts(self) -> bool {
        self == Self::Development
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => f.write_str("production"),
            Self::Development => f.write_str("development"),
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Ok(Self::Production),
            "dev" | "development" => Ok(Self::Development),
            _ => Err(ConfigError::InvalidEnvironment {
                value: s.to_string(),
            }),
        }
    }
}

/// General settings for folio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Deployment environment.
    pub environment: Environment,
    /// Default excerpt length for previews and descriptions.
    pub preview_length: usize,
}

impl Settings {
    /// Applies defaults to parsed settings.
    fn from_raw(raw: RawSettings) -> Self {
        let defaults = Self::default();
        Self {
            environment: raw.environment.unwrap_or(defaults.environment),
            preview_length: raw.preview_length.unwrap_or(defaults.preview_length),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            preview_length: DEFAULT_PREVIEW_LENGTH,
        }
    }
}

/// Wrapper for serializing settings as a `[settings]` table.
#[derive(Serialize)]
struct SerializableSettings {
    /// General settings.
    settings: Settings,
}

/// A content collection with resolved path and patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    /// Collection name, the key of its `[collection.<name>]` table.
    pub name: String,
    /// Content kind name, resolved by the index.
    pub kind: String,
    /// Absolute path to the collection root.
    pub path: PathBuf,
    /// Include patterns, relative to the collection root.
    pub include: Vec<String>,
    /// Exclude patterns, relative to the collection root.
    pub exclude: Vec<String>,
    /// Base path for links; the kind's default when unset.
    pub url_base: Option<String>,
}

impl Collection {
    /// Applies defaults and resolves the path of a parsed collection.
    fn from_raw(name: String, raw: RawCollection, config_dir: &Path) -> Result<Self, ConfigError> {
        let path = resolve_collection_path(&raw.path, config_dir)?;
        let include = raw
            .include
            .filter(|patterns| !patterns.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_INCLUDE.to_string()]);

        Ok(Self {
            kind: raw.kind.unwrap_or_else(|| name.clone()),
            name,
            path,
            include,
            exclude: raw.exclude.unwrap_or_default(),
            url_base: raw.url_base,
        })
    }

    /// Compiles this collection's include/exclude patterns.
    pub fn compile_patterns(&self) -> Result<CompiledPatterns, ConfigError> {
        CompiledPatterns::compile(self)
    }
}
