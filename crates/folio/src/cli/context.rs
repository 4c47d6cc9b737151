//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use folio_config::{Config, ENVIRONMENT_VAR};
use folio_index::{Catalog, Registry};
use tracing::debug;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Loaded configuration (default if no config file was found).
    pub config: Config,
    /// Registries for the configured collections.
    pub catalog: Catalog,
}

impl CommandContext {
    /// Loads the configuration and builds the catalog.
    ///
    /// An explicit `config_path` bypasses the upward search for `folio.toml`.
    /// The `FOLIO_ENV` override applies either way.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd, config_path)?;
        let catalog = Catalog::from_config(&config).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })?;
        debug!(
            config_root = ?config.config_root,
            environment = %config.settings.environment,
            collections = catalog.len(),
            "loaded configuration"
        );
        Ok(Self { config, catalog })
    }

    /// Returns the registry for a collection, or exits with an error.
    pub fn registry(&self, name: &str) -> Result<&Registry, ExitCode> {
        self.catalog.registry(name).map_err(|e| {
            eprintln!("error: {e}");
            if self.catalog.is_empty() {
                eprintln!("Add a [collection.NAME] table with a path to folio.toml.");
            } else {
                let names: Vec<_> = self.catalog.names().collect();
                eprintln!("Available collections: {}", names.join(", "));
            }
            ExitCode::FAILURE
        })
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from an explicit file or by discovery from `cwd`.
fn load_config_or_failure(cwd: &Path, config_path: Option<&Path>) -> Result<Config, ExitCode> {
    let loaded = match config_path {
        Some(path) => Config::load_file(&cwd.join(path))
            .and_then(|c| c.with_environment_override(env::var(ENVIRONMENT_VAR).ok().as_deref())),
        None => Config::load(cwd),
    };
    loaded.map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
