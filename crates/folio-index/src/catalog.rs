//! Registries for every configured collection.

use std::collections::BTreeMap;

use folio_config::Config;

use crate::{IndexError, Registry};

/// One registry per configured collection, keyed by collection name.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Registries by collection name.
    registries: BTreeMap<String, Registry>,
}

impl Catalog {
    /// Builds a registry for each collection in the configuration.
    ///
    /// Kinds and patterns are resolved here; no content is read until a
    /// registry is first queried.
    pub fn from_config(config: &Config) -> Result<Self, IndexError> {
        let registries = config
            .collections
            .iter()
            .map(|collection| {
                let registry = Registry::from_collection(collection, &config.settings)?;
                Ok((collection.name.clone(), registry))
            })
            .collect::<Result<BTreeMap<_, _>, IndexError>>()?;

        Ok(Self { registries })
    }

    /// Returns the registry of a collection.
    pub fn registry(&self, name: &str) -> Result<&Registry, IndexError> {
        self.registries
            .get(name)
            .ok_or_else(|| IndexError::UnknownCollection {
                name: name.to_string(),
            })
    }

    /// Returns the collection names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registries.keys().map(String::as_str)
    }

    /// Iterates over the registries in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Registry> {
        self.registries.values()
    }

    /// Returns the number of collections.
    pub fn len(&self) -> usize {
        self.registries.len()
    }

    /// Returns true if no collection is configured.
    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }
}
