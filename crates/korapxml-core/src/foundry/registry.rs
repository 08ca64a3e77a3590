//! Foundry lookup by name

use std::fmt;
use std::sync::Arc;

use super::{Base, CoreNlp, Foundry, Generic, TreeTagger};
use crate::config::FoundryMapping;
use crate::errors::{KorapError, Result};
use crate::log_skip;

type FoundryFactory = Box<dyn Fn() -> Arc<dyn Foundry> + Send + Sync>;

/// A layer bound to the foundry that exports it
#[derive(Clone)]
pub struct ResolvedAssignment {
    pub layer: String,
    pub foundry: Arc<dyn Foundry>,
}

impl fmt::Debug for ResolvedAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedAssignment")
            .field("layer", &self.layer)
            .field("foundry", &self.foundry.name())
            .finish()
    }
}

/// Named foundry factories, in registration order
pub struct FoundryRegistry {
    factories: Vec<(String, FoundryFactory)>,
}

impl FoundryRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// A registry with `Base`, `TreeTagger`, `CoreNLP` and `Generic`
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("Base", || Arc::new(Base));
        registry.register("TreeTagger", || Arc::new(TreeTagger));
        registry.register("CoreNLP", || Arc::new(CoreNlp));
        registry.register("Generic", || Arc::new(Generic));
        registry
    }

    /// Register a factory; a later registration under the same name wins
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Arc<dyn Foundry> + Send + Sync + 'static,
    {
        let name = name.into();
        self.factories.retain(|(existing, _)| *existing != name);
        self.factories.push((name, Box::new(factory)));
    }

    /// Registered names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.factories.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Instantiate the foundry registered under `name`
    ///
    /// # Errors
    ///
    /// Returns `UnknownFoundry` if no factory has that name.
    pub fn create(&self, name: &str) -> Result<Arc<dyn Foundry>> {
        self.factories
            .iter()
            .find(|(registered, _)| registered == name)
            .map(|(_, factory)| factory())
            .ok_or_else(|| KorapError::UnknownFoundry {
                name: name.to_string(),
            })
    }

    /// Bind every mapping entry to a foundry, keeping mapping order
    ///
    /// Entries naming an unknown foundry are logged and dropped.
    pub fn resolve(&self, mapping: &FoundryMapping) -> Vec<ResolvedAssignment> {
        mapping
            .iter()
            .filter_map(|entry| match self.create(&entry.foundry) {
                Ok(foundry) => Some(ResolvedAssignment {
                    layer: entry.layer.clone(),
                    foundry,
                }),
                Err(err) => {
                    log_skip!(
                        "resolve_foundry",
                        err,
                        layer = entry.layer.as_str(),
                        foundry = entry.foundry.as_str()
                    );
                    None
                }
            })
            .collect()
    }
}

impl Default for FoundryRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
