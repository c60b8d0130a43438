//! Signing configurations and the registry they resolve against.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Name of the signing configuration the Android toolchain always provides.
pub const DEBUG_SIGNING_CONFIG: &str = "debug";

/// A signing configuration declared inline in a descriptor.
///
/// Only references to key material are recorded; passwords stay with the
/// signing subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningConfig {
    pub name: String,
    /// Keystore path, relative to the module directory.
    pub store_file: Option<String>,
    pub key_alias: Option<String>,
}

/// Registry of signing configurations known to the external signing subsystem.
pub trait SigningRegistry: Send + Sync + std::fmt::Debug {
    /// Whether a configuration with this name exists.
    fn contains(&self, name: &str) -> bool;

    /// All configuration names, sorted.
    fn names(&self) -> Vec<String>;
}

/// A fixed set of signing configuration names.
#[derive(Debug, Clone, Default)]
pub struct StaticSigningRegistry {
    names: BTreeSet<String>,
}

impl StaticSigningRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding only the toolchain-provided `debug` configuration.
    pub fn with_debug() -> Self {
        let mut registry = Self::new();
        registry.insert(DEBUG_SIGNING_CONFIG);
        registry
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn with(mut self, name: impl Into<String>) -> Self {
        self.insert(name);
        self
    }
}

impl SigningRegistry for StaticSigningRegistry {
    fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    fn names(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_registry() {
        let registry = StaticSigningRegistry::with_debug();
        assert!(registry.contains("debug"));
        assert!(!registry.contains("release"));
    }

    #[test]
    fn test_names_are_sorted() {
        let registry = StaticSigningRegistry::new().with("upload").with("debug");
        assert_eq!(registry.names(), vec!["debug", "upload"]);
    }
}
