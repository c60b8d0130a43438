//! Load context: everything the loader resolves references against.

use appdesc_core::{SigningRegistry, StaticSigningRegistry};

use crate::PropertyContext;

/// Explicit inputs for one descriptor load.
///
/// There is no process-wide build state; callers assemble a context and
/// pass it to [`crate::parse_with`].
#[derive(Debug)]
pub struct LoadContext {
    /// Signing configurations known to the external signing subsystem.
    pub signing: Box<dyn SigningRegistry>,
    /// Properties available to `${...}` references.
    pub properties: PropertyContext,
}

impl LoadContext {
    pub fn new(signing: impl SigningRegistry + 'static, properties: PropertyContext) -> Self {
        Self {
            signing: Box::new(signing),
            properties,
        }
    }

    pub fn with_signing(mut self, signing: impl SigningRegistry + 'static) -> Self {
        self.signing = Box::new(signing);
        self
    }

    pub fn with_properties(mut self, properties: PropertyContext) -> Self {
        self.properties = properties;
        self
    }
}

impl Default for LoadContext {
    /// Only the toolchain `debug` signing configuration and framework default properties.
    fn default() -> Self {
        Self::new(StaticSigningRegistry::with_debug(), PropertyContext::default())
    }
}
