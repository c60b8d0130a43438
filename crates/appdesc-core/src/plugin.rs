//! Plugin and buildscript classpath definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// A plugin the build tool applies to the module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSpec {
    /// Plugin id (e.g. "com.android.application").
    pub id: String,
    /// Plugins that must be applied before this one.
    pub after: Vec<String>,
    /// `group:artifact` of the buildscript dependency providing this plugin.
    pub classpath: Option<String>,
    /// Where in the application sequence the plugin was declared.
    pub phase: PluginPhase,
}

impl PluginSpec {
    pub fn new(id: impl Into<String>, phase: PluginPhase) -> Self {
        Self {
            id: id.into(),
            after: Vec::new(),
            classpath: None,
            phase,
        }
    }
}

/// When a plugin is applied relative to the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PluginPhase {
    /// Declared in the `plugins` block.
    Declared,
    /// Applied after every declared plugin.
    Deferred,
}

/// A `group:artifact:version` buildscript dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClasspathDependency {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl ClasspathDependency {
    /// Whether `coordinate` (`group:artifact`, optionally with a version) names this dependency.
    pub fn provides(&self, coordinate: &str) -> bool {
        let mut parts = coordinate.split(':');
        parts.next() == Some(self.group.as_str()) && parts.next() == Some(self.artifact.as_str())
    }
}

impl fmt::Display for ClasspathDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

impl std::str::FromStr for ClasspathDependency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        match parts.as_slice() {
            [group, artifact, version]
                if !group.is_empty() && !artifact.is_empty() && !version.is_empty() =>
            {
                Ok(Self {
                    group: group.to_string(),
                    artifact: artifact.to_string(),
                    version: version.to_string(),
                })
            }
            _ => Err(Error::InvalidInput(format!(
                "'{}' is not a group:artifact:version coordinate",
                s
            ))),
        }
    }
}
