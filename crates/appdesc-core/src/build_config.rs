//! The validated build configuration record.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::plugin::{ClasspathDependency, PluginSpec};
use crate::signing::SigningConfig;
use crate::{Error, Result};

/// Name of the build type whose signing configuration the record exposes.
pub const RELEASE_BUILD_TYPE: &str = "release";

/// Name of the build type the Android toolchain always provides.
pub const DEBUG_BUILD_TYPE: &str = "debug";

/// A fully validated build configuration for one application module.
///
/// Produced once per build invocation by the descriptor loader and handed,
/// unchanged, to the external build tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Reverse-domain application identifier (e.g. "com.example.app").
    pub application_id: String,
    /// Namespace used for generated R and BuildConfig classes.
    pub namespace: String,
    /// Minimum, target and compile SDK levels.
    pub sdk: SdkBounds,
    /// Monotonic version code published to the store.
    pub version_code: u32,
    /// Human readable version name.
    pub version_name: String,
    /// Signing configuration used by the release build type.
    pub signing_config_ref: String,
    /// Root of the shared application source tree.
    pub source_root: PathBuf,
    /// Pinned NDK version, if any.
    pub ndk_version: Option<String>,
    /// Java and Kotlin language levels.
    pub compile_options: CompileOptions,
    /// Build types; always contains `release` and `debug`.
    pub build_types: Vec<BuildType>,
    /// Signing configurations declared inline in the descriptor.
    pub signing_configs: Vec<SigningConfig>,
    /// Buildscript classpath dependencies.
    pub buildscript: Vec<ClasspathDependency>,
    /// Plugins in application order.
    pub plugins: Vec<PluginSpec>,
}

impl BuildConfig {
    /// Look up a build type by name.
    pub fn build_type(&self, name: &str) -> Option<&BuildType> {
        self.build_types.iter().find(|bt| bt.name == name)
    }

    /// Plugin ids in the order they must be applied.
    pub fn plugin_ids(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.id.as_str()).collect()
    }
}

/// SDK version bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkBounds {
    pub min: u32,
    pub target: u32,
    pub compile: u32,
}

impl SdkBounds {
    /// Whether `min <= target <= compile` holds.
    pub fn is_ordered(&self) -> bool {
        self.min <= self.target && self.target <= self.compile
    }
}

/// Java source/target compatibility and Kotlin JVM target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileOptions {
    pub source_compatibility: JavaVersion,
    pub target_compatibility: JavaVersion,
    pub jvm_target: Option<JavaVersion>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            source_compatibility: JavaVersion::default(),
            target_compatibility: JavaVersion::default(),
            jvm_target: None,
        }
    }
}

/// A Java language level such as `1.8`, `11` or `17`.
///
/// Accepts the Gradle spellings `VERSION_11`, `JavaVersion.VERSION_1_8`
/// and normalizes them to the dotted form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct JavaVersion(String);

impl JavaVersion {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The feature release number (`1.8` -> 8, `11` -> 11).
    pub fn major(&self) -> u32 {
        let mut parts = self.0.split('.').filter_map(|p| p.parse::<u32>().ok());
        match (parts.next(), parts.next()) {
            (Some(1), Some(minor)) => minor,
            (Some(major), _) => major,
            _ => 0,
        }
    }
}

impl Default for JavaVersion {
    fn default() -> Self {
        Self("1.8".to_string())
    }
}

impl std::str::FromStr for JavaVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let bare = trimmed
            .strip_prefix("JavaVersion.")
            .unwrap_or(trimmed)
            .trim_start_matches("VERSION_")
            .replace('_', ".");

        let parts: Vec<&str> = bare.split('.').collect();
        let valid = !bare.is_empty()
            && parts
                .iter()
                .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));
        if !valid || (parts[0] == "1" && parts.len() < 2) {
            return Err(Error::InvalidInput(format!(
                "'{}' is not a Java version",
                trimmed
            )));
        }

        Ok(Self(bare))
    }
}

/// A named build variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildType {
    pub name: String,
    /// Signing configuration this build type signs with.
    pub signing_config: Option<String>,
    /// Whether code shrinking is enabled.
    pub minify: bool,
}

impl BuildType {
    /// The implicit `debug` build type the toolchain always provides.
    pub fn implicit_debug() -> Self {
        Self {
            name: DEBUG_BUILD_TYPE.to_string(),
            signing_config: None,
            minify: false,
        }
    }
}
