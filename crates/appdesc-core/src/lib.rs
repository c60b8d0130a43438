//! Core domain types and traits for appdesc.
//!
//! This crate contains:
//! - The validated `BuildConfig` record and its parts
//! - SDK bounds and Java language levels
//! - Signing configurations and the signing registry seam
//! - Plugin specifications and buildscript classpath coordinates
//! - The executor trait the external build tool is driven through

pub mod build_config;
pub mod error;
pub mod executor;
pub mod id;
pub mod plugin;
pub mod signing;

pub use build_config::{BuildConfig, BuildType, CompileOptions, JavaVersion, SdkBounds};
pub use error::{Error, Result};
pub use id::InvocationId;
pub use plugin::{ClasspathDependency, PluginPhase, PluginSpec};
pub use signing::{SigningConfig, SigningRegistry, StaticSigningRegistry};
