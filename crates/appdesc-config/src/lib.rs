//! KDL build descriptor parsing for appdesc.
//!
//! This crate handles:
//! - Descriptor parsing and validation (app.kdl)
//! - Property interpolation (`${flutter.versionCode}`)
//! - Plugin application ordering
//! - The load context (signing registry and properties)

pub mod context;
pub mod descriptor;
pub mod error;
pub mod plugins;
pub mod properties;

pub use context::LoadContext;
pub use descriptor::{load_descriptor, parse, parse_with};
pub use error::{ConfigError, ConfigResult};
pub use properties::{FlutterDefaults, PropertyContext, PropertyContextBuilder};
