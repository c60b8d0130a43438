//! CLI command implementations.

pub mod build;

use anyhow::{Context, Result, bail};
use appdesc_config::{LoadContext, PropertyContext, load_descriptor};
use appdesc_core::{BuildConfig, StaticSigningRegistry};
use appdesc_executor::{BuildInvocation, GradleInvocation};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the properties file picked up next to a descriptor.
const LOCAL_PROPERTIES: &str = "local.properties";

/// Flags shared by every command that loads a descriptor.
pub struct LoadOptions {
    pub properties: Option<String>,
    pub property: Vec<String>,
    pub signing: Vec<String>,
}

/// Assemble the load context from flags, environment and local.properties.
pub fn load_context(descriptor: &Path, options: &LoadOptions) -> Result<LoadContext> {
    let mut properties = PropertyContext::new();

    let properties_file = match &options.properties {
        Some(path) => Some(PathBuf::from(path)),
        None => find_local_properties(descriptor),
    };
    if let Some(path) = properties_file {
        properties
            .load_properties_file(&path)
            .with_context(|| format!("Failed to read properties file: {}", path.display()))?;
    }

    properties.populate_env();

    for pair in &options.property {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("Expected key=value, got '{}'", pair);
        };
        properties.set(key.trim(), value.trim());
    }

    let mut signing = StaticSigningRegistry::with_debug();
    for name in &options.signing {
        signing.insert(name.trim());
    }

    Ok(LoadContext::new(signing, properties))
}

/// local.properties in the descriptor's directory or the one above it.
fn find_local_properties(descriptor: &Path) -> Option<PathBuf> {
    descriptor_dir(descriptor)
        .ancestors()
        .take(2)
        .map(|dir| dir.join(LOCAL_PROPERTIES))
        .find(|candidate| candidate.is_file())
}

fn descriptor_dir(descriptor: &Path) -> &Path {
    descriptor
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

pub fn load(path: &str, options: &LoadOptions) -> Result<BuildConfig> {
    let descriptor = Path::new(path);
    let ctx = load_context(descriptor, options)?;
    debug!(signing = ?ctx.signing.names(), "Load context ready");
    load_descriptor(descriptor, &ctx)
        .with_context(|| format!("Failed to load descriptor: {}", path))
}

pub fn validate(path: &str, options: &LoadOptions) -> Result<()> {
    match load(path, options) {
        Ok(_config) => {
            println!("Descriptor is valid");
            Ok(())
        }
        Err(e) => {
            println!("Descriptor error: {:#}", e);
            std::process::exit(1);
        }
    }
}

pub fn show(path: &str, options: &LoadOptions, json: bool) -> Result<()> {
    let config = load(path, options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("application id:  {}", config.application_id);
    println!("namespace:       {}", config.namespace);
    println!(
        "sdk:             min {} / target {} / compile {}",
        config.sdk.min, config.sdk.target, config.sdk.compile
    );
    println!(
        "version:         {} ({})",
        config.version_name, config.version_code
    );
    println!("signing config:  {}", config.signing_config_ref);
    println!("source root:     {}", config.source_root.display());
    if let Some(ndk) = &config.ndk_version {
        println!("ndk:             {}", ndk);
    }
    println!(
        "java:            source {} / target {}",
        config.compile_options.source_compatibility, config.compile_options.target_compatibility
    );
    if let Some(jvm_target) = &config.compile_options.jvm_target {
        println!("kotlin jvm:      {}", jvm_target);
    }
    for build_type in &config.build_types {
        println!(
            "build type:      {} (signing: {}, minify: {})",
            build_type.name,
            build_type.signing_config.as_deref().unwrap_or("-"),
            build_type.minify
        );
    }
    for dep in &config.buildscript {
        println!("classpath:       {}", dep);
    }
    println!("plugins:         {}", config.plugin_ids().join(" -> "));

    Ok(())
}

pub fn plan(path: &str, options: &LoadOptions, task: &str) -> Result<()> {
    let config = load(path, options)?;
    let project_dir = build::resolve_project_dir(Path::new(path), None);
    let invocation = BuildInvocation::new(config, task, project_dir);
    let gradle = GradleInvocation::from_invocation(&invocation);

    println!("Invocation: {}", invocation.id);
    println!("Command:    {}", gradle.render());
    println!("Plugin application order:");
    for (position, plugin) in invocation.config.plugins.iter().enumerate() {
        println!("  {}. {} ({:?})", position + 1, plugin.id, plugin.phase);
    }
    Ok(())
}
