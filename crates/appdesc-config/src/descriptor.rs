//! Build descriptor parsing and validation.

use crate::plugins::order_plugins;
use crate::{ConfigError, ConfigResult, LoadContext, PropertyContext};
use appdesc_core::build_config::{DEBUG_BUILD_TYPE, RELEASE_BUILD_TYPE};
use appdesc_core::{
    BuildConfig, BuildType, ClasspathDependency, CompileOptions, JavaVersion, PluginPhase,
    PluginSpec, SdkBounds, SigningConfig,
};
use kdl::{KdlDocument, KdlNode, KdlValue};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Parse a descriptor with the default load context.
pub fn parse(kdl: &str) -> ConfigResult<BuildConfig> {
    parse_with(kdl, &LoadContext::default())
}

/// Read and parse a descriptor file.
pub fn load_descriptor(path: impl AsRef<Path>, ctx: &LoadContext) -> ConfigResult<BuildConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), "Read descriptor");
    parse_with(&content, ctx)
}

/// Parse and validate a descriptor from KDL text.
pub fn parse_with(kdl: &str, ctx: &LoadContext) -> ConfigResult<BuildConfig> {
    let doc: KdlDocument = kdl.parse()?;
    let props = &ctx.properties;

    let mut buildscript = Vec::new();
    let mut plugins = Vec::new();
    let mut android = None;
    let mut flutter = None;

    for node in doc.nodes() {
        match node.name().value() {
            "buildscript" => {
                buildscript.extend(parse_buildscript(node, props)?);
            }
            "plugins" => {
                for child in child_nodes(node) {
                    if child.name().value() == "plugin" {
                        plugins.push(parse_plugin(child, PluginPhase::Declared, props)?);
                    }
                }
            }
            "apply" => {
                plugins.push(parse_plugin(node, PluginPhase::Deferred, props)?);
            }
            "android" => {
                if android.replace(node).is_some() {
                    return Err(ConfigError::Duplicate("android block".to_string()));
                }
            }
            "flutter" => {
                if flutter.replace(node).is_some() {
                    return Err(ConfigError::Duplicate("flutter block".to_string()));
                }
            }
            other => {
                warn!(node = other, "Ignoring unknown descriptor node");
            }
        }
    }

    let android = android.ok_or_else(|| ConfigError::MissingField("android".to_string()))?;
    let flutter = flutter.ok_or_else(|| ConfigError::MissingField("flutter".to_string()))?;

    let namespace = required_string(android, "namespace", "android.namespace", props)?;
    check_identifier("android.namespace", &namespace)?;

    let compile_sdk = required_positive(android, "compile-sdk", "android.compile-sdk", props)?;
    let ndk_version = optional_string(android, "ndk-version", "android.ndk-version", props)?;

    let defaults = single_child(android, "default-config", "android.default-config")?
        .ok_or_else(|| ConfigError::MissingField("android.default-config".to_string()))?;

    let application_id = required_string(
        defaults,
        "application-id",
        "android.default-config.application-id",
        props,
    )?;
    check_identifier("android.default-config.application-id", &application_id)?;

    let min_sdk = required_positive(defaults, "min-sdk", "android.default-config.min-sdk", props)?;
    let target_sdk =
        required_positive(defaults, "target-sdk", "android.default-config.target-sdk", props)?;
    let version_code = required_positive(
        defaults,
        "version-code",
        "android.default-config.version-code",
        props,
    )?;
    let version_name = required_string(
        defaults,
        "version-name",
        "android.default-config.version-name",
        props,
    )?;

    let sdk = SdkBounds {
        min: min_sdk,
        target: target_sdk,
        compile: compile_sdk,
    };
    check_sdk_bounds(&sdk)?;

    let compile_options = parse_compile_options(android, props)?;
    let signing_configs = parse_signing_configs(android, props)?;
    let build_types = parse_build_types(android, props)?;

    let release = build_types
        .iter()
        .find(|bt| bt.name == RELEASE_BUILD_TYPE)
        .ok_or_else(|| ConfigError::MissingField("android.build-types.release".to_string()))?;
    let signing_config_ref = release.signing_config.clone().ok_or_else(|| {
        ConfigError::MissingField("android.build-types.release.signing-config".to_string())
    })?;

    for build_type in &build_types {
        if let Some(reference) = &build_type.signing_config {
            let declared = signing_configs.iter().any(|sc| &sc.name == reference);
            if !declared && !ctx.signing.contains(reference) {
                return Err(ConfigError::UnresolvedReference(format!(
                    "signing config '{}' referenced by build type '{}' (known: {})",
                    reference,
                    build_type.name,
                    known_signing_names(&signing_configs, ctx).join(", ")
                )));
            }
        }
    }

    let source = required_string(flutter, "source", "flutter.source", props)?;
    let source_root = PathBuf::from(source);

    let plugins = order_plugins(plugins, &buildscript)?;

    info!(
        application_id = %application_id,
        min_sdk = sdk.min,
        target_sdk = sdk.target,
        compile_sdk = sdk.compile,
        plugins = plugins.len(),
        "Descriptor validated"
    );

    Ok(BuildConfig {
        application_id,
        namespace,
        sdk,
        version_code,
        version_name,
        signing_config_ref,
        source_root,
        ndk_version,
        compile_options,
        build_types,
        signing_configs,
        buildscript,
        plugins,
    })
}

fn check_sdk_bounds(sdk: &SdkBounds) -> ConfigResult<()> {
    if sdk.is_ordered() {
        return Ok(());
    }
    if sdk.min > sdk.target {
        return Err(ConfigError::InvalidRange {
            field: "android.default-config.min-sdk".to_string(),
            message: format!(
                "min-sdk ({}) must not exceed target-sdk ({})",
                sdk.min, sdk.target
            ),
        });
    }
    if sdk.target > sdk.compile {
        return Err(ConfigError::InvalidRange {
            field: "android.default-config.target-sdk".to_string(),
            message: format!(
                "target-sdk ({}) must not exceed compile-sdk ({})",
                sdk.target, sdk.compile
            ),
        });
    }
    Ok(())
}

/// Reverse-domain identifiers: at least two dot-separated segments, each
/// starting with a letter and holding only letters, digits and `_`.
fn check_identifier(field: &str, value: &str) -> ConfigResult<()> {
    let segments: Vec<&str> = value.split('.').collect();
    if segments.len() < 2 {
        return Err(ConfigError::invalid(
            field,
            format!("'{}' needs at least two segments", value),
        ));
    }
    for segment in segments {
        let mut chars = segment.chars();
        let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
        if !starts_with_letter || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ConfigError::invalid(
                field,
                format!("'{}' has an invalid segment '{}'", value, segment),
            ));
        }
    }
    Ok(())
}

fn parse_buildscript(
    node: &KdlNode,
    props: &PropertyContext,
) -> ConfigResult<Vec<ClasspathDependency>> {
    let mut deps = Vec::new();
    for child in child_nodes(node) {
        if child.name().value() != "classpath" {
            continue;
        }
        for raw in get_all_string_args(child) {
            let coordinate = interpolate("buildscript.classpath", &raw, props)?;
            let dep: ClasspathDependency = coordinate
                .parse()
                .map_err(|e| ConfigError::invalid("buildscript.classpath", format!("{}", e)))?;
            if deps.contains(&dep) {
                return Err(ConfigError::Duplicate(format!("classpath '{}'", dep)));
            }
            deps.push(dep);
        }
    }
    Ok(deps)
}

fn parse_plugin(
    node: &KdlNode,
    phase: PluginPhase,
    props: &PropertyContext,
) -> ConfigResult<PluginSpec> {
    let id = get_first_string_arg(node)
        .ok_or_else(|| ConfigError::MissingField(format!("{} id", node.name().value())))?;

    let mut spec = PluginSpec::new(id, phase);
    spec.after = get_string_list_prop(node, "after");
    spec.classpath = get_string_prop(node, "classpath")
        .map(|raw| interpolate("plugin classpath", &raw, props))
        .transpose()?;
    Ok(spec)
}

fn parse_compile_options(
    android: &KdlNode,
    props: &PropertyContext,
) -> ConfigResult<CompileOptions> {
    let mut options = CompileOptions::default();

    if let Some(block) = single_child(android, "compile-options", "android.compile-options")? {
        if let Some(v) = optional_java_version(
            block,
            "source-compatibility",
            "android.compile-options.source-compatibility",
            props,
        )? {
            options.source_compatibility = v;
        }
        if let Some(v) = optional_java_version(
            block,
            "target-compatibility",
            "android.compile-options.target-compatibility",
            props,
        )? {
            options.target_compatibility = v;
        }
    }

    if let Some(block) = single_child(android, "kotlin-options", "android.kotlin-options")? {
        options.jvm_target =
            optional_java_version(block, "jvm-target", "android.kotlin-options.jvm-target", props)?;
    }

    if let Some(jvm_target) = &options.jvm_target {
        if jvm_target.major() != options.target_compatibility.major() {
            warn!(
                jvm_target = %jvm_target,
                target_compatibility = %options.target_compatibility,
                "Kotlin jvm-target differs from Java target-compatibility"
            );
        }
    }

    Ok(options)
}

fn parse_signing_configs(
    android: &KdlNode,
    props: &PropertyContext,
) -> ConfigResult<Vec<SigningConfig>> {
    let mut configs: Vec<SigningConfig> = Vec::new();
    let Some(block) = single_child(android, "signing-configs", "android.signing-configs")? else {
        return Ok(configs);
    };

    for child in child_nodes(block) {
        if child.name().value() != "config" {
            continue;
        }
        let name = get_first_string_arg(child).ok_or_else(|| {
            ConfigError::MissingField("android.signing-configs.config name".to_string())
        })?;
        if configs.iter().any(|c| c.name == name) {
            return Err(ConfigError::Duplicate(format!("signing config '{}'", name)));
        }

        let field = format!("android.signing-configs.{}", name);
        let store_file = get_string_prop(child, "store-file")
            .map(|raw| interpolate(&field, &raw, props))
            .transpose()?;
        let key_alias = get_string_prop(child, "key-alias")
            .map(|raw| interpolate(&field, &raw, props))
            .transpose()?;

        configs.push(SigningConfig {
            name,
            store_file,
            key_alias,
        });
    }
    Ok(configs)
}

fn parse_build_types(android: &KdlNode, props: &PropertyContext) -> ConfigResult<Vec<BuildType>> {
    let mut types: Vec<BuildType> = Vec::new();

    if let Some(block) = single_child(android, "build-types", "android.build-types")? {
        for child in child_nodes(block) {
            if child.name().value() != "build-type" {
                continue;
            }
            let name = get_first_string_arg(child).ok_or_else(|| {
                ConfigError::MissingField("android.build-types.build-type name".to_string())
            })?;
            if types.iter().any(|t| t.name == name) {
                return Err(ConfigError::Duplicate(format!("build type '{}'", name)));
            }

            let field = format!("android.build-types.{}.signing-config", name);
            let signing_config = match get_string_prop(child, "signing-config") {
                Some(raw) => Some(interpolate(&field, &raw, props)?),
                None => optional_string(child, "signing-config", &field, props)?,
            };
            let minify = get_bool_prop(child, "minify").unwrap_or(false);

            types.push(BuildType {
                name,
                signing_config,
                minify,
            });
        }
    }

    if !types.iter().any(|t| t.name == DEBUG_BUILD_TYPE) {
        types.push(BuildType::implicit_debug());
    }
    Ok(types)
}

fn known_signing_names(inline: &[SigningConfig], ctx: &LoadContext) -> Vec<String> {
    let mut names: Vec<String> = inline.iter().map(|c| c.name.clone()).collect();
    for name in ctx.signing.names() {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names.sort();
    names
}

// Field helpers. `path` is the dotted field name used in error messages.

fn required_string(
    parent: &KdlNode,
    name: &str,
    path: &str,
    props: &PropertyContext,
) -> ConfigResult<String> {
    optional_string(parent, name, path, props)?
        .ok_or_else(|| ConfigError::MissingField(path.to_string()))
}

fn optional_string(
    parent: &KdlNode,
    name: &str,
    path: &str,
    props: &PropertyContext,
) -> ConfigResult<Option<String>> {
    let Some(node) = single_child(parent, name, path)? else {
        return Ok(None);
    };
    let raw = match first_arg(node) {
        Some(KdlValue::String(s)) => s.clone(),
        Some(other) => {
            return Err(ConfigError::invalid(
                path,
                format!("expected a string, found {}", other),
            ));
        }
        None => return Err(ConfigError::invalid(path, "expected a value")),
    };

    let value = interpolate(path, &raw, props)?;
    if value.trim().is_empty() {
        return Err(ConfigError::invalid(path, "must not be empty"));
    }
    Ok(Some(value))
}

fn required_positive(
    parent: &KdlNode,
    name: &str,
    path: &str,
    props: &PropertyContext,
) -> ConfigResult<u32> {
    let node = single_child(parent, name, path)?
        .ok_or_else(|| ConfigError::MissingField(path.to_string()))?;

    let number: i128 = match first_arg(node) {
        Some(KdlValue::Integer(n)) => *n,
        Some(KdlValue::String(s)) => {
            let value = interpolate(path, s, props)?;
            value.trim().parse::<i128>().map_err(|_| {
                ConfigError::invalid(path, format!("'{}' is not an integer", value))
            })?
        }
        Some(other) => {
            return Err(ConfigError::invalid(
                path,
                format!("expected an integer, found {}", other),
            ));
        }
        None => return Err(ConfigError::invalid(path, "expected a value")),
    };

    if number <= 0 {
        return Err(ConfigError::invalid(
            path,
            format!("must be positive, found {}", number),
        ));
    }
    u32::try_from(number)
        .map_err(|_| ConfigError::invalid(path, format!("{} is too large", number)))
}

fn optional_java_version(
    parent: &KdlNode,
    name: &str,
    path: &str,
    props: &PropertyContext,
) -> ConfigResult<Option<JavaVersion>> {
    let Some(node) = single_child(parent, name, path)? else {
        return Ok(None);
    };
    let raw = match first_arg(node) {
        Some(KdlValue::String(s)) => interpolate(path, s, props)?,
        Some(KdlValue::Integer(n)) => n.to_string(),
        Some(KdlValue::Float(f)) => f.to_string(),
        Some(other) => {
            return Err(ConfigError::invalid(
                path,
                format!("expected a Java version, found {}", other),
            ));
        }
        None => return Err(ConfigError::invalid(path, "expected a value")),
    };

    raw.parse::<JavaVersion>()
        .map(Some)
        .map_err(|e| ConfigError::invalid(path, e.to_string()))
}

fn interpolate(path: &str, raw: &str, props: &PropertyContext) -> ConfigResult<String> {
    props.interpolate_strict(raw).map_err(|name| {
        ConfigError::UnresolvedReference(format!("property '{}' used by {}", name, path))
    })
}

/// The only child named `name`, failing if it appears more than once.
fn single_child<'a>(
    parent: &'a KdlNode,
    name: &str,
    path: &str,
) -> ConfigResult<Option<&'a KdlNode>> {
    let mut found = None;
    for child in child_nodes(parent) {
        if child.name().value() == name && found.replace(child).is_some() {
            return Err(ConfigError::Duplicate(path.to_string()));
        }
    }
    Ok(found)
}

fn child_nodes(node: &KdlNode) -> &[KdlNode] {
    node.children().map(|c| c.nodes()).unwrap_or(&[])
}

// Helper functions for extracting values from KDL nodes

fn first_arg(node: &KdlNode) -> Option<&KdlValue> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .map(|e| e.value())
}

fn get_first_string_arg(node: &KdlNode) -> Option<String> {
    first_arg(node)
        .and_then(|v| v.as_string())
        .map(|s| s.to_string())
}

fn get_all_string_args(node: &KdlNode) -> Vec<String> {
    node.entries()
        .iter()
        .filter(|e| e.name().is_none())
        .filter_map(|e| e.value().as_string())
        .map(|s| s.to_string())
        .collect()
}

fn get_string_prop(node: &KdlNode, name: &str) -> Option<String> {
    node.get(name)
        .and_then(|v| v.as_string())
        .map(|s| s.to_string())
}

fn get_bool_prop(node: &KdlNode, name: &str) -> Option<bool> {
    node.get(name).and_then(|v| v.as_bool())
}

fn get_string_list_prop(node: &KdlNode, name: &str) -> Vec<String> {
    // Repeated properties (after="a" after="b") are all kept
    node.entries()
        .iter()
        .filter(|e| e.name().is_some_and(|n| n.value() == name))
        .filter_map(|e| e.value().as_string())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use appdesc_core::StaticSigningRegistry;

    const ZERASFOOD: &str = r#"
        buildscript {
            classpath "com.google.gms:google-services:4.4.0"
        }

        plugins {
            plugin "com.android.application"
            plugin "kotlin-android" after="com.android.application"
            plugin "dev.flutter.flutter-gradle-plugin"
        }

        android {
            namespace "com.daniel.zerasfood"
            compile-sdk "${flutter.compileSdkVersion}"
            ndk-version "27.0.12077973"

            compile-options {
                source-compatibility "VERSION_11"
                target-compatibility "VERSION_11"
            }

            kotlin-options {
                jvm-target "11"
            }

            default-config {
                application-id "com.daniel.zerasfood"
                min-sdk 27
                target-sdk "${flutter.targetSdkVersion}"
                version-code "${flutter.versionCode}"
                version-name "${flutter.versionName}"
            }

            build-types {
                build-type "release" signing-config="debug"
            }
        }

        flutter {
            source "../.."
        }

        apply "com.google.gms.google-services" classpath="com.google.gms:google-services"
    "#;

    #[test]
    fn test_parse_full_descriptor() {
        let config = parse(ZERASFOOD).unwrap();

        assert_eq!(config.application_id, "com.daniel.zerasfood");
        assert_eq!(config.namespace, "com.daniel.zerasfood");
        assert_eq!(config.sdk.min, 27);
        assert_eq!(config.sdk.target, 35);
        assert_eq!(config.sdk.compile, 35);
        assert_eq!(config.version_code, 1);
        assert_eq!(config.version_name, "1.0");
        assert_eq!(config.signing_config_ref, "debug");
        assert_eq!(config.source_root, PathBuf::from("../.."));
        assert_eq!(config.ndk_version.as_deref(), Some("27.0.12077973"));
        assert_eq!(config.compile_options.source_compatibility.as_str(), "11");
        assert_eq!(
            config.compile_options.jvm_target.as_ref().map(|v| v.major()),
            Some(11)
        );
        assert_eq!(
            config.plugin_ids(),
            vec![
                "com.android.application",
                "kotlin-android",
                "dev.flutter.flutter-gradle-plugin",
                "com.google.gms.google-services",
            ]
        );
        assert!(config.build_type("debug").is_some());
    }

    #[test]
    fn test_properties_from_context() {
        let properties = crate::PropertyContextBuilder::new()
            .with_property("flutter.versionCode", "12")
            .with_property("flutter.versionName", "2.1.0")
            .build();
        let ctx = LoadContext::default().with_properties(properties);

        let config = parse_with(ZERASFOOD, &ctx).unwrap();
        assert_eq!(config.version_code, 12);
        assert_eq!(config.version_name, "2.1.0");
    }

    #[test]
    fn test_missing_application_id() {
        let kdl = ZERASFOOD.replace(r#"application-id "com.daniel.zerasfood""#, "");
        let result = parse(&kdl);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::MissingField(field) if field == "android.default-config.application-id"
        ));
    }

    #[test]
    fn test_missing_flutter_source() {
        let kdl = ZERASFOOD.replace(r#"source "../..""#, "");
        assert!(matches!(
            parse(&kdl).unwrap_err(),
            ConfigError::MissingField(field) if field == "flutter.source"
        ));
    }

    #[test]
    fn test_target_above_compile() {
        let kdl = ZERASFOOD.replace(
            r#"compile-sdk "${flutter.compileSdkVersion}""#,
            "compile-sdk 30",
        );
        assert!(matches!(
            parse(&kdl).unwrap_err(),
            ConfigError::InvalidRange { field, .. } if field == "android.default-config.target-sdk"
        ));
    }

    #[test]
    fn test_check_sdk_bounds_agrees_with_ordering() {
        let bounds = |min, target, compile| SdkBounds {
            min,
            target,
            compile,
        };

        for sdk in [bounds(21, 34, 35), bounds(35, 35, 35)] {
            assert!(sdk.is_ordered());
            assert!(check_sdk_bounds(&sdk).is_ok());
        }

        let err = check_sdk_bounds(&bounds(30, 27, 35)).unwrap_err();
        assert!(matches!(
            &err,
            ConfigError::InvalidRange { field, .. } if field == "android.default-config.min-sdk"
        ));

        let err = check_sdk_bounds(&bounds(21, 35, 34)).unwrap_err();
        assert!(matches!(
            &err,
            ConfigError::InvalidRange { field, .. } if field == "android.default-config.target-sdk"
        ));
    }

    #[test]
    fn test_unresolved_signing_config() {
        let kdl = ZERASFOOD.replace(r#"signing-config="debug""#, r#"signing-config="upload""#);
        assert!(matches!(
            parse(&kdl).unwrap_err(),
            ConfigError::UnresolvedReference(_)
        ));
    }

    #[test]
    fn test_signing_config_from_registry() {
        let kdl = ZERASFOOD.replace(r#"signing-config="debug""#, r#"signing-config="upload""#);
        let ctx = LoadContext::default()
            .with_signing(StaticSigningRegistry::with_debug().with("upload"));
        let config = parse_with(&kdl, &ctx).unwrap();
        assert_eq!(config.signing_config_ref, "upload");
    }

    #[test]
    fn test_inline_signing_config() {
        let kdl = ZERASFOOD.replace(
            r#"build-types {"#,
            r#"signing-configs {
                config "upload" store-file="${env.KEYSTORE}" key-alias="upload"
            }
            build-types {"#,
        );
        let kdl = kdl.replace(r#"signing-config="debug""#, r#"signing-config="upload""#);
        let properties = crate::PropertyContextBuilder::new()
            .with_env("KEYSTORE", "/keys/upload.jks")
            .build();
        let ctx = LoadContext::default().with_properties(properties);

        let config = parse_with(&kdl, &ctx).unwrap();
        assert_eq!(config.signing_config_ref, "upload");
        assert_eq!(
            config.signing_configs[0].store_file.as_deref(),
            Some("/keys/upload.jks")
        );
    }

    #[test]
    fn test_release_without_signing_config() {
        let kdl = ZERASFOOD.replace(r#" signing-config="debug""#, "");
        let err = parse(&kdl).unwrap_err();
        assert!(matches!(
            &err,
            ConfigError::MissingField(field)
                if field == "android.build-types.release.signing-config"
        ));
    }

    #[test]
    fn test_signing_config_as_child_node() {
        let kdl = ZERASFOOD.replace(
            r#"build-type "release" signing-config="debug""#,
            r#"build-type "release" {
                    signing-config "debug"
                }"#,
        );
        let config = parse(&kdl).unwrap();
        assert_eq!(config.signing_config_ref, "debug");
    }

    #[test]
    fn test_unresolved_property() {
        let kdl = ZERASFOOD.replace("${flutter.versionName}", "${flutter.unknownThing}");
        assert!(matches!(
            parse(&kdl).unwrap_err(),
            ConfigError::UnresolvedReference(msg) if msg.contains("flutter.unknownThing")
        ));
    }

    #[test]
    fn test_duplicate_singleton_field() {
        let kdl = ZERASFOOD.replace(
            r#"namespace "com.daniel.zerasfood""#,
            r#"namespace "com.daniel.zerasfood"
            namespace "com.daniel.other""#,
        );
        assert!(matches!(parse(&kdl).unwrap_err(), ConfigError::Duplicate(_)));
    }

    #[test]
    fn test_invalid_application_id() {
        let kdl = ZERASFOOD.replace(
            r#"application-id "com.daniel.zerasfood""#,
            r#"application-id "zerasfood""#,
        );
        assert!(matches!(
            parse(&kdl).unwrap_err(),
            ConfigError::InvalidValue { .. }
        ));

        let kdl = ZERASFOOD.replace(
            r#"application-id "com.daniel.zerasfood""#,
            r#"application-id "com.1daniel.app""#,
        );
        assert!(matches!(
            parse(&kdl).unwrap_err(),
            ConfigError::InvalidValue { .. }
        ));
    }

    #[test]
    fn test_non_positive_version_code() {
        let kdl = ZERASFOOD.replace(r#"version-code "${flutter.versionCode}""#, "version-code 0");
        let err = parse(&kdl).unwrap_err();
        assert!(matches!(
            &err,
            ConfigError::InvalidValue { field, .. }
                if field == "android.default-config.version-code"
        ));
    }

    #[test]
    fn test_missing_buildscript_classpath() {
        let kdl = ZERASFOOD.replace(r#"classpath "com.google.gms:google-services:4.4.0""#, "");
        assert!(matches!(
            parse(&kdl).unwrap_err(),
            ConfigError::UnresolvedReference(_)
        ));
    }

    #[test]
    fn test_syntax_error() {
        let result = parse("android {");
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }
}
