//! Property interpolation for build descriptors.
//!
//! String values may reference properties like:
//! - `${flutter.compileSdkVersion}` - Framework compile SDK
//! - `${flutter.targetSdkVersion}` - Framework target SDK
//! - `${flutter.minSdkVersion}` - Framework minimum SDK
//! - `${flutter.ndkVersion}` - Framework NDK version
//! - `${flutter.versionCode}` - App version code (local.properties)
//! - `${flutter.versionName}` - App version name (local.properties)
//! - `${env.VAR_NAME}` - Environment variable
//! - `${any.key}` - Any key from local.properties or `-P key=value`
//!
//! Keys from local.properties and explicit overrides win over the
//! framework defaults.

use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

use crate::ConfigResult;

/// Environment variables with this prefix are read as properties.
pub const PROPERTY_ENV_PREFIX: &str = "APPDESC_PROP_";

/// Values the framework's Gradle extension supplies when the descriptor
/// references it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlutterDefaults {
    pub compile_sdk: u32,
    pub target_sdk: u32,
    pub min_sdk: u32,
    pub ndk_version: String,
    pub version_code: u32,
    pub version_name: String,
}

impl Default for FlutterDefaults {
    fn default() -> Self {
        Self {
            compile_sdk: 35,
            target_sdk: 35,
            min_sdk: 21,
            ndk_version: "27.0.12077973".to_string(),
            version_code: 1,
            version_name: "1.0".to_string(),
        }
    }
}

/// Properties available for interpolation.
#[derive(Debug, Clone, Default)]
pub struct PropertyContext {
    /// Framework extension values
    pub flutter: FlutterDefaults,
    /// local.properties entries and explicit overrides
    pub local: HashMap<String, String>,
    /// Environment variables
    pub env: HashMap<String, String>,
}

// Regex for matching ${...} references
static PROPERTY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([a-zA-Z_][a-zA-Z0-9_]*(?:\.[a-zA-Z_][a-zA-Z0-9_\-]*)*)\}")
        .expect("property pattern is valid")
});

impl PropertyContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a Java-style properties file into the local properties.
    pub fn load_properties_file(&mut self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let entries = parse_properties(&content);
        debug!(path = %path.display(), count = entries.len(), "Loaded properties file");
        self.local.extend(entries);
        Ok(())
    }

    /// Populate environment variables from the current process environment.
    /// `APPDESC_PROP_<key>` variables also become local properties.
    pub fn populate_env(&mut self) {
        for (key, value) in std::env::vars() {
            if let Some(name) = key.strip_prefix(PROPERTY_ENV_PREFIX) {
                if !name.is_empty() {
                    self.local.insert(name.to_string(), value.clone());
                }
            }
            self.env.insert(key, value);
        }
    }

    /// Set a local property.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.local.insert(name.to_string(), value.into());
    }

    /// Resolve a property name to its value.
    pub fn resolve(&self, name: &str) -> Option<String> {
        if let Some(value) = self.local.get(name) {
            return Some(value.clone());
        }

        let parts: Vec<&str> = name.split('.').collect();

        match parts.as_slice() {
            ["flutter", "compileSdkVersion"] => Some(self.flutter.compile_sdk.to_string()),
            ["flutter", "targetSdkVersion"] => Some(self.flutter.target_sdk.to_string()),
            ["flutter", "minSdkVersion"] => Some(self.flutter.min_sdk.to_string()),
            ["flutter", "ndkVersion"] => Some(self.flutter.ndk_version.clone()),
            ["flutter", "versionCode"] => Some(self.flutter.version_code.to_string()),
            ["flutter", "versionName"] => Some(self.flutter.version_name.clone()),

            ["env", var] => self.env.get(*var).cloned(),

            _ => None,
        }
    }

    /// Interpolate all references. Returns the first unresolved name on failure.
    pub fn interpolate_strict(&self, input: &str) -> Result<String, String> {
        let mut missing: Option<String> = None;
        let output = PROPERTY_REGEX.replace_all(input, |caps: &regex::Captures| {
            let name = &caps[1];
            match self.resolve(name) {
                Some(value) => value,
                None => {
                    missing.get_or_insert_with(|| name.to_string());
                    String::new()
                }
            }
        });

        match missing {
            Some(name) => Err(name),
            None => Ok(output.into_owned()),
        }
    }
}

/// Whitespace that separates keys from values in a properties file.
const PROPERTIES_WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

/// Parse a properties file with `java.util.Properties` semantics.
///
/// Lines ending in an odd number of backslashes continue on the next line
/// (its leading whitespace dropped). The key ends at the first unescaped
/// `=`, `:` or whitespace. Values keep trailing whitespace. Escapes are
/// `\t`, `\n`, `\r`, `\f`, `\uXXXX`, and `\x` for any other `x`.
pub fn parse_properties(content: &str) -> HashMap<String, String> {
    logical_lines(content)
        .iter()
        .map(|line| {
            let (key, value) = split_entry(line);
            (unescape(key), unescape(value))
        })
        .collect()
}

fn logical_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending: Option<String> = None;

    for raw in content.split('\n') {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let trimmed = raw.trim_start_matches(PROPERTIES_WHITESPACE);

        let mut line = match pending.take() {
            Some(head) => head + trimmed,
            None if trimmed.is_empty() || trimmed.starts_with(['#', '!']) => continue,
            None => trimmed.to_string(),
        };

        let trailing = line.chars().rev().take_while(|c| *c == '\\').count();
        if trailing % 2 == 1 {
            line.pop();
            pending = Some(line);
        } else {
            lines.push(line);
        }
    }

    lines.extend(pending);
    lines
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut key_end = line.len();
    let mut escaped = false;
    for (idx, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\x0c' => {
                key_end = idx;
                break;
            }
            _ => {}
        }
    }

    let rest = line[key_end..].trim_start_matches(PROPERTIES_WHITESPACE);
    let value = match rest.strip_prefix(['=', ':']) {
        Some(value) => value.trim_start_matches(PROPERTIES_WHITESPACE),
        None => rest,
    };
    (&line[..key_end], value)
}

/// Malformed `\u` escapes keep their text, minus the backslash.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut units: Vec<u16> = Vec::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            flush_utf16(&mut units, &mut out);
            out.push(c);
            continue;
        }

        let Some(escape) = chars.next() else {
            break;
        };
        if escape == 'u' {
            let hex: String = chars.by_ref().take(4).collect();
            if hex.len() == 4 && hex.chars().all(|h| h.is_ascii_hexdigit()) {
                if let Ok(unit) = u16::from_str_radix(&hex, 16) {
                    units.push(unit);
                    continue;
                }
            }
            flush_utf16(&mut units, &mut out);
            out.push('u');
            out.push_str(&hex);
            continue;
        }

        flush_utf16(&mut units, &mut out);
        out.push(match escape {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            'f' => '\x0c',
            other => other,
        });
    }

    flush_utf16(&mut units, &mut out);
    out
}

// \u escapes are UTF-16 code units; pairs decode to one char.
fn flush_utf16(units: &mut Vec<u16>, out: &mut String) {
    out.extend(
        char::decode_utf16(units.drain(..)).map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER)),
    );
}

/// Builder for creating PropertyContext.
pub struct PropertyContextBuilder {
    ctx: PropertyContext,
}

impl PropertyContextBuilder {
    pub fn new() -> Self {
        Self {
            ctx: PropertyContext::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.ctx.local.insert(key.into(), value.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.ctx.env.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> PropertyContext {
        self.ctx
    }
}

impl Default for PropertyContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flutter_defaults() {
        let ctx = PropertyContext::new();
        assert_eq!(
            ctx.interpolate_strict("${flutter.compileSdkVersion}/${flutter.targetSdkVersion}")
                .unwrap(),
            "35/35"
        );
        assert_eq!(ctx.resolve("flutter.versionName").as_deref(), Some("1.0"));
    }

    #[test]
    fn test_local_properties_override_defaults() {
        let ctx = PropertyContextBuilder::new()
            .with_property("flutter.versionCode", "42")
            .with_property("flutter.versionName", "2.3.1")
            .build();

        assert_eq!(ctx.resolve("flutter.versionCode").as_deref(), Some("42"));
        assert_eq!(
            ctx.interpolate_strict("v${flutter.versionName}").unwrap(),
            "v2.3.1"
        );
    }

    #[test]
    fn test_env_variables() {
        let ctx = PropertyContextBuilder::new()
            .with_env("KEYSTORE", "/secrets/upload.jks")
            .build();

        assert_eq!(
            ctx.interpolate_strict("${env.KEYSTORE}").unwrap(),
            "/secrets/upload.jks"
        );
    }

    #[test]
    fn test_unknown_property_is_reported() {
        let ctx = PropertyContext::new();
        assert_eq!(ctx.resolve("unknown.prop"), None);
        assert_eq!(
            ctx.interpolate_strict("x ${unknown.prop}").unwrap_err(),
            "unknown.prop"
        );
    }

    #[test]
    fn test_strict_reports_first_missing() {
        let ctx = PropertyContext::new();
        let err = ctx
            .interpolate_strict("${flutter.versionCode} ${missing.one} ${missing.two}")
            .unwrap_err();
        assert_eq!(err, "missing.one");
    }

    #[test]
    fn test_strict_passes_plain_text() {
        let ctx = PropertyContext::new();
        assert_eq!(ctx.interpolate_strict("plain").unwrap(), "plain");
    }

    #[test]
    fn test_parse_properties() {
        let content = r#"
# generated by the framework tool
sdk.dir=C\:\\Users\\dev\\Android\\sdk
flutter.sdk=/opt/flutter
flutter.versionName = 1.4.2
! another comment
flutter.versionCode:7
"#;
        let entries = parse_properties(content);
        assert_eq!(entries["sdk.dir"], r"C:\Users\dev\Android\sdk");
        assert_eq!(entries["flutter.sdk"], "/opt/flutter");
        assert_eq!(entries["flutter.versionName"], "1.4.2");
        assert_eq!(entries["flutter.versionCode"], "7");
        assert_eq!(entries.len(), 4);
    }

    #[test]
    fn test_multi_segment_keys() {
        let ctx = PropertyContextBuilder::new()
            .with_property("signing.release.store-file", "release.jks")
            .build();
        assert_eq!(
            ctx.interpolate_strict("${signing.release.store-file}").unwrap(),
            "release.jks"
        );
    }

    #[test]
    fn test_parse_properties_escapes() {
        let content = r#"
greeting=caf\u00e9 \uD83D\uDE00
multi=line one\nline two\ttabbed
path=C\:\\tools
literal=\q
"#;
        let entries = parse_properties(content);
        assert_eq!(entries["greeting"], "caf\u{e9} \u{1F600}");
        assert_eq!(entries["multi"], "line one\nline two\ttabbed");
        assert_eq!(entries["path"], r"C:\tools");
        assert_eq!(entries["literal"], "q");
    }

    #[test]
    fn test_parse_properties_whitespace_separator() {
        let content = "flutter.sdk /opt/flutter\nkey = = value\nkey\\ with\\ spaces:1\nbare\n";
        let entries = parse_properties(content);
        assert_eq!(entries["flutter.sdk"], "/opt/flutter");
        assert_eq!(entries["key"], "= value");
        assert_eq!(entries["key with spaces"], "1");
        assert_eq!(entries["bare"], "");
    }

    #[test]
    fn test_parse_properties_continuation_lines() {
        let content = concat!(
            "flutter.buildArgs=--release \\\n",
            "    --split-debug-info \\\r\n",
            "\t--obfuscate\n",
            "escaped=ends\\\\\n",
            "next=1\n",
            "# comment \\\n",
            "still.parsed=yes\n",
        );
        let entries = parse_properties(content);
        assert_eq!(
            entries["flutter.buildArgs"],
            "--release --split-debug-info --obfuscate"
        );
        assert_eq!(entries["escaped"], r"ends\");
        assert_eq!(entries["next"], "1");
        assert_eq!(entries["still.parsed"], "yes");
        assert_eq!(entries.len(), 4);
    }
}
