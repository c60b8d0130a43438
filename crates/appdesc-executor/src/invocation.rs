//! Translation of a build invocation into a Gradle wrapper command line.

use appdesc_core::BuildConfig;
use appdesc_core::executor::BuildInvocation;
use std::path::PathBuf;

/// Prefix of the `-P` project properties handed to the build.
pub const PROPERTY_PREFIX: &str = "appdesc";

/// A fully rendered Gradle wrapper command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradleInvocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl GradleInvocation {
    /// Platform-specific wrapper script name.
    pub fn wrapper_name() -> &'static str {
        if cfg!(windows) { "gradlew.bat" } else { "gradlew" }
    }

    pub fn from_invocation(invocation: &BuildInvocation) -> Self {
        Self {
            program: invocation.project_dir.join(Self::wrapper_name()),
            args: build_args(&invocation.config, &invocation.task),
        }
    }

    /// The command as a single shell-quoted line.
    pub fn render(&self) -> String {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().cloned())
            .map(|arg| shell_quote(&arg))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Task followed by `-P` properties carrying the resolved configuration.
pub fn build_args(config: &BuildConfig, task: &str) -> Vec<String> {
    let mut props: Vec<(&str, String)> = vec![
        ("applicationId", config.application_id.clone()),
        ("namespace", config.namespace.clone()),
        ("minSdk", config.sdk.min.to_string()),
        ("targetSdk", config.sdk.target.to_string()),
        ("compileSdk", config.sdk.compile.to_string()),
        ("versionCode", config.version_code.to_string()),
        ("versionName", config.version_name.clone()),
        ("signingConfig", config.signing_config_ref.clone()),
        ("sourceRoot", config.source_root.display().to_string()),
        ("plugins", config.plugin_ids().join(",")),
    ];
    if let Some(ndk) = &config.ndk_version {
        props.push(("ndkVersion", ndk.clone()));
    }

    std::iter::once(task.to_string())
        .chain(
            props
                .into_iter()
                .map(|(key, value)| format!("-P{}.{}={}", PROPERTY_PREFIX, key, value)),
        )
        .collect()
}

fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,@+".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_config;

    #[test]
    fn test_args_start_with_task() {
        let args = build_args(&sample_config(), "bundleRelease");
        assert_eq!(args[0], "bundleRelease");
        assert!(args.contains(&"-Pappdesc.applicationId=com.example.app".to_string()));
        assert!(args.contains(&"-Pappdesc.minSdk=27".to_string()));
        assert!(args.contains(&"-Pappdesc.signingConfig=debug".to_string()));
    }

    #[test]
    fn test_plugins_passed_in_application_order() {
        let args = build_args(&sample_config(), "assembleRelease");
        let plugins = [
            "com.android.application",
            "dev.flutter.flutter-gradle-plugin",
            "com.google.gms.google-services",
        ];
        assert!(args.contains(&format!("-Pappdesc.plugins={}", plugins.join(","))));
    }

    #[test]
    fn test_ndk_version_only_when_pinned() {
        let args = build_args(&sample_config(), "assembleRelease");
        assert!(!args.iter().any(|a| a.starts_with("-Pappdesc.ndkVersion")));
    }

    #[test]
    fn test_render_quotes_spaces() {
        let invocation = BuildInvocation::new(sample_config(), "assembleRelease", "/work/android");
        let gradle = GradleInvocation::from_invocation(&invocation);
        let rendered = gradle.render();

        assert!(rendered.contains("assembleRelease"));
        assert!(rendered.contains("'-Pappdesc.versionName=1.0 beta'"));
        assert_eq!(
            gradle.program,
            PathBuf::from("/work/android").join(GradleInvocation::wrapper_name())
        );
    }

    #[test]
    fn test_shell_quote_escapes_single_quotes() {
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("plain-arg"), "plain-arg");
    }
}
