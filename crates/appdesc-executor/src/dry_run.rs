//! Executor that only reports what would run.

use appdesc_core::Result;
use appdesc_core::executor::*;
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::GradleInvocation;

/// Renders the Gradle invocation without starting it.
#[derive(Debug, Default)]
pub struct DryRunExecutor;

impl DryRunExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Executor for DryRunExecutor {
    fn name(&self) -> &'static str {
        "dry-run"
    }

    async fn can_execute(&self, _invocation: &BuildInvocation) -> bool {
        true
    }

    async fn execute(&self, invocation: &BuildInvocation, logs: LogSink) -> Result<BuildOutcome> {
        let started_at = Utc::now();
        let gradle = GradleInvocation::from_invocation(invocation);
        info!(invocation = %invocation.id, "Dry run");

        let _ = logs.unbounded_send(LogLine::new(
            LogStream::System,
            format!("would run: {}", gradle.render()),
        ));
        for (position, plugin) in invocation.config.plugins.iter().enumerate() {
            let _ = logs.unbounded_send(LogLine::new(
                LogStream::System,
                format!("plugin {}: {}", position + 1, plugin.id),
            ));
        }

        Ok(BuildOutcome {
            invocation_id: invocation.id,
            status: BuildStatus::Succeeded,
            started_at,
            finished_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_config;
    use futures::StreamExt;
    use futures::channel::mpsc;

    #[tokio::test]
    async fn test_dry_run_reports_command_and_plugins() {
        let invocation = BuildInvocation::new(sample_config(), DEFAULT_TASK, "/work/android");
        let (tx, rx) = mpsc::unbounded();

        let outcome = DryRunExecutor::new().execute(&invocation, tx).await.unwrap();
        assert!(outcome.status.is_success());
        assert_eq!(outcome.invocation_id, invocation.id);

        let lines: Vec<LogLine> = rx.collect().await;
        assert_eq!(lines.len(), 4);
        assert!(lines[0].content.starts_with("would run: "));
        assert!(lines[0].content.contains("assembleRelease"));
        assert_eq!(lines[3].content, "plugin 3: com.google.gms.google-services");
        assert!(lines.iter().all(|l| l.stream == LogStream::System));
    }

    #[tokio::test]
    async fn test_dry_run_always_available() {
        let invocation = BuildInvocation::new(sample_config(), DEFAULT_TASK, "/nowhere");
        assert!(DryRunExecutor::new().can_execute(&invocation).await);
    }
}
