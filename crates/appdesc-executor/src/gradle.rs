//! Gradle wrapper executor implementation.

use appdesc_core::executor::*;
use appdesc_core::{Error, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::GradleInvocation;

/// Environment variable carrying the invocation id into the build.
pub const INVOCATION_ENV: &str = "APPDESC_INVOCATION_ID";

/// Runs the project's Gradle wrapper.
#[derive(Debug, Default)]
pub struct GradleExecutor;

impl GradleExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Executor for GradleExecutor {
    fn name(&self) -> &'static str {
        "gradle"
    }

    async fn can_execute(&self, invocation: &BuildInvocation) -> bool {
        let gradle = GradleInvocation::from_invocation(invocation);
        tokio::fs::metadata(&gradle.program)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    async fn execute(&self, invocation: &BuildInvocation, logs: LogSink) -> Result<BuildOutcome> {
        let gradle = GradleInvocation::from_invocation(invocation);
        let command_line = gradle.render();

        info!(invocation = %invocation.id, task = %invocation.task, "Starting build");
        debug!(command = %command_line, "Gradle command");
        let _ = logs.unbounded_send(LogLine::new(LogStream::System, format!("$ {}", command_line)));

        let started_at = Utc::now();
        let mut child = Command::new(&gradle.program)
            .args(&gradle.args)
            .current_dir(&invocation.project_dir)
            .env(INVOCATION_ENV, invocation.id.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                Error::ExecutionFailed(format!(
                    "failed to start {}: {}",
                    gradle.program.display(),
                    e
                ))
            })?;

        let stdout = child
            .stdout
            .take()
            .map(|out| tokio::spawn(forward_lines(out, LogStream::Stdout, logs.clone())));
        let stderr = child
            .stderr
            .take()
            .map(|err| tokio::spawn(forward_lines(err, LogStream::Stderr, logs.clone())));

        let exit = child.wait().await?;

        for task in [stdout, stderr].into_iter().flatten() {
            if let Err(e) = task.await {
                warn!(error = %e, "Log forwarding task failed");
            }
        }

        let finished_at = Utc::now();
        let status = if exit.success() {
            BuildStatus::Succeeded
        } else {
            BuildStatus::Failed {
                exit_code: exit.code(),
                message: format!("{} exited with {}", invocation.task, exit),
            }
        };

        info!(
            invocation = %invocation.id,
            success = status.is_success(),
            "Build finished"
        );

        Ok(BuildOutcome {
            invocation_id: invocation.id,
            status,
            started_at,
            finished_at,
        })
    }
}

/// Forward output line by line. Bytes that are not UTF-8 are replaced
/// rather than ending the stream.
async fn forward_lines<R>(reader: R, stream: LogStream, logs: LogSink)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let content = String::from_utf8_lossy(&buf);
                let content = content.trim_end_matches(['\n', '\r']);
                if logs.unbounded_send(LogLine::new(stream, content)).is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!(error = %e, "Log stream error");
                break;
            }
        }
    }
}
