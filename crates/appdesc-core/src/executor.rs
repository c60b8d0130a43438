//! Executor trait and build invocation types.
//!
//! Executors hand a validated `BuildConfig` to the external build tool.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::channel::mpsc::UnboundedSender;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{BuildConfig, InvocationId, Result};

/// Default task run when none is given.
pub const DEFAULT_TASK: &str = "assembleRelease";

/// One build invocation. The configuration travels with the invocation
/// instead of living in any process-wide state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildInvocation {
    pub id: InvocationId,
    pub config: BuildConfig,
    /// Build tool task to run (e.g. "assembleRelease").
    pub task: String,
    /// Directory holding the build tool wrapper.
    pub project_dir: PathBuf,
}

impl BuildInvocation {
    pub fn new(
        config: BuildConfig,
        task: impl Into<String>,
        project_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id: InvocationId::new(),
            config,
            task: task.into(),
            project_dir: project_dir.into(),
        }
    }
}

/// Final state of an invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildStatus {
    Succeeded,
    Failed {
        exit_code: Option<i32>,
        message: String,
    },
}

impl BuildStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildStatus::Succeeded)
    }
}

/// Result of a finished invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildOutcome {
    pub invocation_id: InvocationId,
    pub status: BuildStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// A line of build output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogLine {
    pub timestamp: DateTime<Utc>,
    pub stream: LogStream,
    pub content: String,
}

impl LogLine {
    pub fn new(stream: LogStream, content: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            stream,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogStream {
    Stdout,
    Stderr,
    System,
}

/// Where executors send output lines. Dropping the sender ends the stream.
pub type LogSink = UnboundedSender<LogLine>;

/// Trait for build executors.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Name of this executor.
    fn name(&self) -> &'static str;

    /// Check if this executor can run the given invocation.
    async fn can_execute(&self, invocation: &BuildInvocation) -> bool;

    /// Run the invocation to completion, streaming output into `logs`.
    async fn execute(&self, invocation: &BuildInvocation, logs: LogSink) -> Result<BuildOutcome>;
}
