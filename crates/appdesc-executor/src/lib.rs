//! Build tool hand-off for appdesc.
//!
//! Provides executor implementations that pass a validated configuration
//! to the external build tool:
//! - Gradle wrapper (real builds)
//! - Dry run (prints the invocation)

pub mod dry_run;
pub mod gradle;
pub mod invocation;

pub use appdesc_core::executor::{
    BuildInvocation, BuildOutcome, BuildStatus, DEFAULT_TASK, Executor, LogLine, LogSink,
    LogStream,
};
pub use dry_run::DryRunExecutor;
pub use gradle::GradleExecutor;
pub use invocation::GradleInvocation;
