//! Build hand-off command.

use anyhow::{Context, Result};
use appdesc_executor::{
    BuildInvocation, BuildStatus, DryRunExecutor, Executor, GradleExecutor, GradleInvocation,
    LogLine, LogStream,
};
use futures::StreamExt;
use futures::channel::mpsc;
use std::path::{Path, PathBuf};

use super::{LoadOptions, load};

/// Load the descriptor and run the build tool with the resulting configuration.
pub async fn run(
    path: &str,
    options: &LoadOptions,
    task: &str,
    project_dir: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let config = load(path, options)?;
    println!("Building {} ({})", config.application_id, config.version_name);

    let project_dir = resolve_project_dir(Path::new(path), project_dir.map(PathBuf::from));
    println!("Project directory: {}", project_dir.display());

    let invocation = BuildInvocation::new(config, task, project_dir);

    let executor: Box<dyn Executor> = if dry_run {
        Box::new(DryRunExecutor::new())
    } else {
        Box::new(GradleExecutor::new())
    };

    if !executor.can_execute(&invocation).await {
        let gradle = GradleInvocation::from_invocation(&invocation);
        anyhow::bail!(
            "No Gradle wrapper at {} (use --project-dir or --dry-run)",
            gradle.program.display()
        );
    }

    println!("\n--- Starting {} ({}) ---\n", invocation.task, executor.name());

    let (tx, mut rx) = mpsc::unbounded::<LogLine>();
    let printer = async {
        while let Some(line) = rx.next().await {
            let marker = match line.stream {
                LogStream::Stdout => " ",
                LogStream::Stderr => "!",
                LogStream::System => "*",
            };
            println!("{} {}", marker, line.content);
        }
    };

    let (outcome, ()) = tokio::join!(executor.execute(&invocation, tx), printer);
    let outcome = outcome.context("Build execution failed")?;

    let elapsed = outcome.finished_at - outcome.started_at;
    match outcome.status {
        BuildStatus::Succeeded => {
            println!(
                "\n✓ Build succeeded in {:.1}s",
                elapsed.num_milliseconds() as f64 / 1000.0
            );
            Ok(())
        }
        BuildStatus::Failed { exit_code, message } => {
            println!("\n✗ Build failed (exit code {:?})", exit_code);
            anyhow::bail!("{}", message);
        }
    }
}

/// The explicit directory, else the nearest of the descriptor's directory
/// and its parent that holds a Gradle wrapper, else the descriptor's directory.
pub fn resolve_project_dir(descriptor: &Path, explicit: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }

    let base = super::descriptor_dir(descriptor);
    base.ancestors()
        .take(2)
        .find(|dir| dir.join(GradleInvocation::wrapper_name()).is_file())
        .unwrap_or(base)
        .to_path_buf()
}
