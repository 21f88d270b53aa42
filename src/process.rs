//! Subprocess abstraction for invoking a local model runner.
//!
//! The inference client falls back to running the model as a local process
//! (e.g. `ollama run <model> <prompt>`) when the network endpoint is
//! unavailable. Spawning sits behind [`ProcessRunner`] so tests never start
//! real processes.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

// =============================================================================
// Traits for Dependency Injection
// =============================================================================

/// Trait for running system processes.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Executes `program` with `args`, waiting at most `timeout`.
    ///
    /// Arguments are passed directly to the process, never through a shell.
    async fn run(&self, program: &str, args: &[&str], timeout: Duration) -> Result<Output>;

    /// Checks if a program exists in PATH.
    fn program_exists(&self, program: &str) -> bool;
}

// =============================================================================
// Default Implementations
// =============================================================================

/// Default process runner using `tokio::process::Command`.
pub struct SystemProcessRunner;

#[async_trait]
impl ProcessRunner for SystemProcessRunner {
    async fn run(&self, program: &str, args: &[&str], timeout: Duration) -> Result<Output> {
        debug!("Spawning {} with {} argument(s)", program, args.len());

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(output) => Ok(output?),
            Err(_) => Err(anyhow!("{} timed out after {:?}", program, timeout)),
        }
    }

    fn program_exists(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_exists_for_missing_program() {
        let runner = SystemProcessRunner;
        assert!(!runner.program_exists("codeforge-definitely-not-installed"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_captures_stdout() {
        let runner = SystemProcessRunner;
        let output = runner
            .run("echo", &["hello", "world"], Duration::from_secs(5))
            .await
            .unwrap();

        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), "hello world\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_passes_quotes_verbatim() {
        let runner = SystemProcessRunner;
        let output = runner
            .run("echo", &["say \"hi\""], Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(String::from_utf8_lossy(&output.stdout), "say \"hi\"\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_times_out() {
        let runner = SystemProcessRunner;
        let result = runner.run("sleep", &["5"], Duration::from_millis(50)).await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }
}
