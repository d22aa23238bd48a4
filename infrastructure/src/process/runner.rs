//! Tokio-based command runner

use async_trait::async_trait;
use cloudcorp_application::{CommandError, CommandInvocation, CommandOutput, CommandRunner};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Runs commands as child processes without a shell.
///
/// Children are killed when their future is dropped, so a timed-out or
/// cancelled lookup does not leave a stray `aws`/`gcloud` process behind.
#[derive(Debug, Clone, Default)]
pub struct ProcessCommandRunner {
    timeout: Option<Duration>,
}

impl ProcessCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound every invocation by `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check if a CLI command is available
    pub fn is_command_available(program: &str) -> bool {
        which::which(program).is_ok()
    }
}

#[async_trait]
impl CommandRunner for ProcessCommandRunner {
    async fn run(&self, invocation: &CommandInvocation) -> Result<CommandOutput, CommandError> {
        let program = which::which(&invocation.program)
            .map_err(|_| CommandError::NotInstalled(invocation.program.clone()))?;

        debug!("Running {}", invocation.command_line());

        let mut cmd = Command::new(program);
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let spawn_error = |e: std::io::Error| CommandError::Spawn {
            program: invocation.program.clone(),
            message: e.to_string(),
        };

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| CommandError::Timeout {
                    program: invocation.program.clone(),
                    after: limit,
                })?
                .map_err(spawn_error)?,
            None => cmd.output().await.map_err(spawn_error)?,
        };

        let result = CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(
            "{} exited with {:?} ({} bytes stdout)",
            invocation.program,
            result.exit_code,
            result.stdout.len()
        );
        Ok(result)
    }
}
