//! One-shot command execution (§4.14 "exec" mode).

use std::path::Path;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;

/// Hard ceiling on any exec timeout, regardless of what a caller requests.
pub const MAX_EXEC_TIMEOUT: Duration = Duration::from_secs(300);

/// Timeout used when a caller doesn't specify one.
pub const DEFAULT_EXEC_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to spawn command: {0}")]
    Spawn(#[source] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutcome {
    pub output: String,
    pub exit_code: Option<i32>,
    pub timed_out: bool,
}

/// Run `command` through the platform shell in `cwd`, capped to
/// `min(requested_timeout, MAX_EXEC_TIMEOUT)`. Combines stdout and stderr
/// in the order the shell produced them is not attempted — they are
/// concatenated stdout-then-stderr, matching a simple captured-output model
/// rather than an interleaved tty.
pub async fn exec(cwd: &Path, command: &str, requested_timeout: Duration) -> Result<ExecOutcome, ExecError> {
    let timeout = requested_timeout.min(MAX_EXEC_TIMEOUT);

    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command).current_dir(cwd);
    cmd.kill_on_drop(true);

    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.is_empty() {
                if !combined.is_empty() && !combined.ends_with('\n') {
                    combined.push('\n');
                }
                combined.push_str(&stderr);
            }
            Ok(ExecOutcome {
                output: combined,
                exit_code: output.status.code(),
                timed_out: false,
            })
        }
        Ok(Err(e)) => Err(ExecError::Spawn(e)),
        Err(_elapsed) => Ok(ExecOutcome {
            output: String::new(),
            exit_code: None,
            timed_out: true,
        }),
    }
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
