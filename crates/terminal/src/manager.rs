//! Interactive terminal sessions, backed by tmux panes (§4.14).
//!
//! A `TerminalManager` is one per process, shared across scopes: terminal
//! ids are process-unique regardless of which scope or session spawned
//! them, the same way the tmux session names this module creates are
//! unique on the host.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use prizm_core::Clock;
use thiserror::Error;
use tokio::process::Command;

use crate::ansi::strip_ansi;

/// Tail length a `send_keys`/read-back response is truncated to, per §4.14
/// ("truncated to ~8 KiB tail").
const TAIL_BYTES: usize = 8 * 1024;

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("terminal {0} not found")]
    NotFound(String),
    #[error("tmux command failed: {0}")]
    Tmux(String),
    #[error("working directory does not exist: {}", .0.display())]
    MissingCwd(PathBuf),
}

pub type TerminalResult<T> = Result<T, TerminalError>;

struct Handle {
    session_id: String,
    tmux_target: String,
    /// Length, in bytes of the ANSI-stripped pane history, already
    /// delivered to a prior `send_keys`/`recent_output` call. §5: readers
    /// snapshot a length and read up to it.
    last_read_len: AtomicUsize,
}

/// Registry of live interactive terminals. Terminal ids are process-local
/// monotonic counters; the tmux session name embeds the id so a restart
/// never collides with a still-running pane from a previous process.
pub struct TerminalManager {
    next_id: AtomicU64,
    handles: Mutex<HashMap<String, Handle>>,
    clock: prizm_core::SharedClock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendKeysOutcome {
    /// Pane output produced since the last read, ANSI-stripped and
    /// truncated to the tail.
    pub output: String,
}

impl TerminalManager {
    pub fn new(clock: prizm_core::SharedClock) -> Self {
        Self {
            next_id: AtomicU64::new(1),
            handles: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn tmux_target_for(&self, terminal_id: &str) -> String {
        format!("prizm-{terminal_id}")
    }

    /// Spawn a long-lived interactive pane in `cwd`, owned by `session_id`.
    /// Returns the new terminal's id.
    pub async fn spawn_interactive(&self, session_id: &str, cwd: &Path, shell: Option<&str>) -> TerminalResult<String> {
        if !cwd.exists() {
            return Err(TerminalError::MissingCwd(cwd.to_path_buf()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        let target = self.tmux_target_for(&id);

        let mut cmd = Command::new("tmux");
        cmd.args(["new-session", "-d", "-s", &target, "-c"]).arg(cwd);
        if let Some(shell) = shell {
            cmd.arg(shell);
        }
        let output = cmd.output().await.map_err(|e| TerminalError::Tmux(e.to_string()))?;
        if !output.status.success() {
            return Err(TerminalError::Tmux(String::from_utf8_lossy(&output.stderr).into_owned()));
        }

        self.handles.lock().insert(
            id.clone(),
            Handle {
                session_id: session_id.to_string(),
                tmux_target: target,
                last_read_len: AtomicUsize::new(0),
            },
        );
        Ok(id)
    }

    fn target_of(&self, terminal_id: &str) -> TerminalResult<String> {
        let handles = self.handles.lock();
        handles
            .get(terminal_id)
            .map(|h| h.tmux_target.clone())
            .ok_or_else(|| TerminalError::NotFound(terminal_id.to_string()))
    }

    /// Write raw bytes into the pane without interpreting them as key
    /// names (tmux `send-keys -l`).
    pub async fn write_to_terminal(&self, terminal_id: &str, bytes: &[u8]) -> TerminalResult<()> {
        let target = self.target_of(terminal_id)?;
        let text = String::from_utf8_lossy(bytes).into_owned();
        let output = Command::new("tmux")
            .args(["send-keys", "-t", &target, "-l", "--", &text])
            .output()
            .await
            .map_err(|e| TerminalError::Tmux(e.to_string()))?;
        if !output.status.success() {
            return Err(TerminalError::Tmux(String::from_utf8_lossy(&output.stderr).into_owned()));
        }
        Ok(())
    }

    /// Capture the full pane history, ANSI-stripped, without consuming the
    /// read offset `send_keys` maintains.
    pub async fn get_recent_output(&self, terminal_id: &str) -> TerminalResult<String> {
        let target = self.target_of(terminal_id)?;
        let raw = self.capture_pane(&target).await?;
        Ok(tail(&raw, TAIL_BYTES))
    }

    async fn capture_pane(&self, target: &str) -> TerminalResult<String> {
        let output = Command::new("tmux")
            .args(["capture-pane", "-t", target, "-p", "-S", "-"])
            .output()
            .await
            .map_err(|e| TerminalError::Tmux(e.to_string()))?;
        if !output.status.success() {
            return Err(TerminalError::Tmux(String::from_utf8_lossy(&output.stderr).into_owned()));
        }
        Ok(strip_ansi(&String::from_utf8_lossy(&output.stdout)))
    }

    /// Type `keys` into the pane, optionally press Enter, wait `wait_ms`,
    /// then return the diff of pane output produced since the previous
    /// `send_keys`/`get_recent_output` call on this terminal (§4.14).
    pub async fn send_keys(&self, terminal_id: &str, keys: &str, press_enter: bool, wait_ms: u64) -> TerminalResult<SendKeysOutcome> {
        let target = self.target_of(terminal_id)?;
        if !keys.is_empty() {
            self.write_to_terminal(terminal_id, keys.as_bytes()).await?;
        }
        if press_enter {
            let output = Command::new("tmux")
                .args(["send-keys", "-t", &target, "Enter"])
                .output()
                .await
                .map_err(|e| TerminalError::Tmux(e.to_string()))?;
            if !output.status.success() {
                return Err(TerminalError::Tmux(String::from_utf8_lossy(&output.stderr).into_owned()));
            }
        }
        if wait_ms > 0 {
            tokio::time::sleep(Duration::from_millis(wait_ms)).await;
        }

        let full = self.capture_pane(&target).await?;
        let prior_len = {
            let handles = self.handles.lock();
            handles
                .get(terminal_id)
                .map(|h| h.last_read_len.load(Ordering::SeqCst))
                .unwrap_or(0)
        };
        let diff = if full.len() >= prior_len { &full[prior_len..] } else { full.as_str() };
        {
            let handles = self.handles.lock();
            if let Some(h) = handles.get(terminal_id) {
                h.last_read_len.store(full.len(), Ordering::SeqCst);
            }
        }
        let _ = self.clock.now_ms();
        Ok(SendKeysOutcome {
            output: tail(diff, TAIL_BYTES),
        })
    }

    /// Tear down one terminal regardless of owner.
    pub async fn close_terminal(&self, terminal_id: &str) -> TerminalResult<()> {
        let target = self.target_of(terminal_id)?;
        let _ = Command::new("tmux").args(["kill-session", "-t", &target]).output().await;
        self.handles.lock().remove(terminal_id);
        Ok(())
    }

    /// Tear down every terminal owned by a session (§4.14: terminals are
    /// torn down with their owning session).
    pub async fn close_all_for_session(&self, session_id: &str) {
        let ids: Vec<String> = {
            let handles = self.handles.lock();
            handles
                .iter()
                .filter(|(_, h)| h.session_id == session_id)
                .map(|(id, _)| id.clone())
                .collect()
        };
        for id in ids {
            let _ = self.close_terminal(&id).await;
        }
    }

    pub fn terminal_count(&self) -> usize {
        self.handles.lock().len()
    }
}

fn tail(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        return s.to_string();
    }
    let start = s.len() - max_bytes;
    let mut boundary = start;
    while boundary < s.len() && !s.is_char_boundary(boundary) {
        boundary += 1;
    }
    s[boundary..].to_string()
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
