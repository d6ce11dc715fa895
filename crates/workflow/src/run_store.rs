//! Durable persistence of [`RunState`] (§4.16, §REDESIGN: "Coroutine
//! control flow... modeled as a resumable state machine. State is a durable
//! record... written to disk after every transition").
//!
//! One JSON file per run, under the workflow's system directory — same
//! write-tmp-then-rename discipline `prizm_store::fs_store` uses for every
//! other system file, reused directly rather than re-derived here.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use prizm_core::RunId;
use prizm_store::fs_store;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunStoreError {
    #[error(transparent)]
    Store(#[from] fs_store::FsStoreError),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

pub type RunStoreResult<T> = Result<T, RunStoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Pending,
    Running,
    AwaitingApproval,
    Completed,
    Failed,
    Cancelled,
}

impl RunStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Failed | RunStatus::Cancelled)
    }
}

/// One step's recorded outcome, folded into later steps' bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepBinding {
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<String>,
}

/// The durable record described by the redesign note: `{runId, currentStep,
/// bindings, status, resumeToken?}`, plus the bookkeeping needed to apply
/// retry/backoff and report progress without re-deriving it from the def.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub run_id: RunId,
    pub workflow_name: String,
    pub current_step_index: usize,
    pub current_step_name: String,
    pub status: RunStatus,
    #[serde(default)]
    pub resume_token: Option<String>,
    #[serde(default)]
    pub bindings: HashMap<String, StepBinding>,
    #[serde(default)]
    pub args: HashMap<String, String>,
    #[serde(default)]
    pub attempt: u32,
    #[serde(default)]
    pub error: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

fn runs_dir(scope_root: &Path, workflow_name: &str) -> PathBuf {
    prizm_store::path_provider::workflow_dir(scope_root, workflow_name).join("runs")
}

fn run_file(scope_root: &Path, workflow_name: &str, run_id: &str) -> PathBuf {
    runs_dir(scope_root, workflow_name).join(format!("{run_id}.json"))
}

fn relative_run_file(scope_root: &Path, workflow_name: &str, run_id: &str) -> String {
    let absolute = run_file(scope_root, workflow_name, run_id);
    absolute
        .strip_prefix(scope_root)
        .unwrap_or(&absolute)
        .to_string_lossy()
        .into_owned()
}

pub fn save(scope_root: &Path, state: &RunState) -> RunStoreResult<()> {
    let relative = relative_run_file(scope_root, &state.workflow_name, state.run_id.as_str());
    let json = serde_json::to_string_pretty(state)?;
    fs_store::write_system_file(scope_root, &relative, &json)?;
    Ok(())
}

pub fn load(scope_root: &Path, workflow_name: &str, run_id: &str) -> RunStoreResult<Option<RunState>> {
    let relative = relative_run_file(scope_root, workflow_name, run_id);
    match fs_store::read_file_by_path(scope_root, &relative)? {
        Some(record) => {
            let content = record.content.unwrap_or_default();
            Ok(Some(serde_json::from_str(&content)?))
        }
        None => Ok(None),
    }
}

/// All runs for one workflow, most recently updated first.
pub fn list(scope_root: &Path, workflow_name: &str) -> RunStoreResult<Vec<RunState>> {
    let dir = runs_dir(scope_root, workflow_name);
    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(fs_store::FsStoreError::Io(e).into()),
    };
    let mut out = Vec::new();
    for entry in entries {
        let entry = entry.map_err(fs_store::FsStoreError::Io)?;
        if entry.path().extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let content = std::fs::read_to_string(entry.path()).map_err(fs_store::FsStoreError::Io)?;
        out.push(serde_json::from_str(&content)?);
    }
    out.sort_by_key(|r: &RunState| std::cmp::Reverse(r.updated_at));
    Ok(out)
}

#[cfg(test)]
#[path = "run_store_tests.rs"]
mod tests;
