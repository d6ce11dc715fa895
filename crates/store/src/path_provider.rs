//! Pure functions mapping scope-relative identifiers to absolute paths.
//!
//! Nothing here touches the filesystem; every function is a string/path
//! computation so callers can unit test path layout without a tempdir.

use std::path::{Path, PathBuf};

/// The system-owned subtree name. Anything whose normalized relative path
/// starts with this (or equals it) is classified as system space.
pub const SYSTEM_DIR: &str = ".prizm";

pub fn scope_config_path(scope_root: &Path) -> PathBuf {
    scope_root.join(SYSTEM_DIR).join("scope.json")
}

pub fn clipboard_dir(scope_root: &Path) -> PathBuf {
    scope_root.join(SYSTEM_DIR).join("clipboard")
}

pub fn clipboard_item_path(scope_root: &Path, item_id: &str) -> PathBuf {
    clipboard_dir(scope_root).join(format!("{item_id}.md"))
}

pub fn scope_token_usage_path(scope_root: &Path) -> PathBuf {
    scope_root.join(SYSTEM_DIR).join("token_usage.md")
}

pub fn agent_sessions_dir(scope_root: &Path) -> PathBuf {
    scope_root.join(SYSTEM_DIR).join("agent-sessions")
}

pub fn session_dir(scope_root: &Path, session_id: &str) -> PathBuf {
    agent_sessions_dir(scope_root).join(session_id)
}

pub fn session_file(scope_root: &Path, session_id: &str) -> PathBuf {
    session_dir(scope_root, session_id).join("session.md")
}

pub fn session_summary_file(scope_root: &Path, session_id: &str) -> PathBuf {
    session_dir(scope_root, session_id).join("summary.md")
}

pub fn session_token_usage_file(scope_root: &Path, session_id: &str) -> PathBuf {
    session_dir(scope_root, session_id).join("token_usage.md")
}

pub fn session_activities_file(scope_root: &Path, session_id: &str) -> PathBuf {
    session_dir(scope_root, session_id).join("activities.json")
}

pub fn session_memories_file(scope_root: &Path, session_id: &str) -> PathBuf {
    session_dir(scope_root, session_id).join("memories.md")
}

pub fn session_workspace_dir(scope_root: &Path, session_id: &str) -> PathBuf {
    session_dir(scope_root, session_id).join("workspace")
}

pub fn workflows_dir(scope_root: &Path) -> PathBuf {
    scope_root.join(SYSTEM_DIR).join("workflows")
}

pub fn workflow_dir(scope_root: &Path, workflow_name: &str) -> PathBuf {
    workflows_dir(scope_root).join(workflow_name)
}

pub fn workflow_workspace_dir(scope_root: &Path, workflow_name: &str) -> PathBuf {
    workflow_dir(scope_root, workflow_name).join("workspace")
}

pub fn run_workspaces_dir(scope_root: &Path, workflow_name: &str) -> PathBuf {
    workflow_dir(scope_root, workflow_name).join("run-workspaces")
}

pub fn run_workspace_dir(scope_root: &Path, workflow_name: &str, run_id: &str) -> PathBuf {
    run_workspaces_dir(scope_root, workflow_name).join(run_id)
}

/// Path (relative to a scope root) a registered workflow's YAML definition
/// is persisted at, so `register` survives past the process that ran it.
pub fn workflow_def_relative_path(workflow_name: &str) -> String {
    format!("{SYSTEM_DIR}/workflows/{workflow_name}/def.yaml")
}

pub fn document_versions_dir(scope_root: &Path) -> PathBuf {
    scope_root.join(SYSTEM_DIR).join("document-versions")
}

pub fn document_versions_file(scope_root: &Path, document_id: &str) -> PathBuf {
    document_versions_dir(scope_root).join(format!("{document_id}.md"))
}

/// Per-session checkpoint store: pre-mutation snapshots consumed by revert.
pub fn session_checkpoints_file(scope_root: &Path, session_id: &str) -> PathBuf {
    session_dir(scope_root, session_id).join("checkpoints.json")
}

/// Per-session append-only audit trail (§4.10).
pub fn session_audit_file(scope_root: &Path, session_id: &str) -> PathBuf {
    session_dir(scope_root, session_id).join("audit.jsonl")
}

/// True if a normalized relative path falls under the system-owned subtree.
pub fn is_system_path(relative_path: &str) -> bool {
    let normalized = relative_path.trim_start_matches("./");
    normalized == SYSTEM_DIR || normalized.starts_with(&format!("{SYSTEM_DIR}/"))
}

#[cfg(test)]
#[path = "path_provider_tests.rs"]
mod tests;
