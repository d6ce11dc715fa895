//! Per-session pre-mutation snapshots, consumed by a later revert.
//!
//! Keyed by the synthetic checkpoint key a [`prizm_core::ResourceRef`]
//! produces (`[doc:<id>]`, `[todo:<id>]`, …); captured before a service
//! mutation, overwritten by the next capture for the same key.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::fs_store::{self, FsResult};
use crate::path_provider::session_checkpoints_file;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckpointAction {
    Create,
    Update,
    Delete,
    Modify,
    CreateList,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub action: CheckpointAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_before: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_snapshot: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_path: Option<String>,
}

type CheckpointMap = HashMap<String, Checkpoint>;

fn read_map(scope_root: &Path, session_id: &str) -> FsResult<CheckpointMap> {
    let path = session_checkpoints_file(scope_root, session_id);
    match std::fs::read_to_string(&path) {
        Ok(raw) => Ok(serde_json::from_str(&raw).unwrap_or_default()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(CheckpointMap::default()),
        Err(e) => Err(e.into()),
    }
}

fn write_map(scope_root: &Path, session_id: &str, map: &CheckpointMap) -> FsResult<()> {
    let path = session_checkpoints_file(scope_root, session_id);
    let relative = path
        .strip_prefix(scope_root)
        .unwrap_or(&path)
        .to_string_lossy()
        .into_owned();
    let raw = serde_json::to_string_pretty(map)
        .map_err(|e| fs_store::FsStoreError::InvalidPath(e.to_string()))?;
    fs_store::write_system_file(scope_root, &relative, &raw)
}

/// Capture a checkpoint before a mutation, overwriting any prior checkpoint
/// for the same key.
pub fn capture(scope_root: &Path, session_id: &str, key: &str, checkpoint: Checkpoint) -> FsResult<()> {
    let mut map = read_map(scope_root, session_id)?;
    map.insert(key.to_string(), checkpoint);
    write_map(scope_root, session_id, &map)
}

/// Look up the most recently captured checkpoint for a key, without
/// consuming it.
pub fn peek(scope_root: &Path, session_id: &str, key: &str) -> FsResult<Option<Checkpoint>> {
    Ok(read_map(scope_root, session_id)?.remove(key))
}

/// Consume the checkpoint for a key, so a second revert attempt observes
/// nothing to revert to.
pub fn take(scope_root: &Path, session_id: &str, key: &str) -> FsResult<Option<Checkpoint>> {
    let mut map = read_map(scope_root, session_id)?;
    let taken = map.remove(key);
    if taken.is_some() {
        write_map(scope_root, session_id, &map)?;
    }
    Ok(taken)
}

#[cfg(test)]
#[path = "checkpoint_store_tests.rs"]
mod tests;
