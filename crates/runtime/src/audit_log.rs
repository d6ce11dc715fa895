//! Append-only per-session audit trail (§4.10).
//!
//! Callers resolve the destination file themselves — typically
//! `prizm_store::path_provider::session_audit_file` — so this crate never
//! needs a dependency on the storage sandbox to write one.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Read,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditResult {
    Success,
    Denied,
    Error,
    Cancelled,
}

/// One line of the append-only audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub timestamp: i64,
    pub tool_name: String,
    pub action: AuditAction,
    pub resource_type: String,
    pub resource_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub result: AuditResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Append-only JSONL audit trail, one file per agent session.
#[derive(Debug, Default, Clone, Copy)]
pub struct AuditLog;

impl AuditLog {
    pub fn new() -> Self {
        Self
    }

    /// Append one record as a JSON line, creating parent directories and the
    /// file itself as needed. Never rewrites or reorders prior records.
    pub fn append(&self, path: &Path, record: &AuditRecord) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let line = serde_json::to_string(record)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    /// Read every record back, oldest first. A corrupt line is skipped
    /// rather than failing the whole read — the same "never errors on a
    /// single bad record" posture the frontmatter codec takes.
    pub fn read_all(&self, path: &Path) -> std::io::Result<Vec<AuditRecord>> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        Ok(raw
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect())
    }
}

#[cfg(test)]
#[path = "audit_log_tests.rs"]
mod tests;
