//! Append-only per-document version history.
//!
//! One file per document id under `.prizm/document-versions/`, holding the
//! full version list plus the body of the most recent version (earlier
//! bodies are not retained — only the version metadata is).

use std::path::Path;

use prizm_core::DocumentVersion;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::fs_store::{self, FsResult};
use crate::path_provider::document_versions_file;

#[derive(Debug, Default, Serialize, Deserialize)]
struct VersionLog {
    #[serde(default)]
    versions: Vec<DocumentVersion>,
}

/// 16-hex-character content identity hash. A cryptographic hash truncated
/// for compactness; this is used for change detection, not integrity.
pub fn content_hash(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    digest.iter().take(8).map(|b| format!("{b:02x}")).collect()
}

fn log_path(scope_root: &Path, document_id: &str) -> (std::path::PathBuf, String) {
    let path = document_versions_file(scope_root, document_id);
    let relative = path
        .strip_prefix(scope_root)
        .unwrap_or(&path)
        .to_string_lossy()
        .into_owned();
    (path, relative)
}

fn read_log(scope_root: &Path, document_id: &str) -> FsResult<VersionLog> {
    let (_, relative) = log_path(scope_root, document_id);
    match fs_store::read_file_by_path(scope_root, &relative)? {
        Some(record) => {
            let raw = record.content.unwrap_or_default();
            let (log, _) = crate::frontmatter::parse_typed::<VersionLog>(&raw);
            Ok(log.unwrap_or_default())
        }
        None => Ok(VersionLog::default()),
    }
}

fn write_log(scope_root: &Path, document_id: &str, log: &VersionLog, body: &str) -> FsResult<()> {
    let (_, relative) = log_path(scope_root, document_id);
    let raw = crate::frontmatter::emit(log, body)
        .map_err(|e| fs_store::FsStoreError::InvalidPath(e.to_string()))?;
    fs_store::write_system_file(scope_root, &relative, &raw)
}

/// Full version history for a document, oldest first.
pub fn get_version_history(scope_root: &Path, document_id: &str) -> FsResult<Vec<DocumentVersion>> {
    Ok(read_log(scope_root, document_id)?.versions)
}

/// Record a new version if `content` differs from the latest saved content
/// hash; otherwise a no-op that returns the unchanged latest version.
///
/// Per §4.6 / invariant 7: `saveVersion` with an unchanged content hash
/// never bumps the version counter.
pub fn save_version(
    scope_root: &Path,
    document_id: &str,
    title: &str,
    content: &str,
    timestamp: i64,
    changed_by: Option<String>,
    change_reason: Option<String>,
) -> FsResult<DocumentVersion> {
    let mut log = read_log(scope_root, document_id)?;
    let hash = content_hash(content);

    if let Some(latest) = log.versions.last() {
        if latest.content_hash == hash {
            return Ok(latest.clone());
        }
    }

    let mut version = match log.versions.last() {
        Some(latest) => latest.next(title, hash, timestamp),
        None => DocumentVersion::first(title, hash, timestamp),
    };
    version.changed_by = changed_by;
    version.change_reason = change_reason;
    log.versions.push(version.clone());
    write_log(scope_root, document_id, &log, content)?;
    Ok(version)
}

/// Human-readable Markdown diff between two content strings, in the style
/// the service layer surfaces to callers inspecting version history.
pub fn compute_diff(a: &str, b: &str) -> String {
    if a == b {
        return "无显著变更".to_string();
    }

    let diff = similar::TextDiff::from_lines(a, b);
    let mut added = 0usize;
    let mut removed = 0usize;
    let mut out = String::new();

    for change in diff.iter_all_changes() {
        match change.tag() {
            similar::ChangeTag::Insert => {
                added += 1;
                out.push_str("+ ");
                out.push_str(change.value());
                if !change.value().ends_with('\n') {
                    out.push('\n');
                }
            }
            similar::ChangeTag::Delete => {
                removed += 1;
                out.push_str("- ");
                out.push_str(change.value());
                if !change.value().ends_with('\n') {
                    out.push('\n');
                }
            }
            similar::ChangeTag::Equal => {}
        }
    }

    out.push_str(&format!("\n变更统计: +{added} / -{removed}\n"));
    if added > 0 {
        out.push_str("新增内容见上方 `+` 行。\n");
    }
    out
}

#[cfg(test)]
#[path = "document_version_store_tests.rs"]
mod tests;
