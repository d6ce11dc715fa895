//! Append-only token-usage logs.
//!
//! Unlike the title-driven entity families, a token-usage log is one file
//! per scope (or per session) holding the whole record list in its
//! frontmatter — there is nothing to scan for and nothing to rename.

use std::path::Path;

use prizm_core::TokenUsageRecord;
use serde::{Deserialize, Serialize};

use crate::fs_store::{self, FsResult};
use crate::path_provider::{scope_token_usage_path, session_token_usage_file};

#[derive(Debug, Default, Serialize, Deserialize)]
struct TokenUsageLog {
    #[serde(default)]
    records: Vec<TokenUsageRecord>,
}

fn read_log(scope_root: &Path, path: &std::path::Path) -> FsResult<TokenUsageLog> {
    let relative = path
        .strip_prefix(scope_root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned();
    match fs_store::read_file_by_path(scope_root, &relative)? {
        Some(record) => {
            let raw = record.content.unwrap_or_default();
            let (log, _) = crate::frontmatter::parse_typed::<TokenUsageLog>(&raw);
            Ok(log.unwrap_or_default())
        }
        None => Ok(TokenUsageLog::default()),
    }
}

fn write_log(scope_root: &Path, path: &std::path::Path, log: &TokenUsageLog) -> FsResult<()> {
    let relative = path
        .strip_prefix(scope_root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned();
    let raw = crate::frontmatter::emit(log, "")
        .map_err(|e| fs_store::FsStoreError::InvalidPath(e.to_string()))?;
    fs_store::write_system_file(scope_root, &relative, &raw)
}

pub fn read_scope(scope_root: &Path) -> FsResult<Vec<TokenUsageRecord>> {
    Ok(read_log(scope_root, &scope_token_usage_path(scope_root))?.records)
}

pub fn append_scope(scope_root: &Path, record: TokenUsageRecord) -> FsResult<()> {
    let path = scope_token_usage_path(scope_root);
    let mut log = read_log(scope_root, &path)?;
    log.records.push(record);
    write_log(scope_root, &path, &log)
}

pub fn read_session(scope_root: &Path, session_id: &str) -> FsResult<Vec<TokenUsageRecord>> {
    Ok(read_log(scope_root, &session_token_usage_file(scope_root, session_id))?.records)
}

pub fn append_session(scope_root: &Path, session_id: &str, record: TokenUsageRecord) -> FsResult<()> {
    let path = session_token_usage_file(scope_root, session_id);
    let mut log = read_log(scope_root, &path)?;
    log.records.push(record);
    write_log(scope_root, &path, &log)
}

#[cfg(test)]
#[path = "token_usage_store_tests.rs"]
mod tests;
