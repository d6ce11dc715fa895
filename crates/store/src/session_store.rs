//! Typed entity layer for [`AgentSession`].
//!
//! Reads tolerate two on-disk layouts: the current single-file
//! `session.md` (frontmatter holds everything including the message list),
//! and a legacy per-session directory (`meta.md` + `messages/*.md`, one
//! message per file, named by the message's numeric position). A write
//! always emits the single-file layout and deletes a legacy directory it
//! finds, migrating it in place.

use std::path::Path;

use prizm_core::{AgentSession, SessionMessage};

use crate::fs_store::{self, FsResult};
use crate::path_provider::{session_dir, session_file};

pub const PRIZM_TYPE: &str = "agent_session";

fn legacy_meta_file(scope_root: &Path, session_id: &str) -> std::path::PathBuf {
    session_dir(scope_root, session_id).join("meta.md")
}

fn legacy_messages_dir(scope_root: &Path, session_id: &str) -> std::path::PathBuf {
    session_dir(scope_root, session_id).join("messages")
}

fn read_single_file(scope_root: &Path, session_id: &str) -> FsResult<Option<AgentSession>> {
    let path = session_file(scope_root, session_id);
    let relative = path
        .strip_prefix(scope_root)
        .unwrap_or(&path)
        .to_string_lossy()
        .into_owned();
    let Some(record) = fs_store::read_file_by_path(scope_root, &relative)? else {
        return Ok(None);
    };
    if record.prizm_type.as_deref() != Some(PRIZM_TYPE) {
        return Ok(None);
    }
    let Some(data) = record.frontmatter else {
        return Ok(None);
    };
    Ok(serde_json::from_value(data).ok())
}

fn read_legacy(scope_root: &Path, session_id: &str) -> FsResult<Option<AgentSession>> {
    let meta_path = legacy_meta_file(scope_root, session_id);
    let relative = meta_path
        .strip_prefix(scope_root)
        .unwrap_or(&meta_path)
        .to_string_lossy()
        .into_owned();
    let Some(record) = fs_store::read_file_by_path(scope_root, &relative)? else {
        return Ok(None);
    };
    let Some(data) = record.frontmatter else {
        return Ok(None);
    };
    let Ok(mut session) = serde_json::from_value::<AgentSession>(data) else {
        return Ok(None);
    };

    let messages_dir = legacy_messages_dir(scope_root, session_id);
    let mut message_files: Vec<_> = match std::fs::read_dir(&messages_dir) {
        Ok(entries) => entries.filter_map(|e| e.ok()).collect(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(e) => return Err(e.into()),
    };
    message_files.sort_by_key(|e| e.file_name());

    let mut messages = Vec::with_capacity(message_files.len());
    for entry in message_files {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        let raw = std::fs::read_to_string(&path)?;
        let (msg, _) = crate::frontmatter::parse_typed::<SessionMessage>(&raw);
        if let Some(msg) = msg {
            messages.push(msg);
        }
    }
    session.messages = messages;
    Ok(Some(session))
}

/// True if a legacy per-session directory layout exists for this id.
pub fn is_legacy(scope_root: &Path, session_id: &str) -> bool {
    legacy_meta_file(scope_root, session_id).exists()
}

pub fn read_by_id(scope_root: &Path, session_id: &str) -> FsResult<Option<AgentSession>> {
    if let Some(session) = read_single_file(scope_root, session_id)? {
        return Ok(Some(session));
    }
    read_legacy(scope_root, session_id)
}

pub fn read_all(scope_root: &Path) -> FsResult<Vec<AgentSession>> {
    let dir = crate::path_provider::agent_sessions_dir(scope_root);
    let mut out = Vec::new();
    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(out),
        Err(e) => return Err(e.into()),
    };
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let id = entry.file_name().to_string_lossy().into_owned();
        if let Some(session) = read_by_id(scope_root, &id)? {
            out.push(session);
        }
    }
    out.sort_by_key(|s| s.created_at);
    Ok(out)
}

/// Write a session in the single-file layout, migrating away a legacy
/// directory layout for this id if one is found.
pub fn write(scope_root: &Path, session: &AgentSession) -> FsResult<()> {
    let mut value = serde_json::to_value(session).map_err(|e| {
        fs_store::FsStoreError::InvalidPath(format!("failed to serialize session: {e}"))
    })?;
    if let Some(obj) = value.as_object_mut() {
        obj.insert("prizm_type".to_string(), serde_json::Value::String(PRIZM_TYPE.to_string()));
    }
    let raw = crate::frontmatter::emit(&value, "")
        .map_err(|e| fs_store::FsStoreError::InvalidPath(e.to_string()))?;

    let path = session_file(scope_root, session.id.as_str());
    let relative = path
        .strip_prefix(scope_root)
        .unwrap_or(&path)
        .to_string_lossy()
        .into_owned();
    fs_store::write_system_file(scope_root, &relative, &raw)?;

    if is_legacy(scope_root, session.id.as_str()) {
        let _ = fs_store::delete_system_path(
            scope_root,
            legacy_meta_file(scope_root, session.id.as_str())
                .strip_prefix(scope_root)
                .unwrap_or(&legacy_meta_file(scope_root, session.id.as_str()))
                .to_string_lossy()
                .as_ref(),
        );
        let messages_dir = legacy_messages_dir(scope_root, session.id.as_str());
        let _ = fs_store::delete_system_path(
            scope_root,
            messages_dir
                .strip_prefix(scope_root)
                .unwrap_or(&messages_dir)
                .to_string_lossy()
                .as_ref(),
        );
    }
    Ok(())
}

pub fn delete(scope_root: &Path, session_id: &str) -> FsResult<()> {
    let dir = session_dir(scope_root, session_id);
    let relative = dir
        .strip_prefix(scope_root)
        .unwrap_or(&dir)
        .to_string_lossy()
        .into_owned();
    fs_store::delete_system_path(scope_root, &relative)
}

#[cfg(test)]
#[path = "session_store_tests.rs"]
mod tests;
