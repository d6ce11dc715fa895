//! Typed entity layer for [`ClipboardItem`].
//!
//! Clipboard items live under `.prizm/clipboard/` and are keyed by id rather
//! than title — there is no user-facing name to rename around, so the
//! filename is always `<id>.md` and writes never relocate.

use std::path::Path;

use prizm_core::ClipboardItem;

use crate::entity_io;
use crate::fs_store::FsResult;
use crate::metadata_cache::MetadataCache;
use crate::path_provider::{clipboard_dir, SYSTEM_DIR};

pub const PRIZM_TYPE: &str = "clipboard_item";

fn clipboard_dir_relative() -> String {
    format!("{SYSTEM_DIR}/clipboard")
}

pub fn read_all(scope_root: &Path, cache: &MetadataCache) -> FsResult<Vec<ClipboardItem>> {
    let dir = clipboard_dir(scope_root);
    let mut rows = Vec::new();
    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    for entry in entries {
        let entry = entry?;
        if entry.path().extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(scope_root)
            .unwrap_or(&entry.path())
            .to_string_lossy()
            .into_owned();
        if let Some(record) = crate::fs_store::read_file_by_path(scope_root, &relative)? {
            if record.prizm_type.as_deref() != Some(PRIZM_TYPE) {
                continue;
            }
            let Some(data) = record.frontmatter else { continue };
            let Ok(mut item) = serde_json::from_value::<ClipboardItem>(data) else {
                continue;
            };
            item.body = record.content.map(|c| frontmatter_body(&c)).unwrap_or_default();
            rows.push(item);
        }
    }
    let _ = cache; // clipboard scans its own dir, not the user-space cache
    rows.sort_by_key(|i| i.created_at);
    Ok(rows)
}

fn frontmatter_body(raw: &str) -> String {
    crate::frontmatter::parse(raw).content
}

pub fn read_by_id(scope_root: &Path, cache: &MetadataCache, id: &str) -> FsResult<Option<ClipboardItem>> {
    Ok(read_all(scope_root, cache)?.into_iter().find(|i| i.id == *id))
}

pub fn write(scope_root: &Path, mut item: ClipboardItem) -> FsResult<ClipboardItem> {
    let body = std::mem::take(&mut item.body);
    let existing = format!("{}/{}.md", clipboard_dir_relative(), item.id.as_str());
    entity_io::write_entity(
        scope_root,
        &clipboard_dir_relative(),
        item.id.as_str(),
        "md",
        Some(existing.as_str()),
        PRIZM_TYPE,
        &item,
        &body,
    )?;
    item.body = body;
    Ok(item)
}

pub fn delete(scope_root: &Path, id: &str) -> FsResult<()> {
    let relative = format!("{}/{id}.md", clipboard_dir_relative());
    crate::fs_store::delete_system_path(scope_root, &relative)
}

#[cfg(test)]
#[path = "clipboard_store_tests.rs"]
mod tests;
