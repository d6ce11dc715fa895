//! Shared helpers for the typed entity layer: title sanitizing, collision
//! resolution, and the generic scan-and-filter used by every `read_all`.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::fs_store::{self, FsResult};
use crate::metadata_cache::MetadataCache;

/// Turn a free-form title into a filesystem-safe filename stem.
pub fn sanitize_title(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c => c,
        })
        .collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Pick a non-colliding filename under `dir`, appending ` (n)` as needed.
/// `keep` is the entity's current path, which is never itself treated as a
/// collision (renaming a file onto its own name is a no-op).
pub fn resolve_filename(dir: &Path, base: &str, ext: &str, keep: Option<&Path>) -> PathBuf {
    let candidate = dir.join(format!("{base}.{ext}"));
    if !candidate.exists() || keep == Some(candidate.as_path()) {
        return candidate;
    }
    let mut n = 2u32;
    loop {
        let candidate = dir.join(format!("{base} ({n}).{ext}"));
        if !candidate.exists() || keep == Some(candidate.as_path()) {
            return candidate;
        }
        n += 1;
    }
}

/// Scan every candidate `.md` file, keep those matching `prizm_type`, parse,
/// and hand back `(relative_path, entity, body)` triples.
pub fn read_all_by_type<T: DeserializeOwned>(
    scope_root: &Path,
    cache: &MetadataCache,
    prizm_type: &str,
) -> FsResult<Vec<(String, T, String)>> {
    let mut out = Vec::new();
    for rel in cache.scan()? {
        let rel_str = rel.to_string_lossy().into_owned();
        if let Some(record) = fs_store::read_file_by_path(scope_root, &rel_str)? {
            if record.prizm_type.as_deref() != Some(prizm_type) {
                continue;
            }
            let Some(data) = record.frontmatter else { continue };
            let Ok(entity) = serde_json::from_value::<T>(data) else {
                continue;
            };
            let (_, body) = crate::frontmatter::parse_typed::<serde_json::Value>(
                record.content.as_deref().unwrap_or_default(),
            );
            out.push((rel_str, entity, body));
        }
    }
    Ok(out)
}

/// Write an entity, relocating it if its title-derived filename changed.
/// `prizm_type` is merged into the emitted frontmatter so `read_all_by_type`
/// can filter on it without every entity struct carrying the tag field
/// itself. Returns the relative path the entity now lives at.
pub fn write_entity<T: Serialize>(
    scope_root: &Path,
    dir_relative: &str,
    base_name: &str,
    ext: &str,
    existing_relative_path: Option<&str>,
    prizm_type: &str,
    data: &T,
    body: &str,
) -> FsResult<String> {
    let dir = scope_root.join(dir_relative);
    std::fs::create_dir_all(&dir)?;
    let existing_abs = existing_relative_path.map(|p| scope_root.join(p));
    let target = resolve_filename(&dir, base_name, ext, existing_abs.as_deref());

    let mut value = serde_json::to_value(data).map_err(|e| {
        crate::fs_store::FsStoreError::InvalidPath(format!("failed to serialize entity: {e}"))
    })?;
    if let Some(obj) = value.as_object_mut() {
        obj.insert("prizm_type".to_string(), serde_json::Value::String(prizm_type.to_string()));
    }

    let raw = crate::frontmatter::emit(&value, body)
        .map_err(|e| crate::fs_store::FsStoreError::InvalidPath(e.to_string()))?;
    let target_relative = target
        .strip_prefix(scope_root)
        .unwrap_or(&target)
        .to_string_lossy()
        .into_owned();
    fs_store::write_system_file(scope_root, &target_relative, &raw)?;

    if let Some(existing) = existing_relative_path {
        if existing != target_relative {
            let _ = fs_store::delete_system_path(scope_root, existing);
        }
    }
    Ok(target_relative)
}

#[cfg(test)]
#[path = "entity_io_tests.rs"]
mod tests;
