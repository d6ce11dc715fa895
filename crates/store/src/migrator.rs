//! Runs `dataVersion`-gated migrations on first open of a scope.
//!
//! Each migration is idempotent and runs at most once per scope, gated by
//! `scope.json.dataVersion`. A failure aborts the open entirely — migration
//! failure surfaces to callers as `MIGRATION_REQUIRED`, never partially
//! applied.

use std::path::Path;

use thiserror::Error;

use crate::entity_io;
use crate::fs_store::{self, FsResult};
use crate::metadata_cache::MetadataCache;
use crate::path_provider::{is_system_path, SYSTEM_DIR};
use crate::scope_config::{self, ScopeConfig, CURRENT_DATA_VERSION};

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("migration to v{0} failed: {1}")]
    Failed(u32, String),
    #[error(transparent)]
    Store(#[from] fs_store::FsStoreError),
}

pub type MigrationResult<T> = Result<T, MigrationError>;

/// Run every migration between the scope's current `dataVersion` and
/// [`CURRENT_DATA_VERSION`], persisting the new version after each step.
/// A scope already at the current version is untouched.
pub fn migrate(scope_root: &Path, config: &mut ScopeConfig) -> MigrationResult<()> {
    while config.data_version < CURRENT_DATA_VERSION {
        let target = config.data_version + 1;
        run_step(scope_root, target).map_err(|e| MigrationError::Failed(target, e.to_string()))?;
        config.data_version = target;
        scope_config::write(scope_root, config)?;
    }
    Ok(())
}

fn run_step(scope_root: &Path, target_version: u32) -> FsResult<()> {
    match target_version {
        1 => migrate_to_v1(scope_root),
        2 => migrate_to_v2(scope_root),
        3 => migrate_to_v3(scope_root),
        other => {
            tracing::warn!(version = other, "no migration registered for this version, skipping");
            Ok(())
        }
    }
}

/// v1: rename id-named entity files (an early layout that used the raw id
/// as the filename) to the current title-driven filename.
fn migrate_to_v1(scope_root: &Path) -> FsResult<()> {
    let cache = MetadataCache::new(scope_root, &[]);
    for rel in cache.scan()? {
        let rel_str = rel.to_string_lossy().into_owned();
        let Some(record) = fs_store::read_file_by_path(scope_root, &rel_str)? else {
            continue;
        };
        let Some(data) = record.frontmatter.as_ref() else {
            continue;
        };
        let Some(prizm_type) = record.prizm_type.as_deref() else {
            continue;
        };
        let Some(title) = data.get("title").and_then(|v| v.as_str()) else {
            continue;
        };
        let Some(id) = data.get("id").and_then(|v| v.as_str()) else {
            continue;
        };
        let stem = Path::new(&rel_str)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        if stem != id {
            continue;
        }
        let dir = Path::new(&rel_str).parent().unwrap_or(Path::new(""));
        let base = entity_io::sanitize_title(title);
        let target = entity_io::resolve_filename(
            &scope_root.join(dir),
            &base,
            "md",
            Some(&scope_root.join(&rel_str)),
        );
        let target_relative = target
            .strip_prefix(scope_root)
            .unwrap_or(&target)
            .to_string_lossy()
            .into_owned();
        if target_relative != rel_str {
            fs_store::write_system_file(
                scope_root,
                &target_relative,
                record.content.as_deref().unwrap_or_default(),
            )?;
            fs_store::delete_system_path(scope_root, &rel_str)?;
            tracing::info!(from = %rel_str, to = %target_relative, prizm_type, "renamed id-named file to title");
        }
    }
    Ok(())
}

/// v2: delete the obsolete `.prizm/pomodoro/` subtree.
fn migrate_to_v2(scope_root: &Path) -> FsResult<()> {
    let relative = format!("{SYSTEM_DIR}/pomodoro");
    fs_store::delete_system_path(scope_root, &relative)
}

/// v3: rewrite `prizm_type: note` files to `prizm_type: document`, keeping
/// the same id and re-deriving the filename from the title.
fn migrate_to_v3(scope_root: &Path) -> FsResult<()> {
    let cache = MetadataCache::new(scope_root, &[]);
    for rel in cache.scan()? {
        let rel_str = rel.to_string_lossy().into_owned();
        if is_system_path(&rel_str) {
            continue;
        }
        let Some(record) = fs_store::read_file_by_path(scope_root, &rel_str)? else {
            continue;
        };
        if record.prizm_type.as_deref() != Some("note") {
            continue;
        }
        let Some(mut data) = record.frontmatter else {
            continue;
        };
        let Some(obj) = data.as_object_mut() else {
            continue;
        };
        obj.insert(
            "prizm_type".to_string(),
            serde_json::Value::String("document".to_string()),
        );
        let body = record.content.as_deref().unwrap_or_default();
        let body_text = crate::frontmatter::parse(body).content;
        let title = body_text.lines().next().unwrap_or("untitled").trim().to_string();
        let title = if title.is_empty() { "untitled".to_string() } else { title };
        obj.insert("title".to_string(), serde_json::Value::String(title.clone()));
        obj.insert(
            "relativePath".to_string(),
            serde_json::Value::String(String::new()),
        );

        let base = entity_io::sanitize_title(&title);
        let dir = Path::new(&rel_str).parent().unwrap_or(Path::new(""));
        let target = entity_io::resolve_filename(&scope_root.join(dir), &base, "md", None);
        let target_relative = target
            .strip_prefix(scope_root)
            .unwrap_or(&target)
            .to_string_lossy()
            .into_owned();
        if let Some(obj) = data.as_object_mut() {
            obj.insert(
                "relativePath".to_string(),
                serde_json::Value::String(target_relative.clone()),
            );
        }

        let raw = crate::frontmatter::emit(&data, &body_text)
            .map_err(|e| fs_store::FsStoreError::InvalidPath(e.to_string()))?;
        fs_store::write_system_file(scope_root, &target_relative, &raw)?;
        if target_relative != rel_str {
            fs_store::delete_system_path(scope_root, &rel_str)?;
        }
        tracing::info!(from = %rel_str, to = %target_relative, "migrated note to document");
    }
    Ok(())
}

#[cfg(test)]
#[path = "migrator_tests.rs"]
mod tests;
