//! Typed entity layer for [`ScheduleItem`].
//!
//! `ScheduleItem` carries no `relativePath` field in its frontmatter schema
//! (§3.2), so reads return the path alongside the entity rather than
//! embedding it.

use std::path::Path;

use prizm_core::ScheduleItem;

use crate::entity_io;
use crate::fs_store::FsResult;
use crate::metadata_cache::MetadataCache;

pub const PRIZM_TYPE: &str = "schedule_item";

pub fn read_all(scope_root: &Path, cache: &MetadataCache) -> FsResult<Vec<(String, ScheduleItem)>> {
    let mut rows: Vec<(String, ScheduleItem, String)> =
        entity_io::read_all_by_type(scope_root, cache, PRIZM_TYPE)?;
    rows.sort_by_key(|(_, item, _)| item.start_time);
    Ok(rows.into_iter().map(|(path, item, _)| (path, item)).collect())
}

pub fn read_by_id(
    scope_root: &Path,
    cache: &MetadataCache,
    id: &str,
) -> FsResult<Option<(String, ScheduleItem)>> {
    Ok(read_all(scope_root, cache)?.into_iter().find(|(_, s)| s.id == *id))
}

pub fn write(scope_root: &Path, cache: &MetadataCache, item: &ScheduleItem) -> FsResult<String> {
    let existing = read_by_id(scope_root, cache, item.id.as_str())?;
    let base = entity_io::sanitize_title(&item.title);
    let relative_path = entity_io::write_entity(
        scope_root,
        "",
        &base,
        "md",
        existing.as_ref().map(|(p, _)| p.as_str()),
        PRIZM_TYPE,
        item,
        "",
    )?;
    cache.invalidate();
    Ok(relative_path)
}

pub fn delete(scope_root: &Path, cache: &MetadataCache, id: &str) -> FsResult<()> {
    if let Some((path, _)) = read_by_id(scope_root, cache, id)? {
        crate::fs_store::delete_by_path(scope_root, &path)?;
        cache.invalidate();
    }
    Ok(())
}

#[cfg(test)]
#[path = "schedule_store_tests.rs"]
mod tests;
