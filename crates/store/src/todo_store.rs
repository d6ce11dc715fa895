//! Typed entity layer for [`TodoList`]. Body is always empty per §3.2.

use std::path::Path;

use prizm_core::TodoList;

use crate::entity_io;
use crate::fs_store::FsResult;
use crate::metadata_cache::MetadataCache;

pub const PRIZM_TYPE: &str = "todo_list";

pub fn read_all(scope_root: &Path, cache: &MetadataCache) -> FsResult<Vec<TodoList>> {
    let mut rows: Vec<(String, TodoList, String)> =
        entity_io::read_all_by_type(scope_root, cache, PRIZM_TYPE)?;
    rows.sort_by_key(|(_, list, _)| list.created_at);
    Ok(rows
        .into_iter()
        .map(|(relative_path, mut list, _)| {
            list.relative_path = relative_path;
            list
        })
        .collect())
}

pub fn read_by_id(scope_root: &Path, cache: &MetadataCache, id: &str) -> FsResult<Option<TodoList>> {
    Ok(read_all(scope_root, cache)?.into_iter().find(|l| l.id == *id))
}

pub fn write(scope_root: &Path, cache: &MetadataCache, mut list: TodoList) -> FsResult<TodoList> {
    let existing = read_by_id(scope_root, cache, list.id.as_str())?;
    let base = entity_io::sanitize_title(&list.title);
    let existing_relative_path = existing.as_ref().map(|l| l.relative_path.as_str());

    let relative_path = entity_io::write_entity(
        scope_root,
        "",
        &base,
        "md",
        existing_relative_path,
        PRIZM_TYPE,
        &list,
        "",
    )?;
    list.relative_path = relative_path;
    cache.invalidate();
    Ok(list)
}

pub fn delete(scope_root: &Path, cache: &MetadataCache, id: &str) -> FsResult<()> {
    if let Some(list) = read_by_id(scope_root, cache, id)? {
        crate::fs_store::delete_by_path(scope_root, &list.relative_path)?;
        cache.invalidate();
    }
    Ok(())
}

#[cfg(test)]
#[path = "todo_store_tests.rs"]
mod tests;
