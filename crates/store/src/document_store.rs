//! Typed entity layer for [`Document`].

use std::path::Path;

use prizm_core::Document;

use crate::entity_io;
use crate::fs_store::FsResult;
use crate::metadata_cache::MetadataCache;

pub const PRIZM_TYPE: &str = "document";

pub fn read_all(scope_root: &Path, cache: &MetadataCache) -> FsResult<Vec<Document>> {
    let mut rows: Vec<(String, Document, String)> =
        entity_io::read_all_by_type(scope_root, cache, PRIZM_TYPE)?;
    rows.sort_by_key(|(_, doc, _)| doc.created_at);
    Ok(rows
        .into_iter()
        .map(|(relative_path, mut doc, body)| {
            doc.relative_path = relative_path;
            doc.body = body;
            doc
        })
        .collect())
}

pub fn read_by_id(scope_root: &Path, cache: &MetadataCache, id: &str) -> FsResult<Option<Document>> {
    Ok(read_all(scope_root, cache)?.into_iter().find(|d| d.id == *id))
}

/// Write a document, relocating its file if the title changed since the
/// last write. Returns the document with `relativePath` updated in place.
pub fn write(scope_root: &Path, cache: &MetadataCache, mut doc: Document) -> FsResult<Document> {
    let existing = read_by_id(scope_root, cache, doc.id.as_str())?;
    let base = entity_io::sanitize_title(&doc.title);
    let existing_relative_path = existing.as_ref().map(|d| d.relative_path.as_str());

    let body = std::mem::take(&mut doc.body);
    let relative_path = entity_io::write_entity(
        scope_root,
        "",
        &base,
        "md",
        existing_relative_path,
        PRIZM_TYPE,
        &doc,
        &body,
    )?;
    doc.relative_path = relative_path;
    doc.body = body;
    cache.invalidate();
    Ok(doc)
}

pub fn delete(scope_root: &Path, cache: &MetadataCache, id: &str) -> FsResult<()> {
    if let Some(doc) = read_by_id(scope_root, cache, id)? {
        crate::fs_store::delete_by_path(scope_root, &doc.relative_path)?;
        cache.invalidate();
    }
    Ok(())
}

#[cfg(test)]
#[path = "document_store_tests.rs"]
mod tests;
