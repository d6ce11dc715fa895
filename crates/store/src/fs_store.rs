//! Generic sandboxed filesystem I/O: `(scopeRoot, relativePath) -> ...`.
//!
//! Every operation resolves `relativePath` under `scopeRoot` and refuses to
//! act if the resolved path would escape the root.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::frontmatter;
use crate::path_provider::is_system_path;

#[derive(Debug, Error)]
pub enum FsStoreError {
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error("path not found: {0}")]
    NotFound(String),
    #[error("refusing to touch system path outside the typed APIs: {0}")]
    PermissionSystemPath(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FsResult<T> = Result<T, FsStoreError>;

/// Metadata + optional content for one file read through Layer 0.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    pub relative_path: String,
    pub content: Option<String>,
    pub frontmatter: Option<serde_json::Value>,
    pub prizm_type: Option<String>,
    pub size: u64,
    pub last_modified: i64,
}

/// One entry in a directory listing.
#[derive(Debug, Clone, PartialEq)]
pub struct DirEntry {
    pub name: String,
    pub relative_path: String,
    pub is_dir: bool,
    pub is_file: bool,
    pub size: Option<u64>,
    pub last_modified: Option<i64>,
    pub prizm_type: Option<String>,
    pub prizm_id: Option<String>,
    pub children: Option<Vec<DirEntry>>,
}

/// Resolve `relative_path` under `scope_root`, rejecting traversal and
/// absolute paths. Does not require the target to exist.
pub fn resolve(scope_root: &Path, relative_path: &str) -> FsResult<PathBuf> {
    if Path::new(relative_path).is_absolute() {
        return Err(FsStoreError::InvalidPath(relative_path.to_string()));
    }
    let mut normalized = PathBuf::new();
    for component in Path::new(relative_path).components() {
        use std::path::Component;
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(FsStoreError::InvalidPath(relative_path.to_string()));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(FsStoreError::InvalidPath(relative_path.to_string()));
            }
        }
    }
    let resolved = scope_root.join(&normalized);
    let canonical_root = scope_root
        .canonicalize()
        .unwrap_or_else(|_| scope_root.to_path_buf());
    if let Ok(canonical) = resolved.canonicalize() {
        if !canonical.starts_with(&canonical_root) {
            return Err(FsStoreError::InvalidPath(relative_path.to_string()));
        }
    }
    Ok(resolved)
}

fn mtime_ms(metadata: &std::fs::Metadata) -> i64 {
    metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

const BINARY_SNIFF_LEN: usize = 512;

fn looks_binary(bytes: &[u8]) -> bool {
    bytes.iter().take(BINARY_SNIFF_LEN).any(|b| *b == 0)
}

pub fn read_file_by_path(scope_root: &Path, relative_path: &str) -> FsResult<Option<FileRecord>> {
    let path = resolve(scope_root, relative_path)?;
    let metadata = match std::fs::metadata(&path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    if metadata.is_dir() {
        return Err(FsStoreError::InvalidPath(format!(
            "{relative_path} is a directory"
        )));
    }
    let bytes = std::fs::read(&path)?;
    if looks_binary(&bytes) {
        return Ok(Some(FileRecord {
            relative_path: relative_path.to_string(),
            content: None,
            frontmatter: None,
            prizm_type: None,
            size: metadata.len(),
            last_modified: mtime_ms(&metadata),
        }));
    }
    let raw = String::from_utf8_lossy(&bytes).into_owned();
    let parsed = frontmatter::parse(&raw);
    let prizm_type = parsed
        .data
        .as_ref()
        .and_then(|d| d.get("prizm_type"))
        .and_then(|v| v.as_str())
        .map(str::to_string);

    Ok(Some(FileRecord {
        relative_path: relative_path.to_string(),
        content: Some(raw),
        frontmatter: parsed.data,
        prizm_type,
        size: metadata.len(),
        last_modified: mtime_ms(&metadata),
    }))
}

pub fn write_file_by_path(scope_root: &Path, relative_path: &str, content: &str) -> FsResult<()> {
    if is_system_path(relative_path) {
        return Err(FsStoreError::PermissionSystemPath(relative_path.to_string()));
    }
    write_system_file(scope_root, relative_path, content)
}

/// Writes through system paths too — used only by the typed entity and
/// config APIs, never exposed directly to generic file tools.
pub fn write_system_file(scope_root: &Path, relative_path: &str, content: &str) -> FsResult<()> {
    let path = resolve(scope_root, relative_path)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension(format!(
        "{}.tmp",
        path.extension().and_then(|e| e.to_str()).unwrap_or("tmp")
    ));
    std::fs::write(&tmp_path, content)?;
    std::fs::rename(&tmp_path, &path)?;
    Ok(())
}

pub fn mkdir_by_path(scope_root: &Path, relative_path: &str) -> FsResult<()> {
    if is_system_path(relative_path) {
        return Err(FsStoreError::PermissionSystemPath(relative_path.to_string()));
    }
    let path = resolve(scope_root, relative_path)?;
    std::fs::create_dir_all(path)?;
    Ok(())
}

pub fn move_file(scope_root: &Path, from: &str, to: &str) -> FsResult<()> {
    if is_system_path(from) || is_system_path(to) {
        return Err(FsStoreError::PermissionSystemPath(format!("{from} -> {to}")));
    }
    let from_path = resolve(scope_root, from)?;
    let to_path = resolve(scope_root, to)?;
    if !from_path.exists() {
        return Err(FsStoreError::NotFound(from.to_string()));
    }
    if let Some(parent) = to_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::rename(&from_path, &to_path)?;
    Ok(())
}

pub fn delete_by_path(scope_root: &Path, relative_path: &str) -> FsResult<()> {
    if is_system_path(relative_path) {
        return Err(FsStoreError::PermissionSystemPath(relative_path.to_string()));
    }
    delete_system_path(scope_root, relative_path)
}

/// Deletes through system paths too — used only by the typed entity and
/// config APIs, never exposed directly to generic file tools.
pub fn delete_system_path(scope_root: &Path, relative_path: &str) -> FsResult<()> {
    let path = resolve(scope_root, relative_path)?;
    let metadata = match std::fs::metadata(&path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };
    if metadata.is_dir() {
        std::fs::remove_dir_all(&path)?;
    } else {
        std::fs::remove_file(&path)?;
    }
    Ok(())
}

pub fn stat_by_path(scope_root: &Path, relative_path: &str) -> FsResult<Option<DirEntry>> {
    let path = resolve(scope_root, relative_path)?;
    let metadata = match std::fs::metadata(&path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let name = Path::new(relative_path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Some(DirEntry {
        name,
        relative_path: relative_path.to_string(),
        is_dir: metadata.is_dir(),
        is_file: metadata.is_file(),
        size: Some(metadata.len()),
        last_modified: Some(mtime_ms(&metadata)),
        prizm_type: None,
        prizm_id: None,
        children: None,
    }))
}

pub fn list_directory(
    scope_root: &Path,
    relative_path: &str,
    include_system: bool,
    recursive: bool,
) -> FsResult<Vec<DirEntry>> {
    let dir_path = resolve(scope_root, relative_path)?;
    list_directory_inner(scope_root, &dir_path, include_system, recursive)
}

fn list_directory_inner(
    scope_root: &Path,
    dir_path: &Path,
    include_system: bool,
    recursive: bool,
) -> FsResult<Vec<DirEntry>> {
    let mut out = Vec::new();
    let entries = match std::fs::read_dir(dir_path) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(out),
        Err(e) => return Err(e.into()),
    };
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let relative = path
            .strip_prefix(scope_root)
            .unwrap_or(&path)
            .to_string_lossy()
            .into_owned();
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') && !include_system {
            continue;
        }
        let metadata = entry.metadata()?;
        let mut dir_entry = DirEntry {
            name,
            relative_path: relative,
            is_dir: metadata.is_dir(),
            is_file: metadata.is_file(),
            size: if metadata.is_file() { Some(metadata.len()) } else { None },
            last_modified: Some(mtime_ms(&metadata)),
            prizm_type: None,
            prizm_id: None,
            children: None,
        };
        if metadata.is_file() && dir_entry.name.ends_with(".md") {
            if let Ok(bytes) = std::fs::read(&path) {
                if !looks_binary(&bytes) {
                    let raw = String::from_utf8_lossy(&bytes).into_owned();
                    let parsed = frontmatter::parse(&raw);
                    if let Some(data) = parsed.data {
                        dir_entry.prizm_type = data
                            .get("prizm_type")
                            .and_then(|v| v.as_str())
                            .map(str::to_string);
                        dir_entry.prizm_id = data.get("id").and_then(|v| v.as_str()).map(str::to_string);
                    }
                }
            }
        }
        if recursive && metadata.is_dir() {
            dir_entry.children = Some(list_directory_inner(scope_root, &path, include_system, recursive)?);
        }
        out.push(dir_entry);
    }
    out.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(out)
}

#[cfg(test)]
#[path = "fs_store_tests.rs"]
mod tests;
