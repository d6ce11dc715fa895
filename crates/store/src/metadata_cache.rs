//! Cached scan of user-space `.md` files under a scope root.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use glob::Pattern;

use crate::path_provider::SYSTEM_DIR;

const ALWAYS_EXCLUDED: &[&str] = &[SYSTEM_DIR, ".git", "node_modules", "dist"];

/// Debounce window for file-watcher driven invalidation.
pub const INVALIDATION_DEBOUNCE: Duration = Duration::from_millis(500);

struct Cached {
    scanned_at: Instant,
    paths: Vec<PathBuf>,
}

/// Recursively discovers candidate `.md` files under a scope root, caching
/// the result until explicitly invalidated by a write or a debounced
/// file-watcher tick.
pub struct MetadataCache {
    scope_root: PathBuf,
    exclude: Vec<Pattern>,
    cached: Mutex<Option<Cached>>,
}

impl MetadataCache {
    pub fn new(scope_root: impl Into<PathBuf>, exclude_patterns: &[String]) -> Self {
        let exclude = exclude_patterns
            .iter()
            .filter_map(|p| Pattern::new(p).ok())
            .collect();
        Self {
            scope_root: scope_root.into(),
            exclude,
            cached: Mutex::new(None),
        }
    }

    /// Drop the cached scan so the next call rescans the filesystem.
    pub fn invalidate(&self) {
        *self.cached.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// Candidate `.md` paths relative to the scope root, scanning the
    /// filesystem only if nothing is cached.
    pub fn scan(&self) -> std::io::Result<Vec<PathBuf>> {
        let mut guard = self.cached.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(cached) = guard.as_ref() {
            return Ok(cached.paths.clone());
        }
        let paths = self.walk()?;
        *guard = Some(Cached {
            scanned_at: Instant::now(),
            paths: paths.clone(),
        });
        Ok(paths)
    }

    /// Age of the cached scan, if any, mostly useful for tests asserting
    /// the debounce window is honored.
    pub fn cached_age(&self) -> Option<Duration> {
        self.cached
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|c| c.scanned_at.elapsed())
    }

    fn is_excluded(&self, relative: &Path) -> bool {
        let rel_str = relative.to_string_lossy();
        for name in ALWAYS_EXCLUDED {
            if relative.components().any(|c| c.as_os_str() == *name) {
                return true;
            }
        }
        self.exclude.iter().any(|p| p.matches(&rel_str))
    }

    fn walk(&self) -> std::io::Result<Vec<PathBuf>> {
        let mut out = Vec::new();
        let mut stack = vec![self.scope_root.clone()];
        while let Some(dir) = stack.pop() {
            let entries = match std::fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e),
            };
            for entry in entries {
                let entry = entry?;
                let path = entry.path();
                let relative = path
                    .strip_prefix(&self.scope_root)
                    .unwrap_or(&path)
                    .to_path_buf();
                if self.is_excluded(&relative) {
                    continue;
                }
                let file_type = entry.file_type()?;
                if file_type.is_dir() {
                    stack.push(path);
                } else if file_type.is_file()
                    && path.extension().and_then(|e| e.to_str()) == Some("md")
                {
                    out.push(relative);
                }
            }
        }
        out.sort();
        Ok(out)
    }
}

#[cfg(test)]
#[path = "metadata_cache_tests.rs"]
mod tests;
