//! `ScopeStore`: the one-per-scope aggregate (§4's component table).
//!
//! Owns the metadata cache and the scope's config, shares a process-wide
//! [`prizm_runtime::LockManager`] with every other open scope, and runs
//! every pending migration before the scope is usable.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use prizm_runtime::LockManager;
use thiserror::Error;

use crate::fs_store::FsStoreError;
use crate::metadata_cache::MetadataCache;
use crate::migrator::{self, MigrationError};
use crate::scope_config::{self, ScopeConfig};

#[derive(Debug, Error)]
pub enum ScopeStoreError {
    #[error(transparent)]
    Store(#[from] FsStoreError),
    #[error(transparent)]
    Migration(#[from] MigrationError),
}

pub type ScopeStoreResult<T> = Result<T, ScopeStoreError>;

/// An opened scope: its root directory, its config, its file-metadata
/// cache, and a handle to the shared lock manager. Constructing one runs
/// migrations (§3.4, §4.8); a migration failure refuses to open the scope
/// at all, surfaced to callers as `MIGRATION_REQUIRED` (§7).
pub struct ScopeStore {
    scope_root: PathBuf,
    config: ScopeConfig,
    cache: MetadataCache,
    locks: Arc<LockManager>,
}

impl ScopeStore {
    /// Open (creating if necessary) the scope at `scope_root`, running
    /// every migration between its on-disk `dataVersion` and the current
    /// one. `locks` is the process-wide lock manager; the scope id is
    /// folded into every lock key so scopes never share a lock space
    /// (invariant 8).
    pub fn open(
        scope_root: impl Into<PathBuf>,
        id: impl Into<String>,
        locks: Arc<LockManager>,
    ) -> ScopeStoreResult<Self> {
        let scope_root = scope_root.into();
        let mut config = scope_config::read_or_init(&scope_root, id)?;
        migrator::migrate(&scope_root, &mut config)?;
        let cache = MetadataCache::new(scope_root.clone(), &config.settings.exclude_patterns);
        Ok(Self {
            scope_root,
            config,
            cache,
            locks,
        })
    }

    pub fn scope_root(&self) -> &Path {
        &self.scope_root
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn config(&self) -> &ScopeConfig {
        &self.config
    }

    pub fn cache(&self) -> &MetadataCache {
        &self.cache
    }

    pub fn locks(&self) -> &Arc<LockManager> {
        &self.locks
    }

    /// Reload `scope.json` from disk, e.g. after an out-of-band edit to the
    /// settings file; does not re-run migrations.
    pub fn reload_config(&mut self) -> ScopeStoreResult<()> {
        if let Some(config) = scope_config::read(&self.scope_root)? {
            self.config = config;
            self.cache.invalidate();
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "scope_store_tests.rs"]
mod tests;
