//! Maps the store layer's error types onto [`prizm_core::CoreError`].
//!
//! These are plain functions rather than `From` impls: neither `CoreError`
//! nor `FsStoreError`/`ScopeStoreError` is defined in this crate, so the
//! orphan rule rules out implementing the trait here.

use prizm_core::CoreError;
use prizm_store::{FsStoreError, MigrationError, ScopeStoreError};

pub fn map_fs_error(err: FsStoreError) -> CoreError {
    match err {
        FsStoreError::InvalidPath(msg) => CoreError::OutOfBounds(msg),
        FsStoreError::PermissionSystemPath(msg) => CoreError::OutOfBounds(msg),
        FsStoreError::NotFound(msg) => CoreError::NotFound(msg),
        FsStoreError::Io(e) => CoreError::Io(e),
    }
}

pub fn map_scope_error(err: ScopeStoreError) -> CoreError {
    match err {
        ScopeStoreError::Store(e) => map_fs_error(e),
        ScopeStoreError::Migration(MigrationError::Failed(version, reason)) => {
            CoreError::Conflict(format!("migration to v{version} failed: {reason}"))
        }
        ScopeStoreError::Migration(MigrationError::Store(e)) => map_fs_error(e),
    }
}
