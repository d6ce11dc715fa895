// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! prizm-store: PathProvider, FrontmatterCodec, MetadataCache, MdStore
//! layers 0/1, DocumentVersionStore, CheckpointStore, Migrator, and
//! ScopeConfig — everything that turns a scope root directory into typed,
//! sandboxed storage.

pub mod checkpoint_store;
pub mod clipboard_store;
pub mod document_store;
pub mod document_version_store;
pub mod entity_io;
pub mod frontmatter;
pub mod fs_store;
pub mod metadata_cache;
pub mod migrator;
pub mod path_provider;
pub mod schedule_store;
pub mod scope_config;
pub mod scope_store;
pub mod session_store;
pub mod todo_store;
pub mod token_usage_store;

pub use checkpoint_store::{Checkpoint, CheckpointAction};
pub use fs_store::{DirEntry, FileRecord, FsStoreError, FsResult};
pub use metadata_cache::MetadataCache;
pub use migrator::{MigrationError, MigrationResult};
pub use scope_config::{ScopeConfig, ScopeSettings, CURRENT_DATA_VERSION};
pub use scope_store::{ScopeStore, ScopeStoreError, ScopeStoreResult};
