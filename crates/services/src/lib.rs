// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! prizm-services: transactional composites over the store and runtime
//! layers (§4.11).
//!
//! Every operation here is the unit the tool dispatch layer calls into:
//! validate args, check or acquire a lock, capture a checkpoint, mutate
//! through the typed store, save a version where one applies, publish an
//! event, append an audit record. [`ServiceEnv`] bundles the dependencies
//! every one of those steps needs; the operations themselves are free
//! functions grouped by entity family, matching the store crate's own
//! style rather than wrapping them in a stateful service object.

pub mod document_service;
mod error;
pub mod schedule_service;
pub mod todo_service;

pub use error::{map_fs_error, map_scope_error};

use std::sync::Arc;

use prizm_core::SharedClock;
use prizm_runtime::{AuditLog, EventBus, LockManager};
use prizm_store::ScopeStore;

/// Dependencies shared by every call into a service function against one
/// open scope. Borrowed rather than owned: callers (the tool dispatcher,
/// integration tests) construct one of these per call or reuse it across a
/// whole session, whichever their lifetimes allow.
pub struct ServiceEnv<'a> {
    pub scope: &'a ScopeStore,
    pub events: &'a EventBus,
    pub audit: &'a AuditLog,
    pub clock: &'a SharedClock,
    /// Generates a fresh entity id. A plain closure rather than `&dyn
    /// IdGen`: `IdGen` requires `Clone`, which rules out a trait object.
    pub id_gen: &'a dyn Fn() -> String,
}

impl<'a> ServiceEnv<'a> {
    pub fn new(
        scope: &'a ScopeStore,
        events: &'a EventBus,
        audit: &'a AuditLog,
        clock: &'a SharedClock,
        id_gen: &'a dyn Fn() -> String,
    ) -> Self {
        Self {
            scope,
            events,
            audit,
            clock,
            id_gen,
        }
    }

    pub(crate) fn locks(&self) -> &Arc<LockManager> {
        self.scope.locks()
    }

    pub(crate) fn scope_id(&self) -> &str {
        self.scope.id()
    }
}
