// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! prizm-runtime: the process-wide pieces every scope shares — the
//! [`LockManager`], the in-process [`EventBus`], and the per-session
//! [`AuditLog`].

pub mod audit_log;
pub mod event_bus;
pub mod lock_manager;

pub use audit_log::{AuditAction, AuditLog, AuditRecord, AuditResult};
pub use event_bus::{EventBus, Subscription};
pub use lock_manager::{AcquireOutcome, LockHolder, LockManager, DEFAULT_LEASE_MS};
