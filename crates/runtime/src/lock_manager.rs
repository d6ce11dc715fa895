//! In-memory exclusive fencing locks over typed resources (§4.9, §5).
//!
//! One [`LockManager`] instance is constructed per process and shared by
//! every scope; the scope id is folded into the lookup key so scopes never
//! observe each other's locks (invariant 8).

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use prizm_core::{Clock, ResourceRef, SharedClock};

/// Default lock lease: 10 minutes, refreshed by heartbeat, per §5.
pub const DEFAULT_LEASE_MS: i64 = 10 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockHolder {
    pub session_id: String,
    pub acquired_at: i64,
    pub lease_expires_at: i64,
    pub reason: Option<String>,
    pub fence_token: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquireOutcome {
    pub success: bool,
    pub fence_token: Option<u64>,
    pub holder: Option<LockHolder>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct EntityKey {
    scope: String,
    resource: ResourceRef,
}

/// Exclusive fencing lock manager. Guarded by a single small lock per §5
/// ("Lock manager state: guarded by a single small lock; all lookups/updates
/// complete in O(1) hash ops").
pub struct LockManager {
    clock: SharedClock,
    locks: Mutex<HashMap<EntityKey, LockHolder>>,
    reads: Mutex<HashMap<(String, String, String, String), i64>>,
    fence_counter: AtomicU64,
}

impl LockManager {
    pub fn new(clock: SharedClock) -> Self {
        Self {
            clock,
            locks: Mutex::new(HashMap::new()),
            reads: Mutex::new(HashMap::new()),
            fence_counter: AtomicU64::new(1),
        }
    }

    fn next_fence_token(&self) -> u64 {
        self.fence_counter.fetch_add(1, Ordering::SeqCst)
    }

    fn is_expired(&self, holder: &LockHolder) -> bool {
        self.clock.now_ms() >= holder.lease_expires_at
    }

    /// Acquire a lock, succeeding if unheld or the existing holder's lease
    /// has expired without a heartbeat.
    pub fn acquire(
        &self,
        scope: &str,
        resource: &ResourceRef,
        session_id: &str,
        reason: Option<String>,
    ) -> AcquireOutcome {
        let key = EntityKey {
            scope: scope.to_string(),
            resource: resource.clone(),
        };
        let mut locks = self.locks.lock();
        if let Some(existing) = locks.get(&key) {
            if !self.is_expired(existing) && existing.session_id != session_id {
                return AcquireOutcome {
                    success: false,
                    fence_token: None,
                    holder: Some(existing.clone()),
                };
            }
        }
        let now = self.clock.now_ms();
        let fence_token = self.next_fence_token();
        let holder = LockHolder {
            session_id: session_id.to_string(),
            acquired_at: now,
            lease_expires_at: now + DEFAULT_LEASE_MS,
            reason,
            fence_token,
        };
        locks.insert(key, holder.clone());
        AcquireOutcome {
            success: true,
            fence_token: Some(fence_token),
            holder: Some(holder),
        }
    }

    /// Release a lock. No-op unless `session_id` matches the current
    /// holder, so a stale caller can't release someone else's lock.
    pub fn release(&self, scope: &str, resource: &ResourceRef, session_id: &str) -> bool {
        let key = EntityKey {
            scope: scope.to_string(),
            resource: resource.clone(),
        };
        let mut locks = self.locks.lock();
        if let Some(existing) = locks.get(&key) {
            if existing.session_id == session_id {
                locks.remove(&key);
                return true;
            }
        }
        false
    }

    /// Current holder, if any and not expired.
    pub fn get(&self, scope: &str, resource: &ResourceRef) -> Option<LockHolder> {
        let key = EntityKey {
            scope: scope.to_string(),
            resource: resource.clone(),
        };
        let locks = self.locks.lock();
        locks.get(&key).filter(|h| !self.is_expired(h)).cloned()
    }

    /// Re-verify this session still holds the fence it was given at
    /// acquire time. Used for the two-phase fence check in §4.9: once
    /// before computing new content, once immediately before persisting.
    pub fn verify_fence(&self, scope: &str, resource: &ResourceRef, fence_token: u64) -> bool {
        match self.get(scope, resource) {
            Some(holder) => holder.fence_token == fence_token,
            None => false,
        }
    }

    /// Extend a held lock's lease (heartbeat). No-op if not the holder.
    pub fn heartbeat(&self, scope: &str, resource: &ResourceRef, session_id: &str) -> bool {
        let key = EntityKey {
            scope: scope.to_string(),
            resource: resource.clone(),
        };
        let mut locks = self.locks.lock();
        if let Some(holder) = locks.get_mut(&key) {
            if holder.session_id == session_id {
                holder.lease_expires_at = self.clock.now_ms() + DEFAULT_LEASE_MS;
                return true;
            }
        }
        false
    }

    /// Record that a session read a resource at a given mtime, for the read
    /// history conflict-detection heuristic.
    pub fn record_read(&self, scope: &str, session_id: &str, resource: &ResourceRef, mtime: i64) {
        let key = (
            scope.to_string(),
            session_id.to_string(),
            resource.resource_type.to_string(),
            resource.resource_id.clone(),
        );
        self.reads.lock().insert(key, mtime);
    }

    pub fn last_read(&self, scope: &str, session_id: &str, resource: &ResourceRef) -> Option<i64> {
        let key = (
            scope.to_string(),
            session_id.to_string(),
            resource.resource_type.to_string(),
            resource.resource_id.clone(),
        );
        self.reads.lock().get(&key).copied()
    }

    /// Release every lock held by a session, e.g. on session teardown.
    /// Returns the resources that were released.
    pub fn release_all_for_session(&self, scope: &str, session_id: &str) -> Vec<ResourceRef> {
        let mut locks = self.locks.lock();
        let to_remove: Vec<EntityKey> = locks
            .iter()
            .filter(|(k, v)| k.scope == scope && v.session_id == session_id)
            .map(|(k, _)| k.clone())
            .collect();
        let mut released = Vec::with_capacity(to_remove.len());
        for key in to_remove {
            locks.remove(&key);
            released.push(key.resource);
        }
        released
    }
}

#[cfg(test)]
#[path = "lock_manager_tests.rs"]
mod tests;
