use std::sync::Arc;

use prizm_core::{FakeClock, ResourceRef, ResourceType};

use super::*;

fn manager(clock: &FakeClock) -> LockManager {
    LockManager::new(Arc::new(clock.clone()))
}

fn doc(id: &str) -> ResourceRef {
    ResourceRef::new(ResourceType::Document, id)
}

#[test]
fn acquire_on_unheld_resource_succeeds() {
    let clock = FakeClock::new(0);
    let mgr = manager(&clock);
    let outcome = mgr.acquire("scope-a", &doc("d1"), "s1", None);
    assert!(outcome.success);
    assert!(outcome.fence_token.is_some());
}

#[test]
fn second_acquire_by_a_different_session_fails_with_holder() {
    let clock = FakeClock::new(0);
    let mgr = manager(&clock);
    mgr.acquire("scope-a", &doc("d1"), "s1", None);
    let outcome = mgr.acquire("scope-a", &doc("d1"), "s2", None);
    assert!(!outcome.success);
    assert_eq!(outcome.holder.unwrap().session_id, "s1");
}

#[test]
fn re_acquire_by_the_same_holder_succeeds() {
    let clock = FakeClock::new(0);
    let mgr = manager(&clock);
    mgr.acquire("scope-a", &doc("d1"), "s1", None);
    let outcome = mgr.acquire("scope-a", &doc("d1"), "s1", None);
    assert!(outcome.success);
}

#[test]
fn release_by_non_holder_is_a_no_op() {
    let clock = FakeClock::new(0);
    let mgr = manager(&clock);
    mgr.acquire("scope-a", &doc("d1"), "s1", None);
    assert!(!mgr.release("scope-a", &doc("d1"), "s2"));
    assert!(mgr.get("scope-a", &doc("d1")).is_some());
}

#[test]
fn acquire_release_acquire_succeeds_twice() {
    let clock = FakeClock::new(0);
    let mgr = manager(&clock);
    assert!(mgr.acquire("scope-a", &doc("d1"), "s1", None).success);
    assert!(mgr.release("scope-a", &doc("d1"), "s1"));
    assert!(mgr.acquire("scope-a", &doc("d1"), "s2", None).success);
}

#[test]
fn scopes_have_independent_lock_spaces() {
    let clock = FakeClock::new(0);
    let mgr = manager(&clock);
    mgr.acquire("scope-a", &doc("d1"), "s1", None);
    let outcome = mgr.acquire("scope-b", &doc("d1"), "s2", None);
    assert!(outcome.success);
}

#[test]
fn fence_token_is_verified_and_invalidated_on_release() {
    let clock = FakeClock::new(0);
    let mgr = manager(&clock);
    let outcome = mgr.acquire("scope-a", &doc("d1"), "s1", None);
    let fence = outcome.fence_token.unwrap();
    assert!(mgr.verify_fence("scope-a", &doc("d1"), fence));
    mgr.release("scope-a", &doc("d1"), "s1");
    assert!(!mgr.verify_fence("scope-a", &doc("d1"), fence));
}

#[test]
fn fence_tokens_are_monotonically_increasing() {
    let clock = FakeClock::new(0);
    let mgr = manager(&clock);
    let a = mgr.acquire("scope-a", &doc("d1"), "s1", None).fence_token.unwrap();
    mgr.release("scope-a", &doc("d1"), "s1");
    let b = mgr.acquire("scope-a", &doc("d1"), "s2", None).fence_token.unwrap();
    assert!(b > a);
}

#[test]
fn expired_lease_allows_a_new_holder_to_acquire() {
    let clock = FakeClock::new(0);
    let mgr = manager(&clock);
    mgr.acquire("scope-a", &doc("d1"), "s1", None);
    clock.advance_ms(DEFAULT_LEASE_MS + 1);
    let outcome = mgr.acquire("scope-a", &doc("d1"), "s2", None);
    assert!(outcome.success);
}

#[test]
fn heartbeat_extends_the_lease_past_the_original_expiry() {
    let clock = FakeClock::new(0);
    let mgr = manager(&clock);
    mgr.acquire("scope-a", &doc("d1"), "s1", None);
    clock.advance_ms(DEFAULT_LEASE_MS - 10);
    assert!(mgr.heartbeat("scope-a", &doc("d1"), "s1"));
    clock.advance_ms(20);
    // Without the heartbeat this would have expired; with it, still held.
    let outcome = mgr.acquire("scope-a", &doc("d1"), "s2", None);
    assert!(!outcome.success);
}

#[test]
fn heartbeat_by_non_holder_fails() {
    let clock = FakeClock::new(0);
    let mgr = manager(&clock);
    mgr.acquire("scope-a", &doc("d1"), "s1", None);
    assert!(!mgr.heartbeat("scope-a", &doc("d1"), "s2"));
}

#[test]
fn record_read_and_last_read_round_trip() {
    let clock = FakeClock::new(0);
    let mgr = manager(&clock);
    assert!(mgr.last_read("scope-a", "s1", &doc("d1")).is_none());
    mgr.record_read("scope-a", "s1", &doc("d1"), 12345);
    assert_eq!(mgr.last_read("scope-a", "s1", &doc("d1")), Some(12345));
}

#[test]
fn release_all_for_session_only_touches_that_sessions_locks_in_that_scope() {
    let clock = FakeClock::new(0);
    let mgr = manager(&clock);
    mgr.acquire("scope-a", &doc("d1"), "s1", None);
    mgr.acquire("scope-a", &doc("d2"), "s1", None);
    mgr.acquire("scope-a", &doc("d3"), "s2", None);
    mgr.acquire("scope-b", &doc("d1"), "s1", None);

    let released = mgr.release_all_for_session("scope-a", "s1");
    assert_eq!(released.len(), 2);
    assert!(mgr.get("scope-a", &doc("d1")).is_none());
    assert!(mgr.get("scope-a", &doc("d2")).is_none());
    assert!(mgr.get("scope-a", &doc("d3")).is_some());
    assert!(mgr.get("scope-b", &doc("d1")).is_some());
}

#[test]
fn get_on_unheld_resource_is_none() {
    let clock = FakeClock::new(0);
    let mgr = manager(&clock);
    assert!(mgr.get("scope-a", &doc("d1")).is_none());
}
