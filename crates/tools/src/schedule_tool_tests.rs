use super::*;
use crate::support::fixture;
use serde_json::json;

#[test]
fn create_then_read() {
    let fx = fixture();
    let ctx = fx.ctx();

    let created = dispatch(&ctx, &json!({"action": "create", "title": "Standup", "type": "event", "startTime": 1_700_000_000}));
    assert!(!created.is_error, "{}", created.text);
    let id = created.structured_data.unwrap();

    let read = dispatch(&ctx, &json!({"action": "read", "id": id}));
    assert!(!read.is_error);
    assert!(read.text.starts_with("Standup at"));
}

#[test]
fn create_defaults_to_event_type_when_unspecified() {
    let fx = fixture();
    let ctx = fx.ctx();
    let created = dispatch(&ctx, &json!({"action": "create", "title": "Reminder me", "startTime": 1}));
    assert!(!created.is_error, "{}", created.text);
}

#[test]
fn create_rejects_unknown_type() {
    let fx = fixture();
    let ctx = fx.ctx();
    let result = dispatch(&ctx, &json!({"action": "create", "title": "X", "type": "party", "startTime": 1}));
    assert!(result.is_error);
    assert!(result.text.starts_with("[INVALID_INPUT]"));
}

#[test]
fn update_sets_recurrence() {
    let fx = fixture();
    let ctx = fx.ctx();
    let created = dispatch(&ctx, &json!({"action": "create", "title": "Standup", "startTime": 1}));
    let id = created.structured_data.unwrap();

    let updated = dispatch(&ctx, &json!({"action": "update", "id": id, "recurrence": "daily"}));
    assert!(!updated.is_error, "{}", updated.text);

    let item = schedule_service::get(&ctx.env, &id).unwrap();
    assert_eq!(item.recurrence.as_deref(), Some("daily"));
}

#[test]
fn delete_removes_the_item() {
    let fx = fixture();
    let ctx = fx.ctx();
    let created = dispatch(&ctx, &json!({"action": "create", "title": "Standup", "startTime": 1}));
    let id = created.structured_data.unwrap();

    let deleted = dispatch(&ctx, &json!({"action": "delete", "id": id}));
    assert!(!deleted.is_error);

    let result = dispatch(&ctx, &json!({"action": "read", "id": id}));
    assert!(result.is_error);
    assert!(result.text.starts_with("[NOT_FOUND]"));
}
