use super::*;
use crate::support::fixture;
use serde_json::json;

#[test]
fn create_requires_recurrence() {
    let fx = fixture();
    let ctx = fx.ctx();
    let result = dispatch(&ctx, &json!({"action": "create", "title": "Standup"}));
    assert!(result.is_error);
    assert!(result.text.starts_with("[INVALID_INPUT]"));
}

#[test]
fn create_then_list_shows_only_recurring_items() {
    let fx = fixture();
    let ctx = fx.ctx();
    dispatch(&ctx, &json!({"action": "create", "title": "Daily standup", "recurrence": "daily"}));

    let list = dispatch(&ctx, &json!({"action": "list"}));
    assert!(!list.is_error);
    assert_eq!(list.text, "1 recurring item(s)");
}

#[test]
fn update_on_a_non_recurring_item_is_rejected() {
    let fx = fixture();
    let ctx = fx.ctx();
    let plain = schedule_service::create(
        &ctx.env,
        "s1",
        CreateScheduleArgs {
            title: "One-off".to_string(),
            item_type: ScheduleItemType::Event,
            start_time: 1,
            recurrence: None,
        },
    )
    .unwrap();

    let result = dispatch(&ctx, &json!({"action": "update", "id": plain.id.as_str(), "recurrence": "daily"}));
    assert!(result.is_error);
    assert!(result.text.starts_with("[INVALID_INPUT]"));
}

#[test]
fn delete_removes_a_recurring_item() {
    let fx = fixture();
    let ctx = fx.ctx();
    let created = dispatch(&ctx, &json!({"action": "create", "title": "Daily standup", "recurrence": "daily"}));
    let id = created.structured_data.unwrap();

    let deleted = dispatch(&ctx, &json!({"action": "delete", "id": id}));
    assert!(!deleted.is_error);
    assert!(schedule_service::get(&ctx.env, &id).is_err());
}
