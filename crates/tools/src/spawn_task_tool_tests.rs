use serde_json::json;

use crate::support::fixture;

use super::dispatch;

#[test]
fn spawn_then_status_then_set_result() {
    let fx = fixture();
    let ctx = fx.ctx();

    let spawned = dispatch(&ctx, "prizm_spawn_task", &json!({"prompt": "summarize this doc"}));
    assert!(!spawned.is_error);
    let task_id = spawned.structured_data.clone().unwrap();

    let status = dispatch(&ctx, "prizm_task_status", &json!({"taskId": task_id}));
    assert!(!status.is_error);
    assert_eq!(status.structured_data.as_deref(), Some("running"));

    // set_result from a different session is rejected.
    let other_ctx = fx.ctx();
    let rejected = dispatch(&other_ctx, "prizm_set_result", &json!({"taskId": task_id, "result": "nope"}));
    assert!(rejected.is_error);

    // set_result from the spawned session itself succeeds.
    let mut spawned_ctx = fx.ctx();
    spawned_ctx.session_id = task_id.clone();
    let done = dispatch(&spawned_ctx, "prizm_set_result", &json!({"taskId": task_id, "result": "done: 3 points"}));
    assert!(!done.is_error);

    let status = dispatch(&ctx, "prizm_task_status", &json!({"taskId": task_id}));
    assert!(!status.is_error);
    assert_eq!(status.structured_data.as_deref(), Some("done: 3 points"));

    // a second set_result is rejected, the task already terminated.
    let again = dispatch(&spawned_ctx, "prizm_set_result", &json!({"taskId": task_id, "result": "again"}));
    assert!(again.is_error);
}

#[test]
fn status_of_unknown_task_is_not_found() {
    let fx = fixture();
    let ctx = fx.ctx();
    let status = dispatch(&ctx, "prizm_task_status", &json!({"taskId": "ghost"}));
    assert!(status.is_error);
    assert!(status.text.contains("NOT_FOUND"));
}
