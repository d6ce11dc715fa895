use super::*;

#[test]
fn unknown_task_has_no_status() {
    let registry = SpawnTaskRegistry::new();
    assert_eq!(registry.status("missing"), None);
}

#[test]
fn spawn_then_set_result_completes_once() {
    let registry = SpawnTaskRegistry::new();
    registry.spawn("task-1");
    assert_eq!(registry.status("task-1"), Some(TaskStatus::Running));

    assert!(registry.set_result("task-1", "done".to_string()));
    assert_eq!(
        registry.status("task-1"),
        Some(TaskStatus::Completed { result: "done".to_string() })
    );

    // A second set_result on an already-completed task is rejected.
    assert!(!registry.set_result("task-1", "again".to_string()));
}

#[test]
fn fail_marks_task_failed() {
    let registry = SpawnTaskRegistry::new();
    registry.spawn("task-2");
    assert!(registry.fail("task-2", "boom".to_string()));
    assert_eq!(registry.status("task-2"), Some(TaskStatus::Failed { error: "boom".to_string() }));
}

#[test]
fn set_result_on_unknown_task_fails() {
    let registry = SpawnTaskRegistry::new();
    assert!(!registry.set_result("ghost", "x".to_string()));
}
