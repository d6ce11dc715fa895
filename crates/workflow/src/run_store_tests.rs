use super::*;
use std::collections::HashMap;
use tempfile::tempdir;

fn state(run_id: &str, updated_at: i64) -> RunState {
    RunState {
        run_id: RunId::new(run_id),
        workflow_name: "triage-inbox".to_string(),
        current_step_index: 0,
        current_step_name: "summarize".to_string(),
        status: RunStatus::Running,
        resume_token: None,
        bindings: HashMap::new(),
        args: HashMap::new(),
        attempt: 0,
        error: None,
        created_at: updated_at,
        updated_at,
    }
}

#[test]
fn round_trips_through_save_and_load() {
    let dir = tempdir().unwrap();
    let s = state("run-1", 100);
    save(dir.path(), &s).unwrap();

    let loaded = load(dir.path(), "triage-inbox", "run-1").unwrap().unwrap();
    assert_eq!(loaded.run_id, s.run_id);
    assert_eq!(loaded.status, RunStatus::Running);
}

#[test]
fn load_of_missing_run_is_none() {
    let dir = tempdir().unwrap();
    assert!(load(dir.path(), "triage-inbox", "nope").unwrap().is_none());
}

#[test]
fn list_orders_most_recently_updated_first() {
    let dir = tempdir().unwrap();
    save(dir.path(), &state("run-1", 100)).unwrap();
    save(dir.path(), &state("run-2", 200)).unwrap();

    let runs = list(dir.path(), "triage-inbox").unwrap();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].run_id, RunId::new("run-2"));
}
