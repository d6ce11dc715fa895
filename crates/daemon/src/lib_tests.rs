use serde_json::json;

use super::*;

#[tokio::test]
async fn opens_a_scope_and_dispatches_a_tool_call() {
    let dir = tempfile::tempdir().unwrap();
    let daemon = Daemon::open(dir.path(), "scope-1").unwrap();

    let result = daemon
        .dispatch("session-1", "prizm_file", &json!({"action": "write", "path": "note.md", "content": "hi"}))
        .await;
    assert!(!result.is_error, "{}", result.text);

    let read = daemon.dispatch("session-1", "prizm_file", &json!({"action": "read", "path": "note.md"})).await;
    assert!(!read.is_error, "{}", read.text);
    assert!(read.text.contains("hi"));
}

#[tokio::test]
async fn reopening_the_same_directory_keeps_its_original_scope_id() {
    let dir = tempfile::tempdir().unwrap();
    {
        let _first = Daemon::open(dir.path(), "first-id").unwrap();
    }
    let second = Daemon::open(dir.path(), "second-id").unwrap();
    assert_eq!(second.scope().id(), "first-id");
}

#[tokio::test]
async fn a_disabled_tool_group_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let daemon = Daemon::open(dir.path(), "scope-1").unwrap().with_tool_filter(ToolFilter::all_enabled().disable(prizm_tools::ToolGroup::File));

    let result = daemon.dispatch("session-1", "prizm_file", &json!({"action": "list", "path": ""})).await;
    assert!(result.is_error);
    assert!(result.text.starts_with("[INVALID_INPUT]"));
}

#[test]
fn scope_id_for_falls_back_to_directory_name() {
    assert_eq!(Daemon::scope_id_for(Path::new("/home/user/notes")), "notes");
    assert_eq!(Daemon::scope_id_for(Path::new("/")), "scope");
}

#[tokio::test]
async fn a_registered_workflow_survives_reopening_the_scope() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = r#"
name: greeting
steps:
  - type: agent
    name: say_hello
    prompt: "hi"
"#;
    {
        let daemon = Daemon::open(dir.path(), "scope-1").unwrap();
        let result = daemon.dispatch("session-1", "prizm_workflow", &json!({"action": "register", "definition": yaml})).await;
        assert!(!result.is_error, "{}", result.text);
    }

    let reopened = Daemon::open(dir.path(), "scope-1").unwrap();
    let result = reopened.dispatch("session-1", "prizm_workflow", &json!({"action": "list_defs"})).await;
    assert!(!result.is_error, "{}", result.text);
    assert!(result.text.starts_with("1 workflow(s)"), "{}", result.text);
}
