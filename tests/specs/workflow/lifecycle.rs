//! `prizm workflow` lifecycle: register a definition, run it, check status.

use crate::prelude::*;

const GREETING_WORKFLOW: &str = r#"
name: greeting
description: Says hello to someone.
args:
  - name: who
    required: true
steps:
  - type: agent
    name: say_hello
    prompt: "Hello ${who}"
"#;

#[test]
fn register_run_and_check_status() {
    let project = Project::empty();
    project.file("greeting.yaml", GREETING_WORKFLOW);

    project
        .cli()
        .args(&["workflow", "register", "greeting.yaml"])
        .passes()
        .stdout_has("registered workflow greeting");

    project.cli().args(&["workflow", "list-defs"]).passes().stdout_has("greeting");

    let json = project
        .cli()
        .args(&["-o", "json", "workflow", "run", "greeting", "who=world"])
        .passes()
        .stdout();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let run_id = value["data"].as_str().unwrap().to_string();

    project
        .cli()
        .args(&["workflow", "status", "greeting", &run_id])
        .passes()
        .stdout_has(&run_id);

    project.cli().args(&["workflow", "list", "greeting"]).passes().stdout_has("1 run(s)");
}

#[test]
fn running_an_unregistered_workflow_fails() {
    let project = Project::empty();
    project
        .cli()
        .args(&["workflow", "run", "does-not-exist", "who=world"])
        .fails()
        .stderr_has("[NOT_FOUND]");
}
