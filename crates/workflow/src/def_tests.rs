use super::*;

const SAMPLE: &str = r#"
name: triage-inbox
description: Triage new documents
steps:
  - type: agent
    name: summarize
    prompt: "Summarize the new document."
    retry_config:
      max_attempts: 3
      backoff_ms: 500
  - type: approve
    name: confirm
    approve_prompt: "Apply the suggested tags?"
  - type: transform
    name: finalize
    transform: "bindings.summarize.output"
"#;

#[test]
fn parses_all_three_step_kinds() {
    let def = WorkflowDef::parse(SAMPLE).unwrap();
    assert_eq!(def.name, "triage-inbox");
    assert_eq!(def.steps.len(), 3);
    assert_eq!(def.steps[0].name(), "summarize");
    assert!(matches!(def.steps[1], StepDef::Approve { .. }));
    assert_eq!(def.steps[0].retry_config().unwrap().max_attempts, 3);
}

#[test]
fn rejects_duplicate_step_names() {
    let yaml = r#"
name: bad
steps:
  - type: transform
    name: same
    transform: "x"
  - type: transform
    name: same
    transform: "y"
"#;
    let err = WorkflowDef::parse(yaml).unwrap_err();
    assert!(matches!(err, WorkflowDefError::DuplicateStep(_)));
}

#[test]
fn rejects_empty_step_list() {
    let yaml = "name: empty\nsteps: []\n";
    let err = WorkflowDef::parse(yaml).unwrap_err();
    assert!(matches!(err, WorkflowDefError::NoSteps));
}

#[test]
fn defaults_to_the_ten_minute_step_timeout() {
    let def = WorkflowDef::parse(SAMPLE).unwrap();
    assert_eq!(def.steps[0].timeout(), DEFAULT_STEP_TIMEOUT);
}
