use super::*;
use async_trait::async_trait;
use prizm_core::{FakeClock, IdGen, SequentialIdGen, SharedClock};
use prizm_runtime::EventBus;
use prizm_terminal::TerminalManager;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tempfile::tempdir;

fn env_parts() -> (Arc<LockManager>, EventBus, TerminalManager, SharedClock, SequentialIdGen) {
    let clock: SharedClock = Arc::new(FakeClock::new(1_000));
    (
        Arc::new(LockManager::new(clock.clone())),
        EventBus::new(),
        TerminalManager::new(clock.clone()),
        clock,
        SequentialIdGen::new("wf"),
    )
}

struct FailNTimesRunner {
    remaining_failures: AtomicU32,
}

#[async_trait]
impl AgentStepRunner for FailNTimesRunner {
    async fn run(&self, request: AgentStepRequest<'_>) -> Result<AgentStepOutcome, AgentStepError> {
        if self.remaining_failures.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1)).is_ok() {
            return Err(AgentStepError::Failed("transient".to_string()));
        }
        Ok(AgentStepOutcome {
            output: request.prompt,
            structured_data: None,
        })
    }
}

fn def_with_agent_and_transform() -> WorkflowDef {
    WorkflowDef::parse(
        r#"
name: greet
steps:
  - type: agent
    name: greeting
    prompt: "hello"
  - type: transform
    name: shout
    transform: "${greeting.output}!"
"#,
    )
    .unwrap()
}

#[tokio::test]
async fn runs_agent_then_transform_steps_to_completion() {
    let dir = tempdir().unwrap();
    let (locks, events, terminals, clock, id_gen) = env_parts();
    let engine = WorkflowEngine::new(Arc::new(EchoAgentStepRunner));
    engine.register(def_with_agent_and_transform());

    let gen_fn = move || id_gen.next();
    let env = WorkflowEnv {
        scope_root: dir.path(),
        scope_id: "scope-1",
        events: &events,
        locks: &locks,
        terminals: &terminals,
        clock: &clock,
        id_gen: &gen_fn,
    };

    let state = engine.run(&env, "greet", HashMap::new()).await.unwrap();
    assert_eq!(state.status, RunStatus::Completed);
    assert_eq!(state.bindings["greeting"].output, "hello");
    assert_eq!(state.bindings["shout"].output, "hello!");
}

#[tokio::test]
async fn retries_a_failing_agent_step_until_it_succeeds() {
    let dir = tempdir().unwrap();
    let (locks, events, terminals, clock, id_gen) = env_parts();
    let def = WorkflowDef::parse(
        r#"
name: flaky
steps:
  - type: agent
    name: step1
    prompt: "go"
    retry_config:
      max_attempts: 3
      backoff_ms: 1
"#,
    )
    .unwrap();
    let engine = WorkflowEngine::new(Arc::new(FailNTimesRunner {
        remaining_failures: AtomicU32::new(2),
    }));
    engine.register(def);

    let gen_fn = move || id_gen.next();
    let env = WorkflowEnv {
        scope_root: dir.path(),
        scope_id: "scope-1",
        events: &events,
        locks: &locks,
        terminals: &terminals,
        clock: &clock,
        id_gen: &gen_fn,
    };

    let state = engine.run(&env, "flaky", HashMap::new()).await.unwrap();
    assert_eq!(state.status, RunStatus::Completed);
}

#[tokio::test]
async fn exhausted_retries_fail_the_run() {
    let dir = tempdir().unwrap();
    let (locks, events, terminals, clock, id_gen) = env_parts();
    let def = WorkflowDef::parse(
        r#"
name: always-fails
steps:
  - type: agent
    name: step1
    prompt: "go"
    retry_config:
      max_attempts: 2
      backoff_ms: 1
"#,
    )
    .unwrap();
    let engine = WorkflowEngine::new(Arc::new(FailNTimesRunner {
        remaining_failures: AtomicU32::new(10),
    }));
    engine.register(def);

    let gen_fn = move || id_gen.next();
    let env = WorkflowEnv {
        scope_root: dir.path(),
        scope_id: "scope-1",
        events: &events,
        locks: &locks,
        terminals: &terminals,
        clock: &clock,
        id_gen: &gen_fn,
    };

    let state = engine.run(&env, "always-fails", HashMap::new()).await.unwrap();
    assert_eq!(state.status, RunStatus::Failed);
    assert!(state.error.is_some());
}

#[tokio::test]
async fn approve_step_suspends_and_resume_completes_the_run() {
    let dir = tempdir().unwrap();
    let (locks, events, terminals, clock, id_gen) = env_parts();
    let def = WorkflowDef::parse(
        r#"
name: gated
steps:
  - type: approve
    name: gate
    approve_prompt: "ok?"
  - type: transform
    name: done
    transform: "finished"
"#,
    )
    .unwrap();
    let engine = WorkflowEngine::new(Arc::new(EchoAgentStepRunner));
    engine.register(def);

    let gen_fn = move || id_gen.next();
    let env = WorkflowEnv {
        scope_root: dir.path(),
        scope_id: "scope-1",
        events: &events,
        locks: &locks,
        terminals: &terminals,
        clock: &clock,
        id_gen: &gen_fn,
    };

    let suspended = engine.run(&env, "gated", HashMap::new()).await.unwrap();
    assert_eq!(suspended.status, RunStatus::AwaitingApproval);
    let token = suspended.resume_token.clone().unwrap();

    let resumed = engine
        .resume(&env, "gated", suspended.run_id.as_str(), &token, true)
        .await
        .unwrap();
    assert_eq!(resumed.status, RunStatus::Completed);
    assert_eq!(resumed.bindings["done"].output, "finished");
}

#[tokio::test]
async fn rejecting_approval_cancels_the_run() {
    let dir = tempdir().unwrap();
    let (locks, events, terminals, clock, id_gen) = env_parts();
    let def = WorkflowDef::parse(
        r#"
name: gated2
steps:
  - type: approve
    name: gate
    approve_prompt: "ok?"
"#,
    )
    .unwrap();
    let engine = WorkflowEngine::new(Arc::new(EchoAgentStepRunner));
    engine.register(def);

    let gen_fn = move || id_gen.next();
    let env = WorkflowEnv {
        scope_root: dir.path(),
        scope_id: "scope-1",
        events: &events,
        locks: &locks,
        terminals: &terminals,
        clock: &clock,
        id_gen: &gen_fn,
    };

    let suspended = engine.run(&env, "gated2", HashMap::new()).await.unwrap();
    let token = suspended.resume_token.clone().unwrap();
    let result = engine
        .resume(&env, "gated2", suspended.run_id.as_str(), &token, false)
        .await
        .unwrap();
    assert_eq!(result.status, RunStatus::Cancelled);
}

#[tokio::test]
async fn cancel_tears_down_a_running_run() {
    let dir = tempdir().unwrap();
    let (locks, events, terminals, clock, id_gen) = env_parts();
    let def = WorkflowDef::parse(
        r#"
name: long
steps:
  - type: approve
    name: gate
    approve_prompt: "ok?"
"#,
    )
    .unwrap();
    let engine = WorkflowEngine::new(Arc::new(EchoAgentStepRunner));
    engine.register(def);

    let gen_fn = move || id_gen.next();
    let env = WorkflowEnv {
        scope_root: dir.path(),
        scope_id: "scope-1",
        events: &events,
        locks: &locks,
        terminals: &terminals,
        clock: &clock,
        id_gen: &gen_fn,
    };

    let suspended = engine.run(&env, "long", HashMap::new()).await.unwrap();
    let cancelled = engine.cancel(&env, "long", suspended.run_id.as_str()).await.unwrap();
    assert_eq!(cancelled.status, RunStatus::Cancelled);

    let again = engine.cancel(&env, "long", suspended.run_id.as_str()).await.unwrap();
    assert_eq!(again.status, RunStatus::Cancelled);
}

#[tokio::test]
async fn cancel_publishes_a_lock_changed_released_event_for_locks_the_run_held() {
    let dir = tempdir().unwrap();
    let (locks, events, terminals, clock, id_gen) = env_parts();
    let def = WorkflowDef::parse(
        r#"
name: long2
steps:
  - type: approve
    name: gate
    approve_prompt: "ok?"
"#,
    )
    .unwrap();
    let engine = WorkflowEngine::new(Arc::new(EchoAgentStepRunner));
    engine.register(def);

    let gen_fn = move || id_gen.next();
    let env = WorkflowEnv {
        scope_root: dir.path(),
        scope_id: "scope-1",
        events: &events,
        locks: &locks,
        terminals: &terminals,
        clock: &clock,
        id_gen: &gen_fn,
    };

    let suspended = engine.run(&env, "long2", HashMap::new()).await.unwrap();
    let resource = prizm_core::ResourceRef::new(prizm_core::ResourceType::Document, "d1");
    locks.acquire("scope-1", &resource, suspended.run_id.as_str(), None);

    let rx = events.subscribe("resource:");
    engine.cancel(&env, "long2", suspended.run_id.as_str()).await.unwrap();

    let event = rx.recv_timeout(std::time::Duration::from_millis(100)).unwrap();
    match event {
        prizm_core::Event::ResourceLockChanged { action, .. } => assert_eq!(action, prizm_core::LockAction::Released),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn missing_required_arg_is_rejected() {
    let dir = tempdir().unwrap();
    let (locks, events, terminals, clock, id_gen) = env_parts();
    let def = WorkflowDef::parse(
        r#"
name: needs-arg
args:
  - name: topic
    required: true
steps:
  - type: transform
    name: echo
    transform: "${args.topic}"
"#,
    )
    .unwrap();
    let engine = WorkflowEngine::new(Arc::new(EchoAgentStepRunner));
    engine.register(def);

    let gen_fn = move || id_gen.next();
    let env = WorkflowEnv {
        scope_root: dir.path(),
        scope_id: "scope-1",
        events: &events,
        locks: &locks,
        terminals: &terminals,
        clock: &clock,
        id_gen: &gen_fn,
    };

    let err = engine.run(&env, "needs-arg", HashMap::new()).await.unwrap_err();
    assert!(matches!(err, WorkflowError::MissingArg(_)));
}
