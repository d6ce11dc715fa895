//! `WorkflowEngine`: the durable step machine described by §4.16 and the
//! redesign note in §REDESIGN FLAGS ("Coroutine control flow... modeled as
//! a resumable state machine").
//!
//! Grounded on the teacher's `engine::runtime::pipeline` step-transition
//! style (effects recorded as typed events, state advanced one step at a
//! time) but the state itself is a plain JSON record persisted by
//! [`crate::run_store`] rather than a WAL-replayed event log — Prizm's scope
//! directory already is the durable store, so a separate write-ahead log
//! would duplicate it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use prizm_core::{Event, LockAction, RunId, SessionId, SharedClock};
use prizm_runtime::{EventBus, LockManager};
use prizm_terminal::TerminalManager;
use thiserror::Error;

use crate::agent_step::{AgentStepError, AgentStepRequest, AgentStepRunner};
use crate::def::{StepDef, WorkflowDef, WorkflowDefError};
use crate::run_store::{self, RunState, RunStatus, RunStoreError, StepBinding};
use crate::transform;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("workflow {0} is not registered")]
    UnknownWorkflow(String),
    #[error("missing required arg: {0}")]
    MissingArg(String),
    #[error("run {0} not found")]
    RunNotFound(String),
    #[error("run {0} is not awaiting approval")]
    NotAwaitingApproval(String),
    #[error("resume token does not match")]
    TokenMismatch,
    #[error(transparent)]
    Def(#[from] WorkflowDefError),
    #[error(transparent)]
    Store(#[from] RunStoreError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Dependencies threaded through every engine call, borrowed the same way
/// `prizm_services::ServiceEnv` borrows its collaborators for one call.
pub struct WorkflowEnv<'a> {
    pub scope_root: &'a Path,
    pub scope_id: &'a str,
    pub events: &'a EventBus,
    pub locks: &'a Arc<LockManager>,
    pub terminals: &'a TerminalManager,
    pub clock: &'a SharedClock,
    pub id_gen: &'a dyn Fn() -> String,
}

pub struct WorkflowEngine {
    defs: Mutex<HashMap<String, WorkflowDef>>,
    agent_runner: Arc<dyn AgentStepRunner>,
}

impl WorkflowEngine {
    pub fn new(agent_runner: Arc<dyn AgentStepRunner>) -> Self {
        Self {
            defs: Mutex::new(HashMap::new()),
            agent_runner,
        }
    }

    pub fn register(&self, def: WorkflowDef) {
        self.defs.lock().insert(def.name.clone(), def);
    }

    pub fn get_def(&self, name: &str) -> Option<WorkflowDef> {
        self.defs.lock().get(name).cloned()
    }

    pub fn list_defs(&self) -> Vec<WorkflowDef> {
        self.defs.lock().values().cloned().collect()
    }

    /// Start a new run. The run's own id doubles as its lock/terminal
    /// ownership key, the same way an agent session id does for tool calls
    /// made from inside an agent step.
    pub async fn run(&self, env: &WorkflowEnv<'_>, workflow_name: &str, args: HashMap<String, String>) -> WorkflowResult<RunState> {
        let def = self
            .get_def(workflow_name)
            .ok_or_else(|| WorkflowError::UnknownWorkflow(workflow_name.to_string()))?;
        for arg in &def.args {
            if arg.required && !args.contains_key(&arg.name) {
                return Err(WorkflowError::MissingArg(arg.name.clone()));
            }
        }

        let run_id = RunId::new((env.id_gen)());
        let run_workspace = prizm_store::path_provider::run_workspace_dir(env.scope_root, workflow_name, run_id.as_str());
        std::fs::create_dir_all(&run_workspace)?;

        let now = env.clock.now_ms();
        let mut state = RunState {
            run_id: run_id.clone(),
            workflow_name: workflow_name.to_string(),
            current_step_index: 0,
            current_step_name: def.steps[0].name().to_string(),
            status: RunStatus::Running,
            resume_token: None,
            bindings: HashMap::new(),
            args: args.clone(),
            attempt: 0,
            error: None,
            created_at: now,
            updated_at: now,
        };
        run_store::save(env.scope_root, &state)?;
        env.events.publish(Event::WorkflowRunStarted {
            run_id: run_id.clone(),
            workflow_name: workflow_name.to_string(),
        });

        self.execute_from(env, &def, &mut state, &args, &run_workspace).await?;
        Ok(state)
    }

    /// Resume a run suspended at an `approve` step.
    pub async fn resume(&self, env: &WorkflowEnv<'_>, workflow_name: &str, run_id: &str, token: &str, approved: bool) -> WorkflowResult<RunState> {
        let mut state = run_store::load(env.scope_root, workflow_name, run_id)?
            .ok_or_else(|| WorkflowError::RunNotFound(run_id.to_string()))?;
        if state.status != RunStatus::AwaitingApproval {
            return Err(WorkflowError::NotAwaitingApproval(run_id.to_string()));
        }
        if state.resume_token.as_deref() != Some(token) {
            return Err(WorkflowError::TokenMismatch);
        }

        if !approved {
            state.status = RunStatus::Cancelled;
            state.error = Some("rejected at approval gate".to_string());
            state.resume_token = None;
            state.updated_at = env.clock.now_ms();
            self.teardown_run(env, &state).await;
            run_store::save(env.scope_root, &state)?;
            env.events.publish(Event::WorkflowRunCancelled { run_id: state.run_id.clone() });
            return Ok(state);
        }

        let def = self
            .get_def(workflow_name)
            .ok_or_else(|| WorkflowError::UnknownWorkflow(workflow_name.to_string()))?;
        state.bindings.insert(
            state.current_step_name.clone(),
            StepBinding {
                output: "approved".to_string(),
                structured_data: None,
            },
        );
        state.resume_token = None;
        state.current_step_index += 1;
        state.status = RunStatus::Running;

        let run_workspace = prizm_store::path_provider::run_workspace_dir(env.scope_root, workflow_name, run_id);
        let args = state.args.clone();
        self.execute_from(env, &def, &mut state, &args, &run_workspace).await?;
        Ok(state)
    }

    pub async fn cancel(&self, env: &WorkflowEnv<'_>, workflow_name: &str, run_id: &str) -> WorkflowResult<RunState> {
        let mut state = run_store::load(env.scope_root, workflow_name, run_id)?
            .ok_or_else(|| WorkflowError::RunNotFound(run_id.to_string()))?;
        if state.status.is_terminal() {
            return Ok(state);
        }
        state.status = RunStatus::Cancelled;
        state.updated_at = env.clock.now_ms();
        self.teardown_run(env, &state).await;
        run_store::save(env.scope_root, &state)?;
        env.events.publish(Event::WorkflowRunCancelled { run_id: state.run_id.clone() });
        Ok(state)
    }

    pub fn status(&self, scope_root: &Path, workflow_name: &str, run_id: &str) -> WorkflowResult<RunState> {
        run_store::load(scope_root, workflow_name, run_id)?.ok_or_else(|| WorkflowError::RunNotFound(run_id.to_string()))
    }

    pub fn list_runs(&self, scope_root: &Path, workflow_name: &str) -> WorkflowResult<Vec<RunState>> {
        Ok(run_store::list(scope_root, workflow_name)?)
    }

    /// Release locks and close terminals owned by a run, per §4.16's
    /// cancellation semantics and §5's cooperative-cancellation rule.
    async fn teardown_run(&self, env: &WorkflowEnv<'_>, state: &RunState) {
        let released = env.locks.release_all_for_session(env.scope_id, state.run_id.as_str());
        for resource in released {
            env.events.publish(Event::ResourceLockChanged {
                action: LockAction::Released,
                resource,
                session_id: SessionId::new(state.run_id.as_str()),
                reason: None,
            });
        }
        env.terminals.close_all_for_session(state.run_id.as_str()).await;
    }

    async fn execute_from(
        &self,
        env: &WorkflowEnv<'_>,
        def: &WorkflowDef,
        state: &mut RunState,
        args: &HashMap<String, String>,
        run_workspace: &PathBuf,
    ) -> WorkflowResult<()> {
        while state.current_step_index < def.steps.len() {
            let step = def
                .step_at(state.current_step_index)
                .ok_or_else(|| WorkflowError::RunNotFound(state.run_id.as_str().to_string()))?;
            state.current_step_name = step.name().to_string();

            match step {
                StepDef::Agent { prompt, model, .. } => {
                    let rendered = transform::evaluate(prompt, &state.bindings, args);
                    match self.run_agent_step(env, state, step, &rendered, model.as_deref(), run_workspace).await {
                        Ok(outcome) => {
                            state.bindings.insert(step.name().to_string(), outcome);
                        }
                        Err(message) => {
                            if step.continue_on_error() {
                                state.bindings.insert(
                                    step.name().to_string(),
                                    StepBinding {
                                        output: String::new(),
                                        structured_data: None,
                                    },
                                );
                            } else {
                                state.status = RunStatus::Failed;
                                state.error = Some(message);
                                state.updated_at = env.clock.now_ms();
                                run_store::save(env.scope_root, state)?;
                                env.events.publish(Event::WorkflowRunFailed {
                                    run_id: state.run_id.clone(),
                                    error: state.error.clone().unwrap_or_default(),
                                });
                                return Ok(());
                            }
                        }
                    }
                }
                StepDef::Approve { approve_prompt, .. } => {
                    state.status = RunStatus::AwaitingApproval;
                    state.resume_token = Some((env.id_gen)());
                    state.bindings.insert(
                        step.name().to_string(),
                        StepBinding {
                            output: approve_prompt.clone(),
                            structured_data: None,
                        },
                    );
                    state.updated_at = env.clock.now_ms();
                    run_store::save(env.scope_root, state)?;
                    return Ok(());
                }
                StepDef::Transform { transform: expr, .. } => {
                    let rendered = transform::evaluate(expr, &state.bindings, args);
                    state.bindings.insert(
                        step.name().to_string(),
                        StepBinding {
                            output: rendered,
                            structured_data: None,
                        },
                    );
                }
            }

            state.current_step_index += 1;
            state.updated_at = env.clock.now_ms();
            run_store::save(env.scope_root, state)?;
            env.events.publish(Event::WorkflowStepCompleted {
                run_id: state.run_id.clone(),
                step_index: state.current_step_index - 1,
            });
        }

        state.status = RunStatus::Completed;
        state.updated_at = env.clock.now_ms();
        run_store::save(env.scope_root, state)?;
        env.events.publish(Event::WorkflowRunCompleted { run_id: state.run_id.clone() });
        Ok(())
    }

    /// Run one `agent` step with its retry policy, returning either the
    /// step's binding or a human-readable failure message once retries are
    /// exhausted.
    async fn run_agent_step(
        &self,
        env: &WorkflowEnv<'_>,
        state: &RunState,
        step: &StepDef,
        prompt: &str,
        model: Option<&str>,
        run_workspace: &Path,
    ) -> Result<StepBinding, String> {
        let max_attempts = step.retry_config().map(|r| r.max_attempts).unwrap_or(1).max(1);
        let backoff_ms = step.retry_config().map(|r| r.backoff_ms).unwrap_or(0);
        let timeout = step.timeout();

        let mut last_error = String::new();
        for attempt in 1..=max_attempts {
            let request = AgentStepRequest {
                run_id: &state.run_id,
                step_name: step.name(),
                prompt: prompt.to_string(),
                model,
                run_workspace,
            };
            let outcome = tokio::time::timeout(timeout, self.agent_runner.run(request)).await;
            match outcome {
                Ok(Ok(outcome)) => {
                    return Ok(StepBinding {
                        output: outcome.output,
                        structured_data: outcome.structured_data,
                    });
                }
                Ok(Err(AgentStepError::Failed(msg))) => last_error = msg,
                Ok(Err(AgentStepError::TimedOut)) | Err(_) => last_error = "step timed out".to_string(),
            }
            if attempt < max_attempts && backoff_ms > 0 {
                tokio::time::sleep(Duration::from_millis(backoff_ms * attempt as u64)).await;
            }
        }
        Err(last_error)
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
