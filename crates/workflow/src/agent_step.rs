//! Pluggable execution of `agent` steps.
//!
//! Spinning up a background agent session means talking to an LLM vendor
//! SDK, which §1's Non-goals explicitly exclude from this crate. The engine
//! only needs *something* that takes a rendered prompt and a run workspace
//! and returns the step's bindings, so that seam is a trait: production
//! wiring (in `prizm-daemon`) supplies a real implementation, tests supply a
//! canned one.

use std::path::Path;

use async_trait::async_trait;
use prizm_core::RunId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentStepError {
    #[error("agent step failed: {0}")]
    Failed(String),
    #[error("agent step timed out")]
    TimedOut,
}

pub struct AgentStepRequest<'a> {
    pub run_id: &'a RunId,
    pub step_name: &'a str,
    pub prompt: String,
    pub model: Option<&'a str>,
    pub run_workspace: &'a Path,
}

pub struct AgentStepOutcome {
    pub output: String,
    pub structured_data: Option<String>,
}

/// Runs one `agent` step to completion (or failure). Implementations are
/// expected to let the spawned session call tools against the run
/// workspace and resolve once it calls `prizm_set_result`.
#[async_trait]
pub trait AgentStepRunner: Send + Sync {
    async fn run(&self, request: AgentStepRequest<'_>) -> Result<AgentStepOutcome, AgentStepError>;
}

/// Test/offline stand-in: echoes the rendered prompt back as the output,
/// so step-machine transitions and retry logic can be exercised without a
/// real agent backend.
pub struct EchoAgentStepRunner;

#[async_trait]
impl AgentStepRunner for EchoAgentStepRunner {
    async fn run(&self, request: AgentStepRequest<'_>) -> Result<AgentStepOutcome, AgentStepError> {
        Ok(AgentStepOutcome {
            output: request.prompt,
            structured_data: None,
        })
    }
}
