//! `WorkflowDef`: the YAML-declared shape of a workflow (§4.16).
//!
//! Mirrors the runbook crate's step-definition style on the teacher side —
//! a tagged enum per step kind, parsed straight out of `serde_yaml` — but
//! the step vocabulary here is Prizm's own (`agent` / `approve` /
//! `transform`) rather than the teacher's pipeline steps.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default step timeout when a step declares none (§5: "Workflow step:
/// declared per-step, default 10 min").
pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Error)]
pub enum WorkflowDefError {
    #[error("invalid workflow definition: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("workflow has no steps")]
    NoSteps,
    #[error("duplicate step name: {0}")]
    DuplicateStep(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub args: Vec<ArgDef>,
    #[serde(default)]
    pub outputs: Vec<String>,
    pub steps: Vec<StepDef>,
    #[serde(default)]
    pub triggers: Vec<TriggerDef>,
    #[serde(default)]
    pub config: WorkflowConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowConfig {
    #[serde(default)]
    pub max_concurrent_runs: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgDef {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TriggerDef {
    Cron { schedule: String },
    Manual,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    pub max_attempts: u32,
    #[serde(default)]
    pub backoff_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepDef {
    Agent {
        name: String,
        prompt: String,
        #[serde(default)]
        model: Option<String>,
        #[serde(default)]
        session_config: Option<serde_json::Value>,
        #[serde(default)]
        timeout_ms: Option<u64>,
        #[serde(default)]
        retry_config: Option<RetryConfig>,
        #[serde(default)]
        continue_on_error: bool,
    },
    Approve {
        name: String,
        approve_prompt: String,
    },
    Transform {
        name: String,
        /// A dotted-path extraction/template expression, evaluated by
        /// [`crate::transform::evaluate`] against the accumulated bindings.
        transform: String,
        #[serde(default)]
        continue_on_error: bool,
    },
}

impl StepDef {
    pub fn name(&self) -> &str {
        match self {
            StepDef::Agent { name, .. } => name,
            StepDef::Approve { name, .. } => name,
            StepDef::Transform { name, .. } => name,
        }
    }

    pub fn retry_config(&self) -> Option<&RetryConfig> {
        match self {
            StepDef::Agent { retry_config, .. } => retry_config.as_ref(),
            _ => None,
        }
    }

    pub fn continue_on_error(&self) -> bool {
        match self {
            StepDef::Agent { continue_on_error, .. } => *continue_on_error,
            StepDef::Transform { continue_on_error, .. } => *continue_on_error,
            StepDef::Approve { .. } => false,
        }
    }

    pub fn timeout(&self) -> Duration {
        match self {
            StepDef::Agent { timeout_ms: Some(ms), .. } => Duration::from_millis(*ms),
            _ => DEFAULT_STEP_TIMEOUT,
        }
    }
}

impl WorkflowDef {
    pub fn parse(yaml: &str) -> Result<Self, WorkflowDefError> {
        let def: WorkflowDef = serde_yaml::from_str(yaml)?;
        def.validate()?;
        Ok(def)
    }

    fn validate(&self) -> Result<(), WorkflowDefError> {
        if self.steps.is_empty() {
            return Err(WorkflowDefError::NoSteps);
        }
        let mut seen = HashMap::new();
        for step in &self.steps {
            if seen.insert(step.name().to_string(), ()).is_some() {
                return Err(WorkflowDefError::DuplicateStep(step.name().to_string()));
            }
        }
        Ok(())
    }

    pub fn step_at(&self, index: usize) -> Option<&StepDef> {
        self.steps.get(index)
    }
}

#[cfg(test)]
#[path = "def_tests.rs"]
mod tests;
