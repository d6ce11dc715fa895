//! In-memory bookkeeping for `prizm_spawn_task`/`prizm_task_status`/
//! `prizm_set_result` (§6.2).
//!
//! A spawned task *is* an agent session (`prizm_core::AgentSession`,
//! written by `prizm_spawn_task`) plus a status this registry tracks
//! in-process. Driving the spawned session's conversation against an LLM
//! vendor SDK is outside this engine's scope (§1 non-goals); this registry
//! only remembers whether a task is still running and, once
//! `prizm_set_result` is called from inside it, what it returned. One
//! instance is shared process-wide, the same way `TerminalManager` and
//! `WorkflowEngine` are.

use std::collections::HashMap;

use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    Completed { result: String },
    Failed { error: String },
}

impl TaskStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Running => "running",
            TaskStatus::Completed { .. } => "completed",
            TaskStatus::Failed { .. } => "failed",
        }
    }
}

#[derive(Default)]
pub struct SpawnTaskRegistry {
    tasks: Mutex<HashMap<String, TaskStatus>>,
}

impl SpawnTaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly spawned task as running. Overwrites any previous
    /// entry for the same id (ids are fresh session ids, so collisions
    /// would indicate a broken id generator).
    pub fn spawn(&self, task_id: &str) {
        self.tasks.lock().insert(task_id.to_string(), TaskStatus::Running);
    }

    pub fn status(&self, task_id: &str) -> Option<TaskStatus> {
        self.tasks.lock().get(task_id).cloned()
    }

    /// Complete a running task with its result. Returns `false` if the
    /// task is unknown or already finished, so callers can distinguish
    /// "no such task" from "already terminated".
    pub fn set_result(&self, task_id: &str, result: String) -> bool {
        let mut tasks = self.tasks.lock();
        match tasks.get(task_id) {
            Some(TaskStatus::Running) => {
                tasks.insert(task_id.to_string(), TaskStatus::Completed { result });
                true
            }
            _ => false,
        }
    }

    pub fn fail(&self, task_id: &str, error: String) -> bool {
        let mut tasks = self.tasks.lock();
        match tasks.get(task_id) {
            Some(TaskStatus::Running) => {
                tasks.insert(task_id.to_string(), TaskStatus::Failed { error });
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "task_registry_tests.rs"]
mod tests;
