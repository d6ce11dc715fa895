//! Shared test fixture for the tool dispatch tests in this crate.
//!
//! Every `*_tool_tests.rs` file builds one [`Fixture`] per test and calls
//! [`Fixture::ctx`] to get a [`ToolCtx`] borrowing it, the same shape
//! `prizm-services`'s per-file fixtures use for `ServiceEnv`.

use std::sync::Arc;

use prizm_core::{FakeClock, IdGen, SequentialIdGen, SharedClock};
use prizm_runtime::{AuditLog, EventBus, LockManager};
use prizm_store::ScopeStore;
use prizm_terminal::TerminalManager;
use prizm_workflow::{EchoAgentStepRunner, WorkflowEngine};
use prizm_workspace::WorkspaceContext;

use crate::context::ToolCtx;
use crate::task_registry::SpawnTaskRegistry;

pub struct Fixture {
    pub _dir: tempfile::TempDir,
    pub scope: ScopeStore,
    pub events: EventBus,
    pub audit: AuditLog,
    pub clock: SharedClock,
    pub id_fn: Box<dyn Fn() -> String>,
    pub workspace: WorkspaceContext,
    pub terminals: TerminalManager,
    pub workflows: WorkflowEngine,
    pub tasks: SpawnTaskRegistry,
    pub session_id: String,
}

pub fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let clock: SharedClock = Arc::new(FakeClock::new(1_000));
    let locks = Arc::new(LockManager::new(Arc::clone(&clock)));
    let scope = ScopeStore::open(dir.path(), "scope-1", locks).unwrap();
    let ids = SequentialIdGen::new("id");
    let workspace = WorkspaceContext::new(dir.path());
    Fixture {
        scope,
        events: EventBus::new(),
        audit: AuditLog::new(),
        terminals: TerminalManager::new(Arc::clone(&clock)),
        workflows: WorkflowEngine::new(Arc::new(EchoAgentStepRunner)),
        tasks: SpawnTaskRegistry::new(),
        clock,
        id_fn: Box::new(move || ids.next()),
        workspace,
        session_id: "session-1".to_string(),
        _dir: dir,
    }
}

impl Fixture {
    pub fn ctx(&self) -> ToolCtx<'_> {
        ToolCtx {
            env: prizm_services::ServiceEnv::new(&self.scope, &self.events, &self.audit, &self.clock, self.id_fn.as_ref()),
            workspace: &self.workspace,
            session_id: self.session_id.clone(),
            terminals: &self.terminals,
            workflows: &self.workflows,
            tasks: &self.tasks,
        }
    }
}
