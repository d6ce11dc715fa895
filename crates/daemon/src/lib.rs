// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! prizm-daemon: process wiring that turns a directory on disk into a
//! running engine instance — opens the scope, runs its migrations, wires
//! up the runtime singletons, and exposes the builtin tool dispatcher to
//! whatever owns this process (`prizmd`'s own event loop, or a test
//! harness embedding [`Daemon`] directly). Binary `prizmd`.
//!
//! There is no socket and no wire protocol here: per §0.1, daemon
//! bind/transport is explicitly out of scope. A `Daemon` is meant to be
//! embedded in-process by whatever host speaks to an agent on one side and
//! calls [`Daemon::dispatch`] on the other.

pub mod env;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use prizm_core::{IdGen, SharedClock, SystemClock, UuidIdGen};
use prizm_runtime::{AuditLog, EventBus, LockManager, Subscription};
use prizm_services::ServiceEnv;
use prizm_store::{path_provider, ScopeStore, ScopeStoreError};
use prizm_terminal::TerminalManager;
use prizm_tools::{SpawnTaskRegistry, ToolCtx, ToolFilter, ToolResult};
use prizm_workflow::{EchoAgentStepRunner, WorkflowDef, WorkflowEngine};
use prizm_workspace::WorkspaceContext;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("could not resolve a state/home directory for this user")]
    NoStateDir,
    #[error(transparent)]
    Scope(#[from] ScopeStoreError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One open scope plus every process-wide runtime singleton a tool
/// dispatch against it needs. Construct one per workbench directory;
/// `prizmd` opens exactly one, but a test or an embedding host may open
/// several scopes concurrently since `LockManager`/`EventBus` key every
/// operation by scope id (invariant 8).
pub struct Daemon {
    scope: ScopeStore,
    events: EventBus,
    audit: AuditLog,
    clock: SharedClock,
    id_gen: UuidIdGen,
    terminals: TerminalManager,
    workflows: WorkflowEngine,
    tasks: SpawnTaskRegistry,
    tool_filter: ToolFilter,
}

impl Daemon {
    /// Open (creating if necessary) the scope at `scope_root`, running
    /// every pending migration. `scope_id` seeds `scope.json` the first
    /// time this directory is opened; later opens read the id back from
    /// disk and ignore this argument.
    pub fn open(scope_root: impl Into<PathBuf>, scope_id: impl Into<String>) -> Result<Self, DaemonError> {
        let clock: SharedClock = Arc::new(SystemClock);
        let locks = Arc::new(LockManager::new(Arc::clone(&clock)));
        let scope = ScopeStore::open(scope_root, scope_id, locks)?;

        let workflows = WorkflowEngine::new(Arc::new(EchoAgentStepRunner));
        load_workflow_defs(scope.scope_root(), &workflows);

        Ok(Self {
            terminals: TerminalManager::new(Arc::clone(&clock)),
            workflows,
            tasks: SpawnTaskRegistry::new(),
            events: EventBus::new(),
            audit: AuditLog::new(),
            clock,
            id_gen: UuidIdGen,
            scope,
            tool_filter: ToolFilter::all_enabled(),
        })
    }

    /// Derive a stable scope id from a scope root's own directory name,
    /// for callers that don't have a more meaningful id to hand (`prizmd`
    /// itself, mostly — see [`open`](Self::open)).
    pub fn scope_id_for(scope_root: &Path) -> String {
        scope_root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "scope".to_string())
    }

    pub fn scope(&self) -> &ScopeStore {
        &self.scope
    }

    /// Restrict which tool groups [`dispatch`](Self::dispatch) will accept,
    /// e.g. disabling [`prizm_tools::ToolGroup::Terminal`] for a
    /// sandboxed caller.
    pub fn with_tool_filter(mut self, filter: ToolFilter) -> Self {
        self.tool_filter = filter;
        self
    }

    /// Subscribe to scope events, e.g. for a UI to drive a live view, or
    /// for the daemon's own logging sink (see `main.rs`). An empty prefix
    /// matches every topic.
    pub fn subscribe_events(&self, topic_prefix: impl Into<String>) -> Subscription {
        self.events.subscribe(topic_prefix)
    }

    /// Dispatch one builtin tool call against this scope on behalf of
    /// `session_id`, building that session's workspace layering (§4.12) as
    /// it goes: its session workspace always exists once referenced, while
    /// run/workflow roots stay unset here since a plain tool call (outside
    /// a workflow run) never needs them.
    pub async fn dispatch(&self, session_id: &str, tool_name: &str, raw_args: &serde_json::Value) -> ToolResult {
        let workspace = WorkspaceContext::new(self.scope.scope_root())
            .with_session_workspace(path_provider::session_workspace_dir(self.scope.scope_root(), session_id));
        let id_fn = || self.id_gen.next();
        let ctx = ToolCtx {
            env: ServiceEnv::new(&self.scope, &self.events, &self.audit, &self.clock, &id_fn),
            workspace: &workspace,
            session_id: session_id.to_string(),
            terminals: &self.terminals,
            workflows: &self.workflows,
            tasks: &self.tasks,
        };
        prizm_tools::dispatch(&ctx, &self.tool_filter, tool_name, raw_args).await
    }
}

/// Re-register every workflow definition persisted by a previous `register`
/// call (see `prizm_tools::workflow_tool`), so a workflow registered once
/// survives past the process that registered it.
fn load_workflow_defs(scope_root: &Path, workflows: &WorkflowEngine) {
    let dir = path_provider::workflows_dir(scope_root);
    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
        Err(e) => {
            warn!(error = %e, dir = %dir.display(), "could not read workflow definitions directory");
            return;
        }
    };
    for entry in entries.flatten() {
        let def_path = entry.path().join("def.yaml");
        let yaml = match std::fs::read_to_string(&def_path) {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => {
                warn!(error = %e, path = %def_path.display(), "could not read workflow definition");
                continue;
            }
        };
        match WorkflowDef::parse(&yaml) {
            Ok(def) => workflows.register(def),
            Err(e) => warn!(error = %e, path = %def_path.display(), "skipping invalid workflow definition"),
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
