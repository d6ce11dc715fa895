//! Shared dispatch context and result type for every builtin tool (§4.13).

use prizm_core::CoreError;
use prizm_runtime::LockManager;
use prizm_services::ServiceEnv;
use prizm_terminal::TerminalManager;
use prizm_workflow::WorkflowEngine;
use prizm_workspace::WorkspaceContext;
use std::sync::Arc;

use crate::task_registry::SpawnTaskRegistry;

/// Everything an executor needs to service one tool call: the service
/// layer's dependency bundle, the calling session's workspace view, and the
/// cross-cutting managers (locks live on the scope already; terminals,
/// workflows, and spawned-task bookkeeping are process-wide so they're
/// threaded in separately).
pub struct ToolCtx<'a> {
    pub env: ServiceEnv<'a>,
    pub workspace: &'a WorkspaceContext,
    pub session_id: String,
    pub terminals: &'a TerminalManager,
    pub workflows: &'a WorkflowEngine,
    pub tasks: &'a SpawnTaskRegistry,
}

impl<'a> ToolCtx<'a> {
    pub fn locks(&self) -> &Arc<LockManager> {
        self.env.scope.locks()
    }
}

/// A tool executor's return value (§4.13: "Executors return `{text,
/// isError?}`"); `structured_data` is the optional machine-readable
/// companion §0.1 adds for callers that want to bind a later workflow step
/// to something more precise than prose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub text: String,
    pub is_error: bool,
    pub structured_data: Option<String>,
}

impl ToolResult {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
            structured_data: None,
        }
    }

    pub fn ok_with_data(text: impl Into<String>, structured_data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
            structured_data: Some(structured_data.into()),
        }
    }

    pub fn err(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
            structured_data: None,
        }
    }
}

impl From<CoreError> for ToolResult {
    fn from(err: CoreError) -> Self {
        ToolResult::err(err.as_tool_text())
    }
}

/// Suffix appended to a tool result's text when it targeted a non-main
/// workspace (§4.13 point 4: "a `(workspace label)` suffix on non-main
/// workspaces").
pub fn workspace_suffix(ws_type: prizm_core::WorkspaceKind) -> String {
    match ws_type {
        prizm_core::WorkspaceKind::Main => String::new(),
        other => format!(" ({other} workspace)"),
    }
}

pub mod args {
    use prizm_core::{CoreError, CoreResult};
    use serde_json::Value;

    pub fn req_str<'a>(args: &'a Value, key: &str) -> CoreResult<&'a str> {
        args.get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| CoreError::InvalidInput(format!("missing required arg: {key}")))
    }

    pub fn opt_str<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
        args.get(key).and_then(Value::as_str)
    }

    pub fn opt_bool(args: &Value, key: &str) -> Option<bool> {
        args.get(key).and_then(Value::as_bool)
    }

    pub fn opt_i64(args: &Value, key: &str) -> Option<i64> {
        args.get(key).and_then(Value::as_i64)
    }

    pub fn opt_u64(args: &Value, key: &str) -> Option<u64> {
        args.get(key).and_then(Value::as_u64)
    }

    pub fn opt_str_vec(args: &Value, key: &str) -> Vec<String> {
        args.get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
            .unwrap_or_default()
    }

    pub fn action(args: &Value) -> CoreResult<&str> {
        req_str(args, "action")
    }
}
