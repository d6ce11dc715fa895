//! `prizm_spawn_task` / `prizm_task_status` / `prizm_set_result` (§6.2).
//!
//! A spawned task is a fresh [`prizm_core::AgentSession`] with its own
//! session workspace, bookkept by [`crate::task_registry::SpawnTaskRegistry`]
//! for in-process status. Actually driving that session's conversation
//! against an LLM is outside this crate (§1 non-goals); these tools only
//! create the durable record, report on it, and let the spawned session
//! report its own result back. `prizm_set_result` is rejected unless the
//! calling session *is* the task it is trying to resolve — it terminates
//! that session.

use prizm_core::{AgentSession, CoreError, Event, MessageRole, SessionId, SessionMessage};

use crate::context::{args, ToolCtx, ToolResult};
use crate::task_registry::TaskStatus;

pub fn dispatch(ctx: &ToolCtx<'_>, tool_name: &str, raw_args: &serde_json::Value) -> ToolResult {
    match tool_name {
        "prizm_spawn_task" => spawn_task(ctx, raw_args),
        "prizm_task_status" => task_status(ctx, raw_args),
        "prizm_set_result" => set_result(ctx, raw_args),
        other => ToolResult::err(format!("[INVALID_INPUT] unknown task tool: {other}")),
    }
}

fn spawn_task(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let prompt = match args::req_str(raw_args, "prompt") {
        Ok(p) => p,
        Err(e) => return e.into(),
    };
    let now = ctx.env.clock.now_ms();
    let task_id = SessionId::new((ctx.env.id_gen)());

    let mut session = AgentSession::new(task_id.clone(), ctx.env.scope.id(), now);
    session.push_message(SessionMessage::new(format!("{task_id}-msg-1"), MessageRole::User, prompt, now));

    let workspace_dir = prizm_store::path_provider::session_workspace_dir(ctx.env.scope.scope_root(), task_id.as_str());
    if let Err(e) = std::fs::create_dir_all(&workspace_dir) {
        return ToolResult::from(CoreError::Io(e));
    }
    if let Err(e) = prizm_store::session_store::write(ctx.env.scope.scope_root(), &session) {
        return ToolResult::from(prizm_services::map_fs_error(e));
    }

    ctx.tasks.spawn(task_id.as_str());
    ctx.env.events.publish(Event::SessionCreated { id: task_id.clone() });

    ToolResult::ok_with_data(format!("spawned task {task_id}"), task_id.as_str().to_string())
}

fn task_status(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let task_id = match args::req_str(raw_args, "taskId") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    match ctx.tasks.status(task_id) {
        Some(TaskStatus::Running) => ToolResult::ok_with_data(format!("task {task_id} is running"), "running".to_string()),
        Some(TaskStatus::Completed { result }) => ToolResult::ok_with_data(format!("task {task_id} completed: {result}"), result),
        Some(TaskStatus::Failed { error }) => ToolResult::err(format!("task {task_id} failed: {error}")),
        None => ToolResult::from(CoreError::NotFound(format!("task {task_id}"))),
    }
}

fn set_result(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let task_id = match args::req_str(raw_args, "taskId") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    if ctx.session_id != task_id {
        return ToolResult::err("[INVALID_INPUT] prizm_set_result may only be called by the spawned session it resolves".to_string());
    }
    let result = match args::req_str(raw_args, "result") {
        Ok(r) => r,
        Err(e) => return e.into(),
    };

    if !ctx.tasks.set_result(task_id, result.to_string()) {
        return ToolResult::err(format!("[INVALID_INPUT] task {task_id} is not running"));
    }

    let now = ctx.env.clock.now_ms();
    match prizm_store::session_store::read_by_id(ctx.env.scope.scope_root(), task_id) {
        Ok(Some(mut session)) => {
            session.push_message(SessionMessage::new(format!("{task_id}-result"), MessageRole::Assistant, result, now));
            if let Err(e) = prizm_store::session_store::write(ctx.env.scope.scope_root(), &session) {
                return ToolResult::from(prizm_services::map_fs_error(e));
            }
        }
        Ok(None) => return ToolResult::from(CoreError::NotFound(format!("session {task_id}"))),
        Err(e) => return ToolResult::from(prizm_services::map_fs_error(e)),
    }

    ctx.env.events.publish(Event::SessionTerminated { id: SessionId::new(task_id) });
    ToolResult::ok(format!("result recorded, task {task_id} terminated"))
}

#[cfg(test)]
#[path = "spawn_task_tool_tests.rs"]
mod tests;
