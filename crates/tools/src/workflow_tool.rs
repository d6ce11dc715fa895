//! `prizm_workflow {run,resume,cancel,status,list,register,get_def,list_defs}`
//! (§4.16, §4.13).
//!
//! One `action`-dispatched tool wrapping [`prizm_workflow::WorkflowEngine`],
//! the same shape every other compound tool in this crate uses. Building the
//! engine's [`prizm_workflow::WorkflowEnv`] from a [`ToolCtx`] is this
//! module's only real job; the engine itself owns every invariant.

use std::collections::HashMap;

use prizm_store::{fs_store, path_provider};
use prizm_workflow::{WorkflowDef, WorkflowEnv, WorkflowError};

use crate::context::{args, ToolCtx, ToolResult};

fn env_from<'a>(ctx: &ToolCtx<'a>) -> WorkflowEnv<'a> {
    WorkflowEnv {
        scope_root: ctx.env.scope.scope_root(),
        scope_id: ctx.env.scope.id(),
        events: ctx.env.events,
        locks: ctx.locks(),
        terminals: ctx.terminals,
        clock: ctx.env.clock,
        id_gen: ctx.env.id_gen,
    }
}

fn map_workflow_error(e: WorkflowError) -> ToolResult {
    match e {
        WorkflowError::UnknownWorkflow(_) | WorkflowError::RunNotFound(_) => {
            ToolResult::err(format!("[NOT_FOUND] {e}"))
        }
        WorkflowError::MissingArg(_) | WorkflowError::Def(_) => ToolResult::err(format!("[INVALID_INPUT] {e}")),
        WorkflowError::NotAwaitingApproval(_) | WorkflowError::TokenMismatch => ToolResult::err(format!("[CONFLICT] {e}")),
        WorkflowError::Store(_) | WorkflowError::Io(_) => ToolResult::err(format!("[IO_ERROR] {e}")),
    }
}

fn str_args(raw_args: &serde_json::Value, key: &str) -> HashMap<String, String> {
    raw_args
        .get(key)
        .and_then(serde_json::Value::as_object)
        .map(|obj| {
            obj.iter()
                .map(|(k, v)| (k.clone(), v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

pub async fn dispatch(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let action = match args::action(raw_args) {
        Ok(a) => a,
        Err(e) => return e.into(),
    };
    match action {
        "run" => run(ctx, raw_args).await,
        "resume" => resume(ctx, raw_args).await,
        "cancel" => cancel(ctx, raw_args).await,
        "status" => status(ctx, raw_args),
        "list" => list(ctx, raw_args),
        "register" => register(ctx, raw_args),
        "get_def" => get_def(ctx, raw_args),
        "list_defs" => list_defs(ctx),
        other => ToolResult::err(format!("[INVALID_INPUT] unknown prizm_workflow action: {other}")),
    }
}

async fn run(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let workflow_name = match args::req_str(raw_args, "workflowName") {
        Ok(n) => n,
        Err(e) => return e.into(),
    };
    let run_args = str_args(raw_args, "args");
    let env = env_from(ctx);
    match ctx.workflows.run(&env, workflow_name, run_args).await {
        Ok(state) => ToolResult::ok_with_data(
            format!("run {} started: {:?}", state.run_id, state.status),
            state.run_id.as_str().to_string(),
        ),
        Err(e) => map_workflow_error(e),
    }
}

async fn resume(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let workflow_name = match args::req_str(raw_args, "workflowName") {
        Ok(n) => n,
        Err(e) => return e.into(),
    };
    let run_id = match args::req_str(raw_args, "runId") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    let token = match args::req_str(raw_args, "token") {
        Ok(t) => t,
        Err(e) => return e.into(),
    };
    let approved = args::opt_bool(raw_args, "approved").unwrap_or(true);
    let env = env_from(ctx);
    match ctx.workflows.resume(&env, workflow_name, run_id, token, approved).await {
        Ok(state) => ToolResult::ok(format!("run {} is now {:?}", state.run_id, state.status)),
        Err(e) => map_workflow_error(e),
    }
}

async fn cancel(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let workflow_name = match args::req_str(raw_args, "workflowName") {
        Ok(n) => n,
        Err(e) => return e.into(),
    };
    let run_id = match args::req_str(raw_args, "runId") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    let env = env_from(ctx);
    match ctx.workflows.cancel(&env, workflow_name, run_id).await {
        Ok(state) => ToolResult::ok(format!("run {} is now {:?}", state.run_id, state.status)),
        Err(e) => map_workflow_error(e),
    }
}

fn status(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let workflow_name = match args::req_str(raw_args, "workflowName") {
        Ok(n) => n,
        Err(e) => return e.into(),
    };
    let run_id = match args::req_str(raw_args, "runId") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    match ctx.workflows.status(ctx.env.scope.scope_root(), workflow_name, run_id) {
        Ok(state) => ToolResult::ok_with_data(format!("run {} is {:?} at step {}", state.run_id, state.status, state.current_step_name), format!("{:?}", state.status)),
        Err(e) => map_workflow_error(e),
    }
}

fn list(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let workflow_name = match args::req_str(raw_args, "workflowName") {
        Ok(n) => n,
        Err(e) => return e.into(),
    };
    match ctx.workflows.list_runs(ctx.env.scope.scope_root(), workflow_name) {
        Ok(runs) => {
            let ids: Vec<String> = runs.iter().map(|r| r.run_id.as_str().to_string()).collect();
            ToolResult::ok_with_data(format!("{} run(s)", ids.len()), serde_json::to_string(&ids).unwrap_or_default())
        }
        Err(e) => map_workflow_error(e),
    }
}

fn register(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let yaml = match args::req_str(raw_args, "definition") {
        Ok(y) => y,
        Err(e) => return e.into(),
    };
    match WorkflowDef::parse(yaml) {
        Ok(def) => {
            let name = def.name.clone();
            let rel_path = path_provider::workflow_def_relative_path(&name);
            if let Err(e) = fs_store::write_system_file(ctx.env.scope.scope_root(), &rel_path, yaml) {
                return ToolResult::err(format!("[IO_ERROR] {e}"));
            }
            ctx.workflows.register(def);
            ToolResult::ok_with_data(format!("registered workflow {name}"), name)
        }
        Err(e) => ToolResult::err(format!("[INVALID_INPUT] {e}")),
    }
}

fn get_def(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let workflow_name = match args::req_str(raw_args, "workflowName") {
        Ok(n) => n,
        Err(e) => return e.into(),
    };
    match ctx.workflows.get_def(workflow_name) {
        Some(def) => ToolResult::ok(serde_json::to_string_pretty(&def).unwrap_or_default()),
        None => ToolResult::err(format!("[NOT_FOUND] workflow {workflow_name} is not registered")),
    }
}

fn list_defs(ctx: &ToolCtx<'_>) -> ToolResult {
    let defs = ctx.workflows.list_defs();
    let names: Vec<String> = defs.iter().map(|d| d.name.clone()).collect();
    ToolResult::ok_with_data(format!("{} workflow(s) registered", names.len()), serde_json::to_string(&names).unwrap_or_default())
}

#[cfg(test)]
#[path = "workflow_tool_tests.rs"]
mod tests;
