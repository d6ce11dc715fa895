//! `prizm_terminal_{exec,start,write,read,send_keys,close}` (§4.14, §4.13).
//!
//! One compound tool name per terminal operation rather than an `action`
//! enum under one name, matching §4.13's own listing. `exec` and `start`
//! resolve their `path` argument the same way [`crate::file_tool`] resolves
//! paths, then hand the real directory to [`prizm_terminal`]; the rest
//! address an already-open terminal purely by id.

use std::time::Duration;

use prizm_core::CoreError;
use prizm_terminal::{ExecOutcome, SendKeysOutcome, TerminalError};

use crate::context::{args, workspace_suffix, ToolCtx, ToolResult};

fn out_of_bounds() -> ToolResult {
    ToolResult::from(CoreError::OutOfBounds("path is not contained in any allowed workspace root".to_string()))
}

fn map_terminal_error(e: TerminalError) -> ToolResult {
    match e {
        TerminalError::NotFound(id) => ToolResult::from(CoreError::NotFound(format!("terminal {id}"))),
        TerminalError::Tmux(msg) => ToolResult::err(format!("[IO_ERROR] tmux command failed: {msg}")),
        TerminalError::MissingCwd(path) => ToolResult::err(format!("[INVALID_INPUT] working directory does not exist: {}", path.display())),
    }
}

fn resolve_cwd(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> Result<prizm_workspace::ResolvedPath, ToolResult> {
    let path = args::opt_str(raw_args, "path").unwrap_or("");
    let ws = args::opt_str(raw_args, "workspace").and_then(prizm_workspace::WorkspaceArg::parse);
    prizm_workspace::resolve(ctx.workspace, path, ws).ok_or_else(out_of_bounds)
}

pub async fn dispatch(ctx: &ToolCtx<'_>, tool_name: &str, raw_args: &serde_json::Value) -> ToolResult {
    match tool_name {
        "prizm_terminal_exec" => exec(ctx, raw_args).await,
        "prizm_terminal_start" => start(ctx, raw_args).await,
        "prizm_terminal_write" => write(ctx, raw_args).await,
        "prizm_terminal_read" => read(ctx, raw_args).await,
        "prizm_terminal_send_keys" => send_keys(ctx, raw_args).await,
        "prizm_terminal_close" => close(ctx, raw_args).await,
        other => ToolResult::err(format!("[INVALID_INPUT] unknown terminal tool: {other}")),
    }
}

async fn exec(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let command = match args::req_str(raw_args, "command") {
        Ok(c) => c,
        Err(e) => return e.into(),
    };
    let resolved = match resolve_cwd(ctx, raw_args) {
        Ok(r) => r,
        Err(e) => return e,
    };
    let cwd = resolved.file_root.join(&resolved.relative_path);
    let timeout_ms = args::opt_u64(raw_args, "timeoutMs").unwrap_or(prizm_terminal::DEFAULT_EXEC_TIMEOUT.as_millis() as u64);

    match prizm_terminal::exec(&cwd, command, Duration::from_millis(timeout_ms)).await {
        Ok(ExecOutcome { output, exit_code, timed_out }) => {
            if timed_out {
                return ToolResult::err(format!("[TIMEOUT] command did not finish within {timeout_ms}ms"));
            }
            ToolResult::ok_with_data(
                format!("{output}{}", workspace_suffix(resolved.ws_type)),
                exit_code.map(|c| c.to_string()).unwrap_or_default(),
            )
        }
        Err(e) => ToolResult::err(format!("[IO_ERROR] {e}")),
    }
}

async fn start(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let resolved = match resolve_cwd(ctx, raw_args) {
        Ok(r) => r,
        Err(e) => return e,
    };
    let cwd = resolved.file_root.join(&resolved.relative_path);
    let shell = args::opt_str(raw_args, "shell");

    match ctx.terminals.spawn_interactive(&ctx.session_id, &cwd, shell).await {
        Ok(id) => ToolResult::ok_with_data(format!("started terminal {id}{}", workspace_suffix(resolved.ws_type)), id),
        Err(e) => map_terminal_error(e),
    }
}

async fn write(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let terminal_id = match args::req_str(raw_args, "terminalId") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    let data = match args::req_str(raw_args, "data") {
        Ok(d) => d,
        Err(e) => return e.into(),
    };
    match ctx.terminals.write_to_terminal(terminal_id, data.as_bytes()).await {
        Ok(()) => ToolResult::ok(format!("wrote {} byte(s) to terminal {terminal_id}", data.len())),
        Err(e) => map_terminal_error(e),
    }
}

async fn read(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let terminal_id = match args::req_str(raw_args, "terminalId") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    match ctx.terminals.get_recent_output(terminal_id).await {
        Ok(output) => ToolResult::ok(output),
        Err(e) => map_terminal_error(e),
    }
}

async fn send_keys(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let terminal_id = match args::req_str(raw_args, "terminalId") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    let keys = args::opt_str(raw_args, "keys").unwrap_or("");
    let press_enter = args::opt_bool(raw_args, "pressEnter").unwrap_or(true);
    let wait_ms = args::opt_u64(raw_args, "waitMs").unwrap_or(200);

    match ctx.terminals.send_keys(terminal_id, keys, press_enter, wait_ms).await {
        Ok(SendKeysOutcome { output }) => ToolResult::ok(output),
        Err(e) => map_terminal_error(e),
    }
}

async fn close(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let terminal_id = match args::req_str(raw_args, "terminalId") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    match ctx.terminals.close_terminal(terminal_id).await {
        Ok(()) => ToolResult::ok(format!("closed terminal {terminal_id}")),
        Err(e) => map_terminal_error(e),
    }
}

#[cfg(test)]
#[path = "terminal_tool_tests.rs"]
mod tests;
