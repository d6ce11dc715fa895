//! `prizm_file {list,read,write,move,delete,grep,glob}` (§4.4, §4.13).
//!
//! Every action resolves its path through [`prizm_workspace::resolve`] and
//! delegates to `prizm_store::fs_store`'s generic, sandboxed I/O — never the
//! system-path-aware variants the typed entity stores use. `write` and
//! `delete` against the main workspace take a transient
//! [`ResourceType::File`] lock for the duration of the call so a concurrent
//! writer to the same path is denied rather than racing.

use prizm_core::{CoreError, ResourceRef, ResourceType};
use prizm_store::fs_store;
use regex::Regex;

use crate::context::{args, workspace_suffix, ToolCtx, ToolResult};

fn out_of_bounds() -> ToolResult {
    ToolResult::from(CoreError::OutOfBounds("path is not contained in any allowed workspace root".to_string()))
}

fn resolve(ctx: &ToolCtx<'_>, raw_path: &str, workspace: Option<&str>) -> Result<prizm_workspace::ResolvedPath, ToolResult> {
    let ws = workspace.and_then(prizm_workspace::WorkspaceArg::parse);
    prizm_workspace::resolve(ctx.workspace, raw_path, ws).ok_or_else(out_of_bounds)
}

pub fn dispatch(ctx: &ToolCtx<'_>, args: &serde_json::Value) -> ToolResult {
    let action = match self::args::action(args) {
        Ok(a) => a,
        Err(e) => return e.into(),
    };
    match action {
        "list" => list(ctx, args),
        "read" => read(ctx, args),
        "write" => write(ctx, args),
        "move" => move_file(ctx, args),
        "delete" => delete(ctx, args),
        "grep" => grep(ctx, args),
        "glob" => glob_action(ctx, args),
        other => ToolResult::err(format!("[INVALID_INPUT] unknown prizm_file action: {other}")),
    }
}

fn list(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let path = args::opt_str(raw_args, "path").unwrap_or("");
    let workspace = args::opt_str(raw_args, "workspace");
    let recursive = args::opt_bool(raw_args, "recursive").unwrap_or(false);

    let resolved = match resolve(ctx, path, workspace) {
        Ok(r) => r,
        Err(e) => return e,
    };
    match fs_store::list_directory(&resolved.file_root, &resolved.relative_path, false, recursive) {
        Ok(entries) => {
            let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
            ToolResult::ok_with_data(
                format!("{} entries{}", entries.len(), workspace_suffix(resolved.ws_type)),
                serde_json::to_string(&names).unwrap_or_default(),
            )
        }
        Err(e) => ToolResult::from(prizm_services::map_fs_error(e)),
    }
}

fn read(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let path = match args::req_str(raw_args, "path") {
        Ok(p) => p,
        Err(e) => return e.into(),
    };
    let workspace = args::opt_str(raw_args, "workspace");
    let resolved = match resolve(ctx, path, workspace) {
        Ok(r) => r,
        Err(e) => return e,
    };
    match fs_store::read_file_by_path(&resolved.file_root, &resolved.relative_path) {
        Ok(Some(record)) => match record.content {
            Some(content) => ToolResult::ok(format!("{content}{}", workspace_suffix(resolved.ws_type))),
            None => ToolResult::err(format!("[INVALID_INPUT] {path} looks binary and cannot be read as text")),
        },
        Ok(None) => ToolResult::from(CoreError::NotFound(path.to_string())),
        Err(e) => ToolResult::from(prizm_services::map_fs_error(e)),
    }
}

fn acquire_file_lock(ctx: &ToolCtx<'_>, relative_path: &str) -> Result<ResourceRef, ToolResult> {
    let resource = ResourceRef::new(ResourceType::File, relative_path);
    let outcome = ctx.locks().acquire(ctx.env.scope.id(), &resource, &ctx.session_id, Some("file.write".to_string()));
    if !outcome.success {
        let holder = outcome.holder.map(|h| h.session_id).unwrap_or_default();
        return Err(ToolResult::from(CoreError::Locked {
            resource_type: resource.resource_type,
            holder,
        }));
    }
    Ok(resource)
}

fn write(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let path = match args::req_str(raw_args, "path") {
        Ok(p) => p,
        Err(e) => return e.into(),
    };
    let content = match args::req_str(raw_args, "content") {
        Ok(c) => c,
        Err(e) => return e.into(),
    };
    let workspace = args::opt_str(raw_args, "workspace");
    let resolved = match resolve(ctx, path, workspace) {
        Ok(r) => r,
        Err(e) => return e,
    };

    let held = if resolved.ws_type == prizm_core::WorkspaceKind::Main {
        match acquire_file_lock(ctx, &resolved.relative_path) {
            Ok(resource) => Some(resource),
            Err(e) => return e,
        }
    } else {
        None
    };

    let result = fs_store::write_file_by_path(&resolved.file_root, &resolved.relative_path, content);
    if let Some(resource) = &held {
        ctx.locks().release(ctx.env.scope.id(), resource, &ctx.session_id);
    }

    match result {
        Ok(()) => ToolResult::ok(format!("wrote {path}{}", workspace_suffix(resolved.ws_type))),
        Err(e) => ToolResult::from(prizm_services::map_fs_error(e)),
    }
}

fn move_file(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let from = match args::req_str(raw_args, "from") {
        Ok(p) => p,
        Err(e) => return e.into(),
    };
    let to = match args::req_str(raw_args, "to") {
        Ok(p) => p,
        Err(e) => return e.into(),
    };
    let workspace = args::opt_str(raw_args, "workspace");
    let from_resolved = match resolve(ctx, from, workspace) {
        Ok(r) => r,
        Err(e) => return e,
    };
    let to_resolved = match resolve(ctx, to, workspace) {
        Ok(r) => r,
        Err(e) => return e,
    };
    if from_resolved.file_root != to_resolved.file_root {
        return ToolResult::err("[INVALID_INPUT] move cannot cross workspace roots".to_string());
    }

    match fs_store::move_file(&from_resolved.file_root, &from_resolved.relative_path, &to_resolved.relative_path) {
        Ok(()) => ToolResult::ok(format!("moved {from} -> {to}{}", workspace_suffix(from_resolved.ws_type))),
        Err(e) => ToolResult::from(prizm_services::map_fs_error(e)),
    }
}

fn delete(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let path = match args::req_str(raw_args, "path") {
        Ok(p) => p,
        Err(e) => return e.into(),
    };
    let workspace = args::opt_str(raw_args, "workspace");
    let resolved = match resolve(ctx, path, workspace) {
        Ok(r) => r,
        Err(e) => return e,
    };

    let held = if resolved.ws_type == prizm_core::WorkspaceKind::Main {
        match acquire_file_lock(ctx, &resolved.relative_path) {
            Ok(resource) => Some(resource),
            Err(e) => return e,
        }
    } else {
        None
    };

    let result = fs_store::delete_by_path(&resolved.file_root, &resolved.relative_path);
    if let Some(resource) = &held {
        ctx.locks().release(ctx.env.scope.id(), resource, &ctx.session_id);
    }

    match result {
        Ok(()) => ToolResult::ok(format!("deleted {path}{}", workspace_suffix(resolved.ws_type))),
        Err(e) => ToolResult::from(prizm_services::map_fs_error(e)),
    }
}

fn flatten(entries: Vec<fs_store::DirEntry>, out: &mut Vec<fs_store::DirEntry>) {
    for mut entry in entries {
        if let Some(children) = entry.children.take() {
            flatten(children, out);
        }
        out.push(entry);
    }
}

fn grep(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let pattern = match args::req_str(raw_args, "pattern") {
        Ok(p) => p,
        Err(e) => return e.into(),
    };
    let path = args::opt_str(raw_args, "path").unwrap_or("");
    let workspace = args::opt_str(raw_args, "workspace");
    let case_insensitive = args::opt_bool(raw_args, "caseInsensitive").unwrap_or(false);

    let resolved = match resolve(ctx, path, workspace) {
        Ok(r) => r,
        Err(e) => return e,
    };
    let regex = match Regex::new(&format!("(?{}){}", if case_insensitive { "i" } else { "-i" }, pattern)) {
        Ok(r) => r,
        Err(e) => return ToolResult::err(format!("[INVALID_INPUT] invalid grep pattern: {e}")),
    };

    let entries = match fs_store::list_directory(&resolved.file_root, &resolved.relative_path, false, true) {
        Ok(entries) => entries,
        Err(e) => return ToolResult::from(prizm_services::map_fs_error(e)),
    };
    let mut flat = Vec::new();
    flatten(entries, &mut flat);

    let mut matches = Vec::new();
    for entry in flat.into_iter().filter(|e| e.is_file) {
        let Ok(Some(record)) = fs_store::read_file_by_path(&resolved.file_root, &entry.relative_path) else {
            continue;
        };
        let Some(content) = record.content else { continue };
        for (line_no, line) in content.lines().enumerate() {
            if regex.is_match(line) {
                matches.push(format!("{}:{}:{}", entry.relative_path, line_no + 1, line));
            }
        }
    }

    ToolResult::ok_with_data(
        format!("{} match(es){}", matches.len(), workspace_suffix(resolved.ws_type)),
        serde_json::to_string(&matches).unwrap_or_default(),
    )
}

fn glob_action(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let pattern = match args::req_str(raw_args, "pattern") {
        Ok(p) => p,
        Err(e) => return e.into(),
    };
    let workspace = args::opt_str(raw_args, "workspace");
    let resolved = match resolve(ctx, "", workspace) {
        Ok(r) => r,
        Err(e) => return e,
    };
    let matcher = match glob::Pattern::new(pattern) {
        Ok(p) => p,
        Err(e) => return ToolResult::err(format!("[INVALID_INPUT] invalid glob pattern: {e}")),
    };

    let entries = match fs_store::list_directory(&resolved.file_root, "", false, true) {
        Ok(entries) => entries,
        Err(e) => return ToolResult::from(prizm_services::map_fs_error(e)),
    };
    let mut flat = Vec::new();
    flatten(entries, &mut flat);

    let matched: Vec<String> = flat
        .into_iter()
        .filter(|e| e.is_file)
        .map(|e| e.relative_path)
        .filter(|p| matcher.matches(p))
        .collect();

    ToolResult::ok_with_data(
        format!("{} match(es){}", matched.len(), workspace_suffix(resolved.ws_type)),
        serde_json::to_string(&matched).unwrap_or_default(),
    )
}

#[cfg(test)]
#[path = "file_tool_tests.rs"]
mod tests;
