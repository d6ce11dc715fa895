//! `prizm_promote_file` (§0.1 supplemented features, §8 scenario 3).
//!
//! Moves a file out of a session/run/workflow workspace and into the main
//! workspace, the operation the client-side `fileId` promotion flow in the
//! scenario needs. Not one of §4.13's named compound tools, but implied by
//! the existence of non-main workspaces: without it, anything an agent
//! creates in its sandbox would be stuck there.

use prizm_core::{CoreError, ResourceRef, ResourceType};
use prizm_store::fs_store;
use prizm_workspace::WorkspaceArg;

use crate::context::{args, workspace_suffix, ToolCtx, ToolResult};

fn out_of_bounds() -> ToolResult {
    ToolResult::from(CoreError::OutOfBounds("path is not contained in any allowed workspace root".to_string()))
}

pub fn dispatch(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let path = match args::req_str(raw_args, "path") {
        Ok(p) => p,
        Err(e) => return e.into(),
    };
    let from = args::opt_str(raw_args, "from").unwrap_or("session");
    let Some(from_ws) = WorkspaceArg::parse(from) else {
        return ToolResult::err(format!("[INVALID_INPUT] unknown workspace: {from}"));
    };
    if matches!(from_ws, WorkspaceArg::Main) {
        return ToolResult::err("[INVALID_INPUT] a file already in the main workspace cannot be promoted".to_string());
    }

    let source = match prizm_workspace::resolve(ctx.workspace, path, Some(from_ws)) {
        Some(r) => r,
        None => return out_of_bounds(),
    };
    let destination_path = args::opt_str(raw_args, "to").unwrap_or(&source.relative_path);
    let destination = match prizm_workspace::resolve(ctx.workspace, destination_path, Some(WorkspaceArg::Main)) {
        Some(r) => r,
        None => return out_of_bounds(),
    };

    let content = match fs_store::read_file_by_path(&source.file_root, &source.relative_path) {
        Ok(Some(record)) => match record.content {
            Some(content) => content,
            None => return ToolResult::err(format!("[INVALID_INPUT] {path} looks binary and cannot be promoted")),
        },
        Ok(None) => return ToolResult::from(CoreError::NotFound(path.to_string())),
        Err(e) => return ToolResult::from(prizm_services::map_fs_error(e)),
    };

    let resource = ResourceRef::new(ResourceType::File, destination.relative_path.clone());
    let lock_outcome = ctx
        .locks()
        .acquire(ctx.env.scope.id(), &resource, &ctx.session_id, Some("file.promote".to_string()));
    if !lock_outcome.success {
        let holder = lock_outcome.holder.map(|h| h.session_id).unwrap_or_default();
        return ToolResult::from(CoreError::Locked {
            resource_type: resource.resource_type,
            holder,
        });
    }

    let write_result = fs_store::write_file_by_path(&destination.file_root, &destination.relative_path, &content);
    ctx.locks().release(ctx.env.scope.id(), &resource, &ctx.session_id);
    if let Err(e) = write_result {
        return ToolResult::from(prizm_services::map_fs_error(e));
    }

    if let Err(e) = fs_store::delete_by_path(&source.file_root, &source.relative_path) {
        return ToolResult::from(prizm_services::map_fs_error(e));
    }

    ToolResult::ok_with_data(
        format!(
            "promoted {path}{} to {}",
            workspace_suffix(source.ws_type),
            destination.relative_path
        ),
        destination.relative_path,
    )
}

#[cfg(test)]
#[path = "promote_tool_tests.rs"]
mod tests;
