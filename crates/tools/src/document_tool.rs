//! `prizm_document {list,read,create,update,delete}` (§4.6, §4.11, §4.13).
//!
//! Thin dispatch over [`prizm_services::document_service`]; the service
//! layer already owns locking, checkpointing, versioning, and auditing, so
//! this module's job is args parsing and rendering the result as
//! human-readable text.

use prizm_services::document_service::{self, CreateDocumentArgs, UpdateDocumentArgs};

use crate::context::{args, ToolCtx, ToolResult};

pub fn dispatch(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let action = match args::action(raw_args) {
        Ok(a) => a,
        Err(e) => return e.into(),
    };
    match action {
        "list" => list(ctx),
        "read" => read(ctx, raw_args),
        "create" => create(ctx, raw_args),
        "update" => update(ctx, raw_args),
        "delete" => delete(ctx, raw_args),
        other => ToolResult::err(format!("[INVALID_INPUT] unknown prizm_document action: {other}")),
    }
}

fn list(ctx: &ToolCtx<'_>) -> ToolResult {
    match document_service::list(&ctx.env) {
        Ok(docs) => {
            let summary: Vec<_> = docs.iter().map(|d| format!("{} ({})", d.title, d.id.as_str())).collect();
            ToolResult::ok_with_data(
                format!("{} document(s)", docs.len()),
                serde_json::to_string(&summary).unwrap_or_default(),
            )
        }
        Err(e) => e.into(),
    }
}

fn read(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let id = match args::req_str(raw_args, "id") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    match document_service::get(&ctx.env, id) {
        Ok(doc) => ToolResult::ok(doc.body),
        Err(e) => e.into(),
    }
}

fn create(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let title = match args::req_str(raw_args, "title") {
        Ok(t) => t,
        Err(e) => return e.into(),
    };
    let body = args::opt_str(raw_args, "body").unwrap_or("").to_string();
    let tags = args::opt_str_vec(raw_args, "tags");

    match document_service::create(
        &ctx.env,
        &ctx.session_id,
        CreateDocumentArgs {
            title: title.to_string(),
            body,
            tags,
        },
    ) {
        Ok(doc) => ToolResult::ok_with_data(format!("created document {} ({})", doc.title, doc.id.as_str()), doc.id.as_str().to_string()),
        Err(e) => e.into(),
    }
}

fn update(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let id = match args::req_str(raw_args, "id") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    let update_args = UpdateDocumentArgs {
        title: args::opt_str(raw_args, "title").map(str::to_string),
        body: args::opt_str(raw_args, "body").map(str::to_string),
        tags: raw_args.get("tags").map(|_| args::opt_str_vec(raw_args, "tags")),
        changed_by: Some(ctx.session_id.clone()),
        change_reason: args::opt_str(raw_args, "changeReason").map(str::to_string),
    };
    match document_service::update(&ctx.env, &ctx.session_id, id, update_args) {
        Ok(doc) => ToolResult::ok(format!("updated document {} ({})", doc.title, doc.id.as_str())),
        Err(e) => e.into(),
    }
}

fn delete(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let id = match args::req_str(raw_args, "id") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    match document_service::delete(&ctx.env, &ctx.session_id, id) {
        Ok(()) => ToolResult::ok(format!("deleted document {id}")),
        Err(e) => e.into(),
    }
}

#[cfg(test)]
#[path = "document_tool_tests.rs"]
mod tests;
