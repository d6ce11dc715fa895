//! `prizm_knowledge {resolve}` (§4.13, §9).
//!
//! Resolves a `{kind, id}` back-reference tuple to a human-readable
//! summary. Per §9's design note, cross-entity references are plain
//! `{kind, id}` tuples stored in frontmatter with no graph-owning
//! structure; resolution is always a lookup by id against the owning
//! service, falling back to a `not-found` result rather than a dangling
//! reference.

use prizm_core::CoreError;
use prizm_services::{document_service, schedule_service, todo_service};

use crate::context::{args, ToolCtx, ToolResult};

pub fn dispatch(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let action = match args::action(raw_args) {
        Ok(a) => a,
        Err(e) => return e.into(),
    };
    match action {
        "resolve" => resolve(ctx, raw_args),
        other => ToolResult::err(format!("[INVALID_INPUT] unknown prizm_knowledge action: {other}")),
    }
}

fn resolve(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let kind = match args::req_str(raw_args, "kind") {
        Ok(k) => k,
        Err(e) => return e.into(),
    };
    let id = match args::req_str(raw_args, "id") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };

    match kind {
        "document" => match document_service::get(&ctx.env, id) {
            Ok(doc) => ToolResult::ok_with_data(format!("document {} ({})", doc.title, doc.id.as_str()), doc.id.as_str().to_string()),
            Err(_) => not_found(kind, id),
        },
        "todo_list" => match todo_service::get(&ctx.env, id) {
            Ok(list) => ToolResult::ok_with_data(
                format!("todo list {} ({} item(s))", list.title, list.items.len()),
                list.id.as_str().to_string(),
            ),
            Err(_) => not_found(kind, id),
        },
        "todo_item" => match todo_service::list(&ctx.env) {
            Ok(lists) => match lists.iter().find_map(|l| l.items.iter().find(|i| i.id.as_str() == id)) {
                Some(item) => ToolResult::ok(format!("todo item {} [{:?}]", item.title, item.status)),
                None => not_found(kind, id),
            },
            Err(e) => e.into(),
        },
        "schedule" => match schedule_service::get(&ctx.env, id) {
            Ok(item) => ToolResult::ok_with_data(format!("schedule item {} at {}", item.title, item.start_time), item.id.as_str().to_string()),
            Err(_) => not_found(kind, id),
        },
        other => ToolResult::err(format!("[INVALID_INPUT] unknown reference kind: {other}")),
    }
}

fn not_found(kind: &str, id: &str) -> ToolResult {
    ToolResult::from(CoreError::NotFound(format!("{kind} {id}")))
}

#[cfg(test)]
#[path = "knowledge_tool_tests.rs"]
mod tests;
