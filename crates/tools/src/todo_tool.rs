//! `prizm_todo {list,create_list,delete_list,add_items,update_item,delete_item}`
//! (§4.11, §4.13).

use prizm_core::TodoStatus;
use prizm_services::todo_service;

use crate::context::{args, ToolCtx, ToolResult};

fn parse_status(s: &str) -> Result<TodoStatus, ToolResult> {
    match s {
        "todo" => Ok(TodoStatus::Todo),
        "doing" => Ok(TodoStatus::Doing),
        "done" => Ok(TodoStatus::Done),
        other => Err(ToolResult::err(format!("[INVALID_INPUT] unknown todo status: {other}"))),
    }
}

pub fn dispatch(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let action = match args::action(raw_args) {
        Ok(a) => a,
        Err(e) => return e.into(),
    };
    match action {
        "list" => list(ctx),
        "create_list" => create_list(ctx, raw_args),
        "delete_list" => delete_list(ctx, raw_args),
        "add_items" => add_items(ctx, raw_args),
        "update_item" => update_item(ctx, raw_args),
        "delete_item" => delete_item(ctx, raw_args),
        other => ToolResult::err(format!("[INVALID_INPUT] unknown prizm_todo action: {other}")),
    }
}

fn list(ctx: &ToolCtx<'_>) -> ToolResult {
    match todo_service::list(&ctx.env) {
        Ok(lists) => {
            let summary: Vec<_> = lists
                .iter()
                .map(|l| format!("{} ({}) - {} item(s)", l.title, l.id.as_str(), l.items.len()))
                .collect();
            ToolResult::ok_with_data(format!("{} list(s)", lists.len()), serde_json::to_string(&summary).unwrap_or_default())
        }
        Err(e) => e.into(),
    }
}

fn create_list(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let title = match args::req_str(raw_args, "title") {
        Ok(t) => t,
        Err(e) => return e.into(),
    };
    match todo_service::create_list(&ctx.env, &ctx.session_id, title) {
        Ok(list) => ToolResult::ok_with_data(format!("created list {} ({})", list.title, list.id.as_str()), list.id.as_str().to_string()),
        Err(e) => e.into(),
    }
}

fn delete_list(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let id = match args::req_str(raw_args, "listId") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    match todo_service::delete_list(&ctx.env, &ctx.session_id, id) {
        Ok(()) => ToolResult::ok(format!("deleted list {id}")),
        Err(e) => e.into(),
    }
}

fn add_items(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let list_id = match args::req_str(raw_args, "listId") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    let titles = args::opt_str_vec(raw_args, "titles");
    match todo_service::add_items(&ctx.env, &ctx.session_id, list_id, &titles) {
        Ok(list) => ToolResult::ok(format!("{} now has {} item(s)", list.title, list.items.len())),
        Err(e) => e.into(),
    }
}

fn update_item(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let list_id = match args::req_str(raw_args, "listId") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    let item_id = match args::req_str(raw_args, "itemId") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    let status = match args::opt_str(raw_args, "status") {
        Some(s) => match parse_status(s) {
            Ok(s) => Some(s),
            Err(e) => return e,
        },
        None => None,
    };
    let title = args::opt_str(raw_args, "title").map(str::to_string);
    let description = args::opt_str(raw_args, "description").map(str::to_string);

    match todo_service::update_item(&ctx.env, &ctx.session_id, list_id, item_id, status, title, description) {
        Ok(list) => ToolResult::ok(format!("updated item {item_id} in {}", list.title)),
        Err(e) => e.into(),
    }
}

fn delete_item(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let list_id = match args::req_str(raw_args, "listId") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    let item_id = match args::req_str(raw_args, "itemId") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    match todo_service::delete_item(&ctx.env, &ctx.session_id, list_id, item_id) {
        Ok(list) => ToolResult::ok(format!("removed item {item_id} from {}", list.title)),
        Err(e) => e.into(),
    }
}

#[cfg(test)]
#[path = "todo_tool_tests.rs"]
mod tests;
