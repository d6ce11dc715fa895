//! `prizm_cron {list,create,update,delete}` — recurring schedule items.
//!
//! Not a separate store: a cron entry is a [`prizm_core::ScheduleItem`] with
//! `recurrence` set, so this module is a thin filter/validate wrapper over
//! [`prizm_services::schedule_service`] rather than a second backing store.

use prizm_core::ScheduleItemType;
use prizm_services::schedule_service::{self, CreateScheduleArgs, UpdateScheduleArgs};

use crate::context::{args, ToolCtx, ToolResult};

fn parse_item_type(s: &str) -> Result<ScheduleItemType, ToolResult> {
    match s {
        "event" => Ok(ScheduleItemType::Event),
        "reminder" => Ok(ScheduleItemType::Reminder),
        "deadline" => Ok(ScheduleItemType::Deadline),
        other => Err(ToolResult::err(format!("[INVALID_INPUT] unknown schedule item type: {other}"))),
    }
}

pub fn dispatch(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let action = match args::action(raw_args) {
        Ok(a) => a,
        Err(e) => return e.into(),
    };
    match action {
        "list" => list(ctx),
        "create" => create(ctx, raw_args),
        "update" => update(ctx, raw_args),
        "delete" => delete(ctx, raw_args),
        other => ToolResult::err(format!("[INVALID_INPUT] unknown prizm_cron action: {other}")),
    }
}

fn list(ctx: &ToolCtx<'_>) -> ToolResult {
    match schedule_service::list(&ctx.env) {
        Ok(items) => {
            let recurring: Vec<_> = items
                .iter()
                .filter(|i| i.recurrence.is_some())
                .map(|i| format!("{} ({}) every {}", i.title, i.id.as_str(), i.recurrence.as_deref().unwrap_or("")))
                .collect();
            ToolResult::ok_with_data(format!("{} recurring item(s)", recurring.len()), serde_json::to_string(&recurring).unwrap_or_default())
        }
        Err(e) => e.into(),
    }
}

fn create(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let title = match args::req_str(raw_args, "title") {
        Ok(t) => t,
        Err(e) => return e.into(),
    };
    let recurrence = match args::req_str(raw_args, "recurrence") {
        Ok(r) => r,
        Err(e) => return e.into(),
    };
    let item_type = match args::opt_str(raw_args, "type").map(parse_item_type).transpose() {
        Ok(t) => t.unwrap_or(ScheduleItemType::Reminder),
        Err(e) => return e,
    };
    let start_time = args::opt_i64(raw_args, "startTime").unwrap_or(0);

    match schedule_service::create(
        &ctx.env,
        &ctx.session_id,
        CreateScheduleArgs {
            title: title.to_string(),
            item_type,
            start_time,
            recurrence: Some(recurrence.to_string()),
        },
    ) {
        Ok(item) => ToolResult::ok_with_data(format!("created recurring {} ({})", item.title, item.id.as_str()), item.id.as_str().to_string()),
        Err(e) => e.into(),
    }
}

fn update(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let id = match args::req_str(raw_args, "id") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    let existing = match schedule_service::get(&ctx.env, id) {
        Ok(item) => item,
        Err(e) => return e.into(),
    };
    if existing.recurrence.is_none() {
        return ToolResult::err(format!("[INVALID_INPUT] {id} is not a recurring schedule item"));
    }

    let update_args = UpdateScheduleArgs {
        title: args::opt_str(raw_args, "title").map(str::to_string),
        start_time: args::opt_i64(raw_args, "startTime"),
        end_time: None,
        status: None,
        recurrence: args::opt_str(raw_args, "recurrence").map(str::to_string),
    };
    match schedule_service::update(&ctx.env, &ctx.session_id, id, update_args) {
        Ok(item) => ToolResult::ok(format!("updated recurring {} ({})", item.title, item.id.as_str())),
        Err(e) => e.into(),
    }
}

fn delete(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let id = match args::req_str(raw_args, "id") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    match schedule_service::delete(&ctx.env, &ctx.session_id, id) {
        Ok(()) => ToolResult::ok(format!("deleted recurring {id}")),
        Err(e) => e.into(),
    }
}

#[cfg(test)]
#[path = "cron_tool_tests.rs"]
mod tests;
