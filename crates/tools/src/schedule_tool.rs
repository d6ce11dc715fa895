//! `prizm_schedule {list,read,create,update,delete}` (§4.11, §4.13).

use prizm_core::{ScheduleItemType, ScheduleStatus};
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

fn parse_status(s: &str) -> Result<ScheduleStatus, ToolResult> {
    match s {
        "upcoming" => Ok(ScheduleStatus::Upcoming),
        "active" => Ok(ScheduleStatus::Active),
        "completed" => Ok(ScheduleStatus::Completed),
        "cancelled" => Ok(ScheduleStatus::Cancelled),
        other => Err(ToolResult::err(format!("[INVALID_INPUT] unknown schedule status: {other}"))),
    }
}

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
        other => ToolResult::err(format!("[INVALID_INPUT] unknown prizm_schedule action: {other}")),
    }
}

fn list(ctx: &ToolCtx<'_>) -> ToolResult {
    match schedule_service::list(&ctx.env) {
        Ok(items) => {
            let summary: Vec<_> = items.iter().map(|i| format!("{} ({})", i.title, i.id.as_str())).collect();
            ToolResult::ok_with_data(format!("{} item(s)", items.len()), serde_json::to_string(&summary).unwrap_or_default())
        }
        Err(e) => e.into(),
    }
}

fn read(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let id = match args::req_str(raw_args, "id") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    match schedule_service::get(&ctx.env, id) {
        Ok(item) => ToolResult::ok(format!("{} at {}", item.title, item.start_time)),
        Err(e) => e.into(),
    }
}

fn create(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let title = match args::req_str(raw_args, "title") {
        Ok(t) => t,
        Err(e) => return e.into(),
    };
    let item_type = match args::opt_str(raw_args, "type").map(parse_item_type).transpose() {
        Ok(t) => t.unwrap_or(ScheduleItemType::Event),
        Err(e) => return e,
    };
    let start_time = match args::opt_i64(raw_args, "startTime") {
        Some(t) => t,
        None => return ToolResult::err("[INVALID_INPUT] missing required arg: startTime".to_string()),
    };
    let recurrence = args::opt_str(raw_args, "recurrence").map(str::to_string);

    match schedule_service::create(
        &ctx.env,
        &ctx.session_id,
        CreateScheduleArgs {
            title: title.to_string(),
            item_type,
            start_time,
            recurrence,
        },
    ) {
        Ok(item) => ToolResult::ok_with_data(format!("created {} ({})", item.title, item.id.as_str()), item.id.as_str().to_string()),
        Err(e) => e.into(),
    }
}

fn update(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let id = match args::req_str(raw_args, "id") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    let status = match args::opt_str(raw_args, "status").map(parse_status).transpose() {
        Ok(s) => s,
        Err(e) => return e,
    };
    let update_args = UpdateScheduleArgs {
        title: args::opt_str(raw_args, "title").map(str::to_string),
        start_time: args::opt_i64(raw_args, "startTime"),
        end_time: args::opt_i64(raw_args, "endTime"),
        status,
        recurrence: args::opt_str(raw_args, "recurrence").map(str::to_string),
    };
    match schedule_service::update(&ctx.env, &ctx.session_id, id, update_args) {
        Ok(item) => ToolResult::ok(format!("updated {} ({})", item.title, item.id.as_str())),
        Err(e) => e.into(),
    }
}

fn delete(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let id = match args::req_str(raw_args, "id") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    match schedule_service::delete(&ctx.env, &ctx.session_id, id) {
        Ok(()) => ToolResult::ok(format!("deleted {id}")),
        Err(e) => e.into(),
    }
}

#[cfg(test)]
#[path = "schedule_tool_tests.rs"]
mod tests;
