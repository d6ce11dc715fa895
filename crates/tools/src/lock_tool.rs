//! `prizm_lock {checkout,checkin,claim,set_active,release,status}` (§4.9, §4.13).
//!
//! Maps directly onto [`prizm_runtime::LockManager`]'s primitives:
//! `checkout`/`claim` both acquire (the manager already treats acquiring an
//! unheld-or-expired lock as a takeover, so there is no separate forced path
//! to distinguish them by), `checkin`/`release` both release, `set_active`
//! heartbeats the lease, and `status` reads the current holder.

use prizm_core::{CoreError, Event, LockAction, ResourceRef, ResourceType, SessionId};

use crate::context::{args, ToolCtx, ToolResult};

fn parse_resource_type(s: &str) -> Result<ResourceType, ToolResult> {
    match s {
        "document" => Ok(ResourceType::Document),
        "todo_list" => Ok(ResourceType::TodoList),
        "schedule" => Ok(ResourceType::Schedule),
        "file" => Ok(ResourceType::File),
        other => Err(ToolResult::err(format!("[INVALID_INPUT] unknown resource type: {other}"))),
    }
}

fn resource_from_args(raw_args: &serde_json::Value) -> Result<ResourceRef, ToolResult> {
    let resource_type = match args::req_str(raw_args, "resourceType") {
        Ok(t) => t,
        Err(e) => return Err(e.into()),
    };
    let resource_type = parse_resource_type(resource_type)?;
    let resource_id = match args::req_str(raw_args, "resourceId") {
        Ok(id) => id,
        Err(e) => return Err(e.into()),
    };
    Ok(ResourceRef::new(resource_type, resource_id))
}

pub fn dispatch(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let action = match args::action(raw_args) {
        Ok(a) => a,
        Err(e) => return e.into(),
    };
    match action {
        "checkout" | "claim" => acquire(ctx, raw_args),
        "checkin" | "release" => release(ctx, raw_args),
        "set_active" => set_active(ctx, raw_args),
        "status" => status(ctx, raw_args),
        other => ToolResult::err(format!("[INVALID_INPUT] unknown prizm_lock action: {other}")),
    }
}

fn acquire(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let resource = match resource_from_args(raw_args) {
        Ok(r) => r,
        Err(e) => return e,
    };
    let reason = args::opt_str(raw_args, "reason").map(str::to_string);
    let outcome = ctx.locks().acquire(ctx.env.scope.id(), &resource, &ctx.session_id, reason.clone());
    if outcome.success {
        ctx.env.events.publish(Event::ResourceLockChanged {
            action: LockAction::Acquired,
            resource: resource.clone(),
            session_id: SessionId::new(&ctx.session_id),
            reason,
        });
        ToolResult::ok(format!("checked out {}", resource.checkpoint_key()))
    } else {
        let holder = outcome.holder.map(|h| h.session_id).unwrap_or_default();
        ctx.env.events.publish(Event::ResourceLockChanged {
            action: LockAction::Denied,
            resource: resource.clone(),
            session_id: SessionId::new(&ctx.session_id),
            reason,
        });
        ToolResult::from(CoreError::Locked {
            resource_type: resource.resource_type,
            holder,
        })
    }
}

fn release(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let resource = match resource_from_args(raw_args) {
        Ok(r) => r,
        Err(e) => return e,
    };
    if ctx.locks().release(ctx.env.scope.id(), &resource, &ctx.session_id) {
        ctx.env.events.publish(Event::ResourceLockChanged {
            action: LockAction::Released,
            resource: resource.clone(),
            session_id: SessionId::new(&ctx.session_id),
            reason: None,
        });
        ToolResult::ok(format!("checked in {}", resource.checkpoint_key()))
    } else {
        ToolResult::err(format!("[INVALID_INPUT] {} is not held by this session", resource.checkpoint_key()))
    }
}

fn set_active(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let resource = match resource_from_args(raw_args) {
        Ok(r) => r,
        Err(e) => return e,
    };
    if ctx.locks().heartbeat(ctx.env.scope.id(), &resource, &ctx.session_id) {
        ToolResult::ok(format!("lease extended for {}", resource.checkpoint_key()))
    } else {
        ToolResult::err(format!("[INVALID_INPUT] {} is not held by this session", resource.checkpoint_key()))
    }
}

fn status(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let resource = match resource_from_args(raw_args) {
        Ok(r) => r,
        Err(e) => return e,
    };
    match ctx.locks().get(ctx.env.scope.id(), &resource) {
        Some(holder) => ToolResult::ok_with_data(
            format!("{} is held by session {}", resource.checkpoint_key(), holder.session_id),
            holder.session_id,
        ),
        None => ToolResult::ok(format!("{} is unheld", resource.checkpoint_key())),
    }
}

#[cfg(test)]
#[path = "lock_tool_tests.rs"]
mod tests;
