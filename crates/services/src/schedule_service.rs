//! Transactional operations over [`prizm_core::ScheduleItem`] (§3.2, §4.11).

use prizm_core::{CoreError, CoreResult, Event, ResourceRef, ResourceType, ScheduleId, ScheduleItem, ScheduleItemType};
use prizm_runtime::{AuditAction, AuditRecord, AuditResult};
use prizm_store::{checkpoint_store, path_provider, schedule_store, Checkpoint, CheckpointAction};

use crate::{error::map_fs_error, ServiceEnv};

const TOOL_NAME: &str = "prizm_schedule";

fn audit(env: &ServiceEnv<'_>, session_id: &str, action: AuditAction, id: &str, title: Option<&str>, result: AuditResult, error_message: Option<String>) {
    let record = AuditRecord {
        timestamp: env.clock.now_ms(),
        tool_name: TOOL_NAME.to_string(),
        action,
        resource_type: ResourceType::Schedule.to_string(),
        resource_id: id.to_string(),
        resource_title: title.map(str::to_string),
        detail: None,
        result,
        error_message,
    };
    let path = path_provider::session_audit_file(env.scope.scope_root(), session_id);
    if let Err(e) = env.audit.append(&path, &record) {
        tracing::warn!(error = %e, session_id, "failed to append audit record");
    }
}

fn acquire_or_deny(env: &ServiceEnv<'_>, session_id: &str, id: &str, reason: &str) -> CoreResult<(ResourceRef, u64)> {
    let resource = ResourceRef::new(ResourceType::Schedule, id);
    let outcome = env.locks().acquire(env.scope_id(), &resource, session_id, Some(reason.to_string()));
    if !outcome.success {
        let holder = outcome.holder.map(|h| h.session_id).unwrap_or_default();
        audit(env, session_id, AuditAction::Update, id, None, AuditResult::Denied, None);
        return Err(CoreError::Locked {
            resource_type: ResourceType::Schedule,
            holder,
        });
    }
    Ok((resource, outcome.fence_token.unwrap_or(0)))
}

fn verify_fence_or_conflict(env: &ServiceEnv<'_>, resource: &ResourceRef, fence_token: u64) -> CoreResult<()> {
    if env.locks().verify_fence(env.scope_id(), resource, fence_token) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "lock fence lost for {} before the write could land",
            resource.checkpoint_key()
        )))
    }
}

pub fn list(env: &ServiceEnv<'_>) -> CoreResult<Vec<ScheduleItem>> {
    Ok(schedule_store::read_all(env.scope.scope_root(), env.scope.cache())
        .map_err(map_fs_error)?
        .into_iter()
        .map(|(_, item)| item)
        .collect())
}

pub fn get(env: &ServiceEnv<'_>, id: &str) -> CoreResult<ScheduleItem> {
    Ok(schedule_store::read_by_id(env.scope.scope_root(), env.scope.cache(), id)
        .map_err(map_fs_error)?
        .ok_or_else(|| CoreError::NotFound(format!("schedule item {id}")))?
        .1)
}

pub struct CreateScheduleArgs {
    pub title: String,
    pub item_type: ScheduleItemType,
    pub start_time: i64,
    pub recurrence: Option<String>,
}

pub fn create(env: &ServiceEnv<'_>, session_id: &str, args: CreateScheduleArgs) -> CoreResult<ScheduleItem> {
    if args.title.trim().is_empty() {
        return Err(CoreError::InvalidInput("schedule item title must not be empty".to_string()));
    }
    let id = ScheduleId::new((env.id_gen)());
    let mut item = ScheduleItem::new(id.clone(), args.title, args.item_type, args.start_time);
    item.recurrence = args.recurrence;
    schedule_store::write(env.scope.scope_root(), env.scope.cache(), &item).map_err(map_fs_error)?;

    env.events.publish(Event::ScheduleCreated { id: id.clone() });
    audit(env, session_id, AuditAction::Create, id.as_str(), Some(&item.title), AuditResult::Success, None);
    Ok(item)
}

pub struct UpdateScheduleArgs {
    pub title: Option<String>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub status: Option<prizm_core::ScheduleStatus>,
    pub recurrence: Option<String>,
}

pub fn update(env: &ServiceEnv<'_>, session_id: &str, id: &str, args: UpdateScheduleArgs) -> CoreResult<ScheduleItem> {
    let existing = get(env, id)?;
    let (resource, fence) = acquire_or_deny(env, session_id, id, "schedule.update")?;

    checkpoint_store::capture(
        env.scope.scope_root(),
        session_id,
        &resource.checkpoint_key(),
        Checkpoint {
            action: CheckpointAction::Update,
            version_before: None,
            list_snapshot: serde_json::to_value(&existing).ok(),
            title: Some(existing.title.clone()),
            relative_path: None,
        },
    )
    .map_err(map_fs_error)?;

    let mut updated = existing;
    if let Some(title) = args.title {
        if title.trim().is_empty() {
            return Err(CoreError::InvalidInput("schedule item title must not be empty".to_string()));
        }
        updated.title = title;
    }
    if let Some(start_time) = args.start_time {
        updated.start_time = start_time;
    }
    if args.end_time.is_some() {
        updated.end_time = args.end_time;
    }
    if let Some(status) = args.status {
        updated.status = status;
    }
    if args.recurrence.is_some() {
        updated.recurrence = args.recurrence;
    }

    verify_fence_or_conflict(env, &resource, fence)?;
    schedule_store::write(env.scope.scope_root(), env.scope.cache(), &updated).map_err(map_fs_error)?;
    env.locks().release(env.scope_id(), &resource, session_id);

    env.events.publish(Event::ScheduleUpdated {
        id: ScheduleId::new(id),
    });
    audit(env, session_id, AuditAction::Update, id, Some(&updated.title), AuditResult::Success, None);
    Ok(updated)
}

pub fn delete(env: &ServiceEnv<'_>, session_id: &str, id: &str) -> CoreResult<()> {
    let existing = get(env, id)?;
    let (resource, fence) = acquire_or_deny(env, session_id, id, "schedule.delete")?;

    checkpoint_store::capture(
        env.scope.scope_root(),
        session_id,
        &resource.checkpoint_key(),
        Checkpoint {
            action: CheckpointAction::Delete,
            version_before: None,
            list_snapshot: serde_json::to_value(&existing).ok(),
            title: Some(existing.title.clone()),
            relative_path: None,
        },
    )
    .map_err(map_fs_error)?;

    verify_fence_or_conflict(env, &resource, fence)?;
    schedule_store::delete(env.scope.scope_root(), env.scope.cache(), id).map_err(map_fs_error)?;
    env.locks().release(env.scope_id(), &resource, session_id);

    env.events.publish(Event::ScheduleDeleted {
        id: ScheduleId::new(id),
    });
    audit(env, session_id, AuditAction::Delete, id, Some(&existing.title), AuditResult::Success, None);
    Ok(())
}

#[cfg(test)]
#[path = "schedule_service_tests.rs"]
mod tests;
