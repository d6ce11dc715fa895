//! Transactional operations over [`prizm_core::TodoList`] (§3.2, §4.11).
//!
//! A whole list is one file, so every mutation — adding items, flipping an
//! item's status, deleting an item — locks and fences the *list*, never an
//! individual item.

use prizm_core::{
    CoreError, CoreResult, Event, ResourceRef, ResourceType, TodoItem, TodoItemId, TodoList, TodoListId,
    TodoStatus,
};
use prizm_runtime::{AuditAction, AuditRecord, AuditResult};
use prizm_store::{checkpoint_store, path_provider, todo_store, Checkpoint, CheckpointAction};

use crate::{error::map_fs_error, ServiceEnv};

const TOOL_NAME: &str = "prizm_todo";

fn audit(env: &ServiceEnv<'_>, session_id: &str, action: AuditAction, id: &str, title: Option<&str>, result: AuditResult, error_message: Option<String>) {
    let record = AuditRecord {
        timestamp: env.clock.now_ms(),
        tool_name: TOOL_NAME.to_string(),
        action,
        resource_type: ResourceType::TodoList.to_string(),
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
    let resource = ResourceRef::new(ResourceType::TodoList, id);
    let outcome = env.locks().acquire(env.scope_id(), &resource, session_id, Some(reason.to_string()));
    if !outcome.success {
        let holder = outcome.holder.map(|h| h.session_id).unwrap_or_default();
        audit(env, session_id, AuditAction::Update, id, None, AuditResult::Denied, None);
        return Err(CoreError::Locked {
            resource_type: ResourceType::TodoList,
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

pub fn list(env: &ServiceEnv<'_>) -> CoreResult<Vec<TodoList>> {
    todo_store::read_all(env.scope.scope_root(), env.scope.cache()).map_err(map_fs_error)
}

pub fn get(env: &ServiceEnv<'_>, id: &str) -> CoreResult<TodoList> {
    todo_store::read_by_id(env.scope.scope_root(), env.scope.cache(), id)
        .map_err(map_fs_error)?
        .ok_or_else(|| CoreError::NotFound(format!("todo list {id}")))
}

pub fn create_list(env: &ServiceEnv<'_>, session_id: &str, title: &str) -> CoreResult<TodoList> {
    if title.trim().is_empty() {
        return Err(CoreError::InvalidInput("todo list title must not be empty".to_string()));
    }
    let now = env.clock.now_ms();
    let id = TodoListId::new((env.id_gen)());
    let list = TodoList::new(id.clone(), title, "", now);
    let saved = todo_store::write(env.scope.scope_root(), env.scope.cache(), list).map_err(map_fs_error)?;

    env.events.publish(Event::TodoListCreated { id: id.clone() });
    audit(env, session_id, AuditAction::Create, id.as_str(), Some(&saved.title), AuditResult::Success, None);
    Ok(saved)
}

pub fn delete_list(env: &ServiceEnv<'_>, session_id: &str, id: &str) -> CoreResult<()> {
    let existing = get(env, id)?;
    let (resource, fence) = acquire_or_deny(env, session_id, id, "todo.delete_list")?;

    checkpoint_store::capture(
        env.scope.scope_root(),
        session_id,
        &resource.checkpoint_key(),
        Checkpoint {
            action: CheckpointAction::Delete,
            version_before: None,
            list_snapshot: serde_json::to_value(&existing).ok(),
            title: Some(existing.title.clone()),
            relative_path: Some(existing.relative_path.clone()),
        },
    )
    .map_err(map_fs_error)?;

    verify_fence_or_conflict(env, &resource, fence)?;
    todo_store::delete(env.scope.scope_root(), env.scope.cache(), id).map_err(map_fs_error)?;
    env.locks().release(env.scope_id(), &resource, session_id);

    env.events.publish(Event::TodoListDeleted {
        id: TodoListId::new(id),
    });
    audit(env, session_id, AuditAction::Delete, id, Some(&existing.title), AuditResult::Success, None);
    Ok(())
}

pub fn add_items(env: &ServiceEnv<'_>, session_id: &str, list_id: &str, titles: &[String]) -> CoreResult<TodoList> {
    if titles.is_empty() {
        return Err(CoreError::InvalidInput("at least one item title is required".to_string()));
    }
    let existing = get(env, list_id)?;
    let (resource, fence) = acquire_or_deny(env, session_id, list_id, "todo.add_items")?;

    checkpoint_store::capture(
        env.scope.scope_root(),
        session_id,
        &resource.checkpoint_key(),
        Checkpoint {
            action: CheckpointAction::Modify,
            version_before: None,
            list_snapshot: serde_json::to_value(&existing).ok(),
            title: Some(existing.title.clone()),
            relative_path: Some(existing.relative_path.clone()),
        },
    )
    .map_err(map_fs_error)?;

    let now = env.clock.now_ms();
    let mut updated = existing;
    for title in titles {
        let item_id = TodoItemId::new((env.id_gen)());
        updated.items.push(TodoItem::new(item_id, title, now));
    }
    updated.updated_at = now;

    verify_fence_or_conflict(env, &resource, fence)?;
    let saved = todo_store::write(env.scope.scope_root(), env.scope.cache(), updated).map_err(map_fs_error)?;

    env.events.publish(Event::TodoListUpdated {
        id: TodoListId::new(list_id),
    });
    audit(env, session_id, AuditAction::Update, list_id, Some(&saved.title), AuditResult::Success, None);
    Ok(saved)
}

pub fn update_item(
    env: &ServiceEnv<'_>,
    session_id: &str,
    list_id: &str,
    item_id: &str,
    status: Option<TodoStatus>,
    title: Option<String>,
    description: Option<String>,
) -> CoreResult<TodoList> {
    let existing = get(env, list_id)?;
    if existing.find_item(&TodoItemId::new(item_id)).is_none() {
        return Err(CoreError::NotFound(format!("todo item {item_id} in list {list_id}")));
    }
    let (resource, fence) = acquire_or_deny(env, session_id, list_id, "todo.update_item")?;

    checkpoint_store::capture(
        env.scope.scope_root(),
        session_id,
        &resource.checkpoint_key(),
        Checkpoint {
            action: CheckpointAction::Modify,
            version_before: None,
            list_snapshot: serde_json::to_value(&existing).ok(),
            title: Some(existing.title.clone()),
            relative_path: Some(existing.relative_path.clone()),
        },
    )
    .map_err(map_fs_error)?;

    let now = env.clock.now_ms();
    let mut updated = existing;
    let item_key = TodoItemId::new(item_id);
    let changed_status = {
        let item = updated
            .find_item_mut(&item_key)
            .ok_or_else(|| CoreError::NotFound(format!("todo item {item_id}")))?;
        if let Some(status) = status {
            item.status = status;
        }
        if let Some(title) = title {
            item.title = title;
        }
        if let Some(description) = description {
            item.description = Some(description);
        }
        item.updated_at = now;
        item.status
    };
    updated.updated_at = now;

    verify_fence_or_conflict(env, &resource, fence)?;
    let saved = todo_store::write(env.scope.scope_root(), env.scope.cache(), updated).map_err(map_fs_error)?;

    env.events.publish(Event::TodoItemStatusChanged {
        list_id: TodoListId::new(list_id),
        item_id: item_key,
        status: format!("{changed_status:?}").to_lowercase(),
    });
    audit(env, session_id, AuditAction::Update, list_id, Some(&saved.title), AuditResult::Success, None);
    Ok(saved)
}

pub fn delete_item(env: &ServiceEnv<'_>, session_id: &str, list_id: &str, item_id: &str) -> CoreResult<TodoList> {
    let existing = get(env, list_id)?;
    if existing.find_item(&TodoItemId::new(item_id)).is_none() {
        return Err(CoreError::NotFound(format!("todo item {item_id} in list {list_id}")));
    }
    let (resource, fence) = acquire_or_deny(env, session_id, list_id, "todo.delete_item")?;

    checkpoint_store::capture(
        env.scope.scope_root(),
        session_id,
        &resource.checkpoint_key(),
        Checkpoint {
            action: CheckpointAction::Modify,
            version_before: None,
            list_snapshot: serde_json::to_value(&existing).ok(),
            title: Some(existing.title.clone()),
            relative_path: Some(existing.relative_path.clone()),
        },
    )
    .map_err(map_fs_error)?;

    let mut updated = existing;
    updated.items.retain(|i| i.id != TodoItemId::new(item_id));
    updated.updated_at = env.clock.now_ms();

    verify_fence_or_conflict(env, &resource, fence)?;
    let saved = todo_store::write(env.scope.scope_root(), env.scope.cache(), updated).map_err(map_fs_error)?;

    env.events.publish(Event::TodoListUpdated {
        id: TodoListId::new(list_id),
    });
    audit(env, session_id, AuditAction::Update, list_id, Some(&saved.title), AuditResult::Success, None);
    Ok(saved)
}

#[cfg(test)]
#[path = "todo_service_tests.rs"]
mod tests;
