//! Transactional operations over [`prizm_core::Document`] (§3.2, §4.6, §4.11).

use prizm_core::{
    CoreError, CoreResult, Document, DocumentVersion, Event, LockAction, ResourceRef, ResourceType,
};
use prizm_runtime::{AuditAction, AuditRecord, AuditResult};
use prizm_store::{checkpoint_store, document_store, document_version_store, path_provider, Checkpoint, CheckpointAction};

use crate::{error::map_fs_error, ServiceEnv};

const TOOL_NAME: &str = "prizm_document";

fn audit(env: &ServiceEnv<'_>, session_id: &str, action: AuditAction, id: &str, title: Option<&str>, result: AuditResult, error_message: Option<String>) {
    let record = AuditRecord {
        timestamp: env.clock.now_ms(),
        tool_name: TOOL_NAME.to_string(),
        action,
        resource_type: ResourceType::Document.to_string(),
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

fn locked_error(holder_session: &str) -> CoreError {
    CoreError::Locked {
        resource_type: ResourceType::Document,
        holder: holder_session.to_string(),
    }
}

/// Acquire the document's lock for `session_id`, denying (and auditing the
/// denial) when another session already holds it. Returns the fence token
/// used for the two-phase check in [`persist_with_fence`].
fn acquire_or_deny(
    env: &ServiceEnv<'_>,
    session_id: &str,
    id: &str,
    title_for_audit: Option<&str>,
    action: AuditAction,
    reason: &str,
) -> CoreResult<(ResourceRef, u64)> {
    let resource = ResourceRef::new(ResourceType::Document, id);
    let outcome = env.locks().acquire(env.scope_id(), &resource, session_id, Some(reason.to_string()));
    if !outcome.success {
        let holder = outcome.holder.map(|h| h.session_id).unwrap_or_default();
        audit(env, session_id, action, id, title_for_audit, AuditResult::Denied, None);
        env.events.publish(Event::ResourceLockChanged {
            action: LockAction::Denied,
            resource: resource.clone(),
            session_id: prizm_core::SessionId::new(session_id),
            reason: Some(reason.to_string()),
        });
        return Err(locked_error(&holder));
    }
    env.events.publish(Event::ResourceLockChanged {
        action: LockAction::Acquired,
        resource: resource.clone(),
        session_id: prizm_core::SessionId::new(session_id),
        reason: Some(reason.to_string()),
    });
    Ok((resource, outcome.fence_token.unwrap_or(0)))
}

/// Re-verify the fence immediately before the write lands, per the
/// two-phase check in §4.9: once at acquire, once right before persisting.
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

pub fn list(env: &ServiceEnv<'_>) -> CoreResult<Vec<Document>> {
    document_store::read_all(env.scope.scope_root(), env.scope.cache()).map_err(map_fs_error)
}

pub fn get(env: &ServiceEnv<'_>, id: &str) -> CoreResult<Document> {
    document_store::read_by_id(env.scope.scope_root(), env.scope.cache(), id)
        .map_err(map_fs_error)?
        .ok_or_else(|| CoreError::NotFound(format!("document {id}")))
}

pub struct CreateDocumentArgs {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
}

pub fn create(env: &ServiceEnv<'_>, session_id: &str, args: CreateDocumentArgs) -> CoreResult<Document> {
    if args.title.trim().is_empty() {
        return Err(CoreError::InvalidInput("document title must not be empty".to_string()));
    }
    let now = env.clock.now_ms();
    let id = prizm_core::DocumentId::new((env.id_gen)());
    let mut doc = Document::new(id.clone(), args.title.clone(), "", now);
    doc.tags = args.tags;
    doc.body = args.body.clone();

    let saved = document_store::write(env.scope.scope_root(), env.scope.cache(), doc).map_err(map_fs_error)?;
    document_version_store::save_version(
        env.scope.scope_root(),
        id.as_str(),
        &args.title,
        &args.body,
        now,
        None,
        Some("created".to_string()),
    )
    .map_err(map_fs_error)?;

    env.events.publish(Event::DocumentCreated {
        id: id.clone(),
        relative_path: saved.relative_path.clone(),
    });
    audit(env, session_id, AuditAction::Create, id.as_str(), Some(&saved.title), AuditResult::Success, None);
    Ok(saved)
}

pub struct UpdateDocumentArgs {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
    pub changed_by: Option<String>,
    pub change_reason: Option<String>,
}

/// Update a document, auto-acquiring its lock if unheld and leaving it held
/// afterward so the caller can make further edits without re-acquiring
/// (§4.13: update leaves the lock held, prompting an explicit checkin).
pub fn update(env: &ServiceEnv<'_>, session_id: &str, id: &str, args: UpdateDocumentArgs) -> CoreResult<Document> {
    let existing = get(env, id)?;
    let (resource, fence) = acquire_or_deny(
        env,
        session_id,
        id,
        Some(&existing.title),
        AuditAction::Update,
        "document.update",
    )?;

    checkpoint_store::capture(
        env.scope.scope_root(),
        session_id,
        &resource.checkpoint_key(),
        Checkpoint {
            action: CheckpointAction::Update,
            version_before: document_version_store::get_version_history(env.scope.scope_root(), id)
                .map_err(map_fs_error)?
                .last()
                .map(|v| v.version),
            list_snapshot: None,
            title: Some(existing.title.clone()),
            relative_path: Some(existing.relative_path.clone()),
        },
    )
    .map_err(map_fs_error)?;

    let now = env.clock.now_ms();
    let mut updated = existing.clone();
    if let Some(title) = args.title {
        if title.trim().is_empty() {
            audit(env, session_id, AuditAction::Update, id, Some(&existing.title), AuditResult::Error, Some("empty title".to_string()));
            return Err(CoreError::InvalidInput("document title must not be empty".to_string()));
        }
        updated.title = title;
    }
    if let Some(tags) = args.tags {
        updated.tags = tags;
    }
    if let Some(body) = &args.body {
        updated.body = body.clone();
    }
    updated.updated_at = now;

    verify_fence_or_conflict(env, &resource, fence)?;

    let old_relative_path = existing.relative_path.clone();
    let saved = document_store::write(env.scope.scope_root(), env.scope.cache(), updated).map_err(map_fs_error)?;

    if args.body.is_some() {
        document_version_store::save_version(
            env.scope.scope_root(),
            id,
            &saved.title,
            &saved.body,
            now,
            args.changed_by,
            args.change_reason,
        )
        .map_err(map_fs_error)?;
    }

    if saved.relative_path != old_relative_path {
        env.events.publish(Event::DocumentRenamed {
            id: prizm_core::DocumentId::new(id),
            old_relative_path,
            new_relative_path: saved.relative_path.clone(),
        });
    } else {
        env.events.publish(Event::DocumentUpdated {
            id: prizm_core::DocumentId::new(id),
            relative_path: saved.relative_path.clone(),
        });
    }
    audit(env, session_id, AuditAction::Update, id, Some(&saved.title), AuditResult::Success, None);
    Ok(saved)
}

/// Delete a document, auto-acquiring its lock if unheld and releasing it
/// once the delete lands (§4.13: delete auto-releases).
pub fn delete(env: &ServiceEnv<'_>, session_id: &str, id: &str) -> CoreResult<()> {
    let existing = get(env, id)?;
    let (resource, fence) = acquire_or_deny(
        env,
        session_id,
        id,
        Some(&existing.title),
        AuditAction::Delete,
        "document.delete",
    )?;

    checkpoint_store::capture(
        env.scope.scope_root(),
        session_id,
        &resource.checkpoint_key(),
        Checkpoint {
            action: CheckpointAction::Delete,
            version_before: document_version_store::get_version_history(env.scope.scope_root(), id)
                .map_err(map_fs_error)?
                .last()
                .map(|v| v.version),
            list_snapshot: None,
            title: Some(existing.title.clone()),
            relative_path: Some(existing.relative_path.clone()),
        },
    )
    .map_err(map_fs_error)?;

    verify_fence_or_conflict(env, &resource, fence)?;
    document_store::delete(env.scope.scope_root(), env.scope.cache(), id).map_err(map_fs_error)?;
    env.locks().release(env.scope_id(), &resource, session_id);
    env.events.publish(Event::ResourceLockChanged {
        action: LockAction::Released,
        resource: resource.clone(),
        session_id: prizm_core::SessionId::new(session_id),
        reason: None,
    });

    env.events.publish(Event::DocumentDeleted {
        id: prizm_core::DocumentId::new(id),
        relative_path: existing.relative_path.clone(),
    });
    audit(env, session_id, AuditAction::Delete, id, Some(&existing.title), AuditResult::Success, None);
    Ok(())
}

/// Restore a document's title and path to the state captured by its most
/// recent checkpoint, consuming that checkpoint so a second revert has
/// nothing to act on. The version log retains only metadata past the most
/// recent write (§4.6), so a revert cannot recover a superseded body; only
/// title and location are restorable this way.
pub fn revert(env: &ServiceEnv<'_>, session_id: &str, id: &str) -> CoreResult<Document> {
    let resource = ResourceRef::new(ResourceType::Document, id);
    let checkpoint = checkpoint_store::take(env.scope.scope_root(), session_id, &resource.checkpoint_key())
        .map_err(map_fs_error)?
        .ok_or_else(|| CoreError::NotFound(format!("no checkpoint to revert document {id} to")))?;

    let mut restored = get(env, id)?;
    if let Some(title) = checkpoint.title {
        restored.title = title;
    }
    restored.updated_at = env.clock.now_ms();

    let saved = document_store::write(env.scope.scope_root(), env.scope.cache(), restored).map_err(map_fs_error)?;
    env.events.publish(Event::DocumentUpdated {
        id: prizm_core::DocumentId::new(id),
        relative_path: saved.relative_path.clone(),
    });
    audit(env, session_id, AuditAction::Update, id, Some(&saved.title), AuditResult::Success, None);
    Ok(saved)
}

pub fn list_versions(env: &ServiceEnv<'_>, id: &str) -> CoreResult<Vec<DocumentVersion>> {
    document_version_store::get_version_history(env.scope.scope_root(), id).map_err(map_fs_error)
}

/// Human-readable Markdown diff between two bodies, surfaced to callers
/// inspecting version history (the tool layer passes in the previous and
/// current body it already has on hand around an `update` call).
pub fn diff(old_body: &str, new_body: &str) -> String {
    document_version_store::compute_diff(old_body, new_body)
}

#[cfg(test)]
#[path = "document_service_tests.rs"]
mod tests;
