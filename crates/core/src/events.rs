//! Event types published on the in-process event bus.
//!
//! Serializes with `{"type": "topic:name", ...fields}` format.

use serde::{Deserialize, Serialize};

use crate::id::{DocumentId, RunId, ScheduleId, SessionId, TodoItemId, TodoListId};
use crate::resource::{ResourceRef, ResourceType};

/// Action recorded by a lock state change, also reused by the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockAction {
    Acquired,
    Released,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    // -- document --
    #[serde(rename = "document:created")]
    DocumentCreated { id: DocumentId, relative_path: String },
    #[serde(rename = "document:updated")]
    DocumentUpdated { id: DocumentId, relative_path: String },
    #[serde(rename = "document:deleted")]
    DocumentDeleted { id: DocumentId, relative_path: String },
    #[serde(rename = "document:renamed")]
    DocumentRenamed {
        id: DocumentId,
        old_relative_path: String,
        new_relative_path: String,
    },

    // -- todo --
    #[serde(rename = "todo:list_created")]
    TodoListCreated { id: TodoListId },
    #[serde(rename = "todo:list_updated")]
    TodoListUpdated { id: TodoListId },
    #[serde(rename = "todo:list_deleted")]
    TodoListDeleted { id: TodoListId },
    #[serde(rename = "todo:item_status_changed")]
    TodoItemStatusChanged {
        list_id: TodoListId,
        item_id: TodoItemId,
        status: String,
    },

    // -- schedule --
    #[serde(rename = "schedule:created")]
    ScheduleCreated { id: ScheduleId },
    #[serde(rename = "schedule:updated")]
    ScheduleUpdated { id: ScheduleId },
    #[serde(rename = "schedule:deleted")]
    ScheduleDeleted { id: ScheduleId },

    // -- resource locking --
    #[serde(rename = "resource:lock.changed")]
    ResourceLockChanged {
        action: LockAction,
        #[serde(flatten)]
        resource: ResourceRef,
        session_id: SessionId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },

    // -- workflow --
    #[serde(rename = "workflow:run_started")]
    WorkflowRunStarted { run_id: RunId, workflow_name: String },
    #[serde(rename = "workflow:step_completed")]
    WorkflowStepCompleted { run_id: RunId, step_index: usize },
    #[serde(rename = "workflow:run_completed")]
    WorkflowRunCompleted { run_id: RunId },
    #[serde(rename = "workflow:run_failed")]
    WorkflowRunFailed { run_id: RunId, error: String },
    #[serde(rename = "workflow:run_cancelled")]
    WorkflowRunCancelled { run_id: RunId },

    // -- session --
    #[serde(rename = "session:created")]
    SessionCreated { id: SessionId },
    #[serde(rename = "session:message_appended")]
    SessionMessageAppended { id: SessionId, message_id: String },
    #[serde(rename = "session:terminated")]
    SessionTerminated { id: SessionId },
}

impl Event {
    /// The `type` tag this event serializes under, also used as the topic
    /// pattern subscribers filter on (e.g. `document:*` matches anything
    /// starting with `document:`).
    pub fn name(&self) -> &'static str {
        match self {
            Event::DocumentCreated { .. } => "document:created",
            Event::DocumentUpdated { .. } => "document:updated",
            Event::DocumentDeleted { .. } => "document:deleted",
            Event::DocumentRenamed { .. } => "document:renamed",
            Event::TodoListCreated { .. } => "todo:list_created",
            Event::TodoListUpdated { .. } => "todo:list_updated",
            Event::TodoListDeleted { .. } => "todo:list_deleted",
            Event::TodoItemStatusChanged { .. } => "todo:item_status_changed",
            Event::ScheduleCreated { .. } => "schedule:created",
            Event::ScheduleUpdated { .. } => "schedule:updated",
            Event::ScheduleDeleted { .. } => "schedule:deleted",
            Event::ResourceLockChanged { .. } => "resource:lock.changed",
            Event::WorkflowRunStarted { .. } => "workflow:run_started",
            Event::WorkflowStepCompleted { .. } => "workflow:step_completed",
            Event::WorkflowRunCompleted { .. } => "workflow:run_completed",
            Event::WorkflowRunFailed { .. } => "workflow:run_failed",
            Event::WorkflowRunCancelled { .. } => "workflow:run_cancelled",
            Event::SessionCreated { .. } => "session:created",
            Event::SessionMessageAppended { .. } => "session:message_appended",
            Event::SessionTerminated { .. } => "session:terminated",
        }
    }

    /// Topic prefix used for wildcard subscriptions (`document:*` etc).
    pub fn topic_prefix(&self) -> &'static str {
        match self.name().split_once(':') {
            Some((prefix, _)) => match prefix {
                "document" => "document:",
                "todo" => "todo:",
                "schedule" => "schedule:",
                "workflow" => "workflow:",
                "session" => "session:",
                _ => "resource:",
            },
            None => "",
        }
    }

    /// The resource a lock-changed event refers to, when applicable.
    pub fn resource_type(&self) -> Option<ResourceType> {
        match self {
            Event::ResourceLockChanged { resource, .. } => Some(resource.resource_type),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
