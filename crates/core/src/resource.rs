//! Lockable resource addressing and workspace classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The family of entity a lock or audit record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Document,
    TodoList,
    Schedule,
    File,
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceType::Document => write!(f, "document"),
            ResourceType::TodoList => write!(f, "todo_list"),
            ResourceType::Schedule => write!(f, "schedule"),
            ResourceType::File => write!(f, "file"),
        }
    }
}

impl ResourceType {
    /// The user-facing label used in lock-denial text (§8 scenario 2:
    /// `[LOCKED] 文档已被会话 S1 签出`).
    pub fn checked_out_label(&self) -> &'static str {
        match self {
            ResourceType::Document => "文档",
            ResourceType::TodoList => "待办列表",
            ResourceType::Schedule => "日程",
            ResourceType::File => "文件",
        }
    }
}

/// Identifies a single lockable resource within a scope: `(resourceType, resourceId)`.
///
/// The scope itself is the lock manager's outer key and is not part of this
/// struct — one manager instance is owned per scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    pub resource_type: ResourceType,
    pub resource_id: String,
}

impl ResourceRef {
    pub fn new(resource_type: ResourceType, resource_id: impl Into<String>) -> Self {
        Self {
            resource_type,
            resource_id: resource_id.into(),
        }
    }

    /// Synthetic checkpoint key such as `[doc:<id>]`, matching the
    /// bracketed-tag convention used by the checkpoint store.
    pub fn checkpoint_key(&self) -> String {
        let tag = match self.resource_type {
            ResourceType::Document => "doc",
            ResourceType::TodoList => "todo",
            ResourceType::Schedule => "schedule",
            ResourceType::File => "file",
        };
        format!("[{tag}:{}]", self.resource_id)
    }
}

/// Which workspace view a resolved path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceKind {
    Main,
    Session,
    Run,
    Workflow,
    Granted,
}

impl fmt::Display for WorkspaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkspaceKind::Main => write!(f, "main"),
            WorkspaceKind::Session => write!(f, "session"),
            WorkspaceKind::Run => write!(f, "run"),
            WorkspaceKind::Workflow => write!(f, "workflow"),
            WorkspaceKind::Granted => write!(f, "granted"),
        }
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
