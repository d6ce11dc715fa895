//! `TodoList` and `TodoItem` entities.

use serde::{Deserialize, Serialize};

use crate::id::{TodoItemId, TodoListId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    Todo,
    Doing,
    Done,
}

impl TodoStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, TodoStatus::Done)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: TodoItemId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TodoStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl TodoItem {
    pub fn new(id: TodoItemId, title: impl Into<String>, created_at: i64) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            status: TodoStatus::Todo,
            created_at,
            updated_at: created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoList {
    pub id: TodoListId,
    pub title: String,
    #[serde(default)]
    pub items: Vec<TodoItem>,
    pub relative_path: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl TodoList {
    pub fn new(id: TodoListId, title: impl Into<String>, relative_path: impl Into<String>, created_at: i64) -> Self {
        Self {
            id,
            title: title.into(),
            items: Vec::new(),
            relative_path: relative_path.into(),
            created_at,
            updated_at: created_at,
        }
    }

    pub fn find_item(&self, id: &TodoItemId) -> Option<&TodoItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    pub fn find_item_mut(&mut self, id: &TodoItemId) -> Option<&mut TodoItem> {
        self.items.iter_mut().find(|i| &i.id == id)
    }
}

#[cfg(test)]
#[path = "todo_tests.rs"]
mod tests;
