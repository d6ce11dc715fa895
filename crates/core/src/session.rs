//! `AgentSession`: a chat-style conversation, persisted as one entity file
//! with an embedded message list.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::id::SessionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_growth: Option<Value>,
}

impl SessionMessage {
    pub fn new(id: impl Into<String>, role: MessageRole, content: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: id.into(),
            role,
            content: content.into(),
            created_at,
            model: None,
            tool_calls: None,
            usage: None,
            reasoning: None,
            parts: None,
            memory_growth: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSession {
    pub id: SessionId,
    pub scope: String,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compressed_through_round: Option<u32>,
    #[serde(default)]
    pub messages: Vec<SessionMessage>,
}

impl AgentSession {
    pub fn new(id: SessionId, scope: impl Into<String>, created_at: i64) -> Self {
        Self {
            id,
            scope: scope.into(),
            created_at,
            updated_at: created_at,
            compressed_through_round: None,
            messages: Vec::new(),
        }
    }

    pub fn push_message(&mut self, message: SessionMessage) {
        self.updated_at = message.created_at.max(self.updated_at);
        self.messages.push(message);
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
