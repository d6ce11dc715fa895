//! `TokenUsageRecord`: one line-item of LLM token spend.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageScope {
    Chat,
    DocumentSummary,
    ConversationSummary,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsageRecord {
    pub id: String,
    pub usage_scope: UsageScope,
    pub timestamp: i64,
    pub model: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
}

impl TokenUsageRecord {
    pub fn new(
        id: impl Into<String>,
        usage_scope: UsageScope,
        timestamp: i64,
        model: impl Into<String>,
        input_tokens: u64,
        output_tokens: u64,
    ) -> Self {
        Self {
            id: id.into(),
            usage_scope,
            timestamp,
            model: model.into(),
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
        }
    }
}

#[cfg(test)]
#[path = "token_usage_tests.rs"]
mod tests;
