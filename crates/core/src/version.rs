//! `DocumentVersion`: one append-only record in a document's version history.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentVersion {
    pub version: u32,
    pub title: String,
    pub content_hash: String,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_reason: Option<String>,
    #[serde(skip)]
    pub body: String,
}

impl DocumentVersion {
    pub fn first(title: impl Into<String>, content_hash: impl Into<String>, timestamp: i64) -> Self {
        Self {
            version: 1,
            title: title.into(),
            content_hash: content_hash.into(),
            timestamp,
            changed_by: None,
            change_reason: None,
            body: String::new(),
        }
    }

    pub fn next(&self, title: impl Into<String>, content_hash: impl Into<String>, timestamp: i64) -> Self {
        Self {
            version: self.version + 1,
            title: title.into(),
            content_hash: content_hash.into(),
            timestamp,
            changed_by: None,
            change_reason: None,
            body: String::new(),
        }
    }
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
