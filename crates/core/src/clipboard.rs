//! `ClipboardItem`: an ephemeral payload parked under `.prizm/clipboard/`.

use serde::{Deserialize, Serialize};

use crate::id::ClipboardItemId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipboardItemType {
    Text,
    Image,
    File,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipboardItem {
    pub id: ClipboardItemId,
    #[serde(rename = "type")]
    pub item_type: ClipboardItemType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_app: Option<String>,
    pub created_at: i64,
    #[serde(skip)]
    pub body: String,
}

impl ClipboardItem {
    pub fn new(id: ClipboardItemId, item_type: ClipboardItemType, created_at: i64) -> Self {
        Self {
            id,
            item_type,
            source_app: None,
            created_at,
            body: String::new(),
        }
    }
}

#[cfg(test)]
#[path = "clipboard_tests.rs"]
mod tests;
