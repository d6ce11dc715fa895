//! The `Document` entity: a user-authored Markdown file tracked by the store.

use serde::{Deserialize, Serialize};

use crate::id::DocumentId;

/// Frontmatter + body for a tracked Markdown document.
///
/// The body lives outside this struct in most call sites (it is the raw
/// file content below the frontmatter fence); `Document` here models only
/// the frontmatter fields plus an optional `body` for round-tripping through
/// [`crate::ShortId`]-keyed stores that want the whole entity in one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_summary: Option<String>,
    pub relative_path: String,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(skip)]
    pub body: String,
}

impl Document {
    pub fn new(
        id: DocumentId,
        title: impl Into<String>,
        relative_path: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            tags: Vec::new(),
            llm_summary: None,
            relative_path: relative_path.into(),
            created_at,
            updated_at: created_at,
            body: String::new(),
        }
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
