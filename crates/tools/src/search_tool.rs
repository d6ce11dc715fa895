//! `prizm_search {query,reindex}` (§4.13, §9).
//!
//! A substring search over document titles/bodies, todo list/item titles,
//! and schedule titles — the only full-text index this engine needs, since
//! `prizm_knowledge` already covers exact `{kind, id}` lookups. `reindex`
//! drops the cached file scan `prizm_document`/`prizm_todo`/`prizm_schedule`
//! share so the next call picks up files written outside a tool call.

use prizm_services::{document_service, schedule_service, todo_service};
use serde::Serialize;

use crate::context::{args, ToolCtx, ToolResult};

#[derive(Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
struct SearchHit {
    kind: String,
    id: String,
    title: String,
    snippet: String,
}

pub fn dispatch(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let action = match args::action(raw_args) {
        Ok(a) => a,
        Err(e) => return e.into(),
    };
    match action {
        "query" => query(ctx, raw_args),
        "reindex" => reindex(ctx),
        other => ToolResult::err(format!("[INVALID_INPUT] unknown prizm_search action: {other}")),
    }
}

fn snippet(haystack: &str, needle: &str) -> String {
    let lower = haystack.to_lowercase();
    let Some(pos) = lower.find(needle) else {
        return haystack.chars().take(80).collect();
    };
    let start = haystack[..pos].char_indices().rev().take(20).last().map(|(i, _)| i).unwrap_or(0);
    let end = (pos + needle.len() + 40).min(haystack.len());
    haystack[start..end].to_string()
}

fn query(ctx: &ToolCtx<'_>, raw_args: &serde_json::Value) -> ToolResult {
    let q = match args::req_str(raw_args, "q") {
        Ok(q) => q,
        Err(e) => return e.into(),
    };
    if q.trim().is_empty() {
        return ToolResult::err("[INVALID_INPUT] search query must not be empty".to_string());
    }
    let needle = q.to_lowercase();
    let mut hits = Vec::new();

    match document_service::list(&ctx.env) {
        Ok(docs) => {
            for doc in docs {
                if doc.title.to_lowercase().contains(&needle) || doc.body.to_lowercase().contains(&needle) {
                    let snippet = if doc.body.to_lowercase().contains(&needle) {
                        snippet(&doc.body, &needle)
                    } else {
                        doc.title.clone()
                    };
                    hits.push(SearchHit {
                        kind: "document".to_string(),
                        id: doc.id.as_str().to_string(),
                        title: doc.title,
                        snippet,
                    });
                }
            }
        }
        Err(e) => return e.into(),
    }

    match todo_service::list(&ctx.env) {
        Ok(lists) => {
            for list in lists {
                if list.title.to_lowercase().contains(&needle) {
                    hits.push(SearchHit {
                        kind: "todo_list".to_string(),
                        id: list.id.as_str().to_string(),
                        title: list.title.clone(),
                        snippet: list.title,
                    });
                }
                for item in &list.items {
                    if item.title.to_lowercase().contains(&needle) {
                        hits.push(SearchHit {
                            kind: "todo_item".to_string(),
                            id: item.id.as_str().to_string(),
                            title: item.title.clone(),
                            snippet: item.title.clone(),
                        });
                    }
                }
            }
        }
        Err(e) => return e.into(),
    }

    match schedule_service::list(&ctx.env) {
        Ok(items) => {
            for item in items {
                if item.title.to_lowercase().contains(&needle) {
                    hits.push(SearchHit {
                        kind: "schedule".to_string(),
                        id: item.id.as_str().to_string(),
                        title: item.title.clone(),
                        snippet: item.title,
                    });
                }
            }
        }
        Err(e) => return e.into(),
    }

    ToolResult::ok_with_data(format!("{} hit(s) for {q:?}", hits.len()), serde_json::to_string(&hits).unwrap_or_default())
}

fn reindex(ctx: &ToolCtx<'_>) -> ToolResult {
    ctx.env.scope.cache().invalidate();
    ToolResult::ok("search index invalidated")
}

#[cfg(test)]
#[path = "search_tool_tests.rs"]
mod tests;
