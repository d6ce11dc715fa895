// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! prizm-tools: the builtin tool catalogue an agent session calls into
//! (§4.13), plus the slash command layer a chat client parses messages
//! through (§4.15).
//!
//! Every `*_tool` module owns one compound tool name (or, for terminals and
//! spawned tasks, a small family of related names) and exposes a single
//! `dispatch(ctx, args) -> ToolResult` entrypoint; [`registry`] is the only
//! place that knows the full name-to-module mapping.

pub mod context;
pub mod registry;
pub mod slash_command;
pub mod task_registry;

mod cron_tool;
mod document_tool;
mod file_tool;
mod knowledge_tool;
mod lock_tool;
mod promote_tool;
mod schedule_tool;
mod search_tool;
mod spawn_task_tool;
mod terminal_tool;
mod todo_tool;
mod workflow_tool;

#[cfg(test)]
mod support;

pub use context::{ToolCtx, ToolResult};
pub use registry::{dispatch, ToolFilter, ToolGroup, ALL_GROUPS};
pub use slash_command::{parse_slash_message, ParsedSlashCommand, SlashCommand, SlashCommandHandler, SlashCommandRegistry};
pub use task_registry::{SpawnTaskRegistry, TaskStatus};
