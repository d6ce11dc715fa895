//! BuiltinToolRegistry (§4.13): the fixed catalogue of tool names, grouped
//! into toggleable families ("Toolgroups let callers enable/disable whole
//! families without per-tool wiring"), and the single dispatch entrypoint
//! that routes a call to whichever tool module owns it.

use crate::context::{ToolCtx, ToolResult};
use crate::{
    cron_tool, document_tool, file_tool, knowledge_tool, lock_tool, promote_tool, schedule_tool, search_tool, spawn_task_tool, terminal_tool,
    todo_tool, workflow_tool,
};

/// A family of related tool names a caller can enable or disable as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolGroup {
    File,
    Document,
    Todo,
    Search,
    Knowledge,
    Lock,
    Schedule,
    Cron,
    Terminal,
    Workflow,
    SpawnTask,
    Promote,
}

pub const ALL_GROUPS: &[ToolGroup] = &[
    ToolGroup::File,
    ToolGroup::Document,
    ToolGroup::Todo,
    ToolGroup::Search,
    ToolGroup::Knowledge,
    ToolGroup::Lock,
    ToolGroup::Schedule,
    ToolGroup::Cron,
    ToolGroup::Terminal,
    ToolGroup::Workflow,
    ToolGroup::SpawnTask,
    ToolGroup::Promote,
];

impl ToolGroup {
    fn of(tool_name: &str) -> Option<Self> {
        match tool_name {
            "prizm_file" => Some(ToolGroup::File),
            "prizm_document" => Some(ToolGroup::Document),
            "prizm_todo" => Some(ToolGroup::Todo),
            "prizm_search" => Some(ToolGroup::Search),
            "prizm_knowledge" => Some(ToolGroup::Knowledge),
            "prizm_lock" => Some(ToolGroup::Lock),
            "prizm_schedule" => Some(ToolGroup::Schedule),
            "prizm_cron" => Some(ToolGroup::Cron),
            "prizm_workflow" => Some(ToolGroup::Workflow),
            "prizm_promote_file" => Some(ToolGroup::Promote),
            "prizm_spawn_task" | "prizm_task_status" | "prizm_set_result" => Some(ToolGroup::SpawnTask),
            t if t.starts_with("prizm_terminal_") => Some(ToolGroup::Terminal),
            _ => None,
        }
    }
}

/// Which groups are enabled for one dispatch call. Everything is enabled
/// by default; most callers never restrict anything.
#[derive(Debug, Clone, Default)]
pub struct ToolFilter {
    disabled: Vec<ToolGroup>,
}

impl ToolFilter {
    pub fn all_enabled() -> Self {
        Self::default()
    }

    pub fn disable(mut self, group: ToolGroup) -> Self {
        self.disabled.push(group);
        self
    }

    fn allows(&self, group: ToolGroup) -> bool {
        !self.disabled.contains(&group)
    }
}

/// Route one tool invocation to its executor, honoring `filter`.
pub async fn dispatch(ctx: &ToolCtx<'_>, filter: &ToolFilter, tool_name: &str, raw_args: &serde_json::Value) -> ToolResult {
    let Some(group) = ToolGroup::of(tool_name) else {
        return ToolResult::err(format!("[INVALID_INPUT] unknown tool: {tool_name}"));
    };
    if !filter.allows(group) {
        return ToolResult::err(format!("[INVALID_INPUT] tool group {group:?} is disabled"));
    }

    match tool_name {
        "prizm_file" => file_tool::dispatch(ctx, raw_args),
        "prizm_document" => document_tool::dispatch(ctx, raw_args),
        "prizm_todo" => todo_tool::dispatch(ctx, raw_args),
        "prizm_search" => search_tool::dispatch(ctx, raw_args),
        "prizm_knowledge" => knowledge_tool::dispatch(ctx, raw_args),
        "prizm_lock" => lock_tool::dispatch(ctx, raw_args),
        "prizm_schedule" => schedule_tool::dispatch(ctx, raw_args),
        "prizm_cron" => cron_tool::dispatch(ctx, raw_args),
        "prizm_promote_file" => promote_tool::dispatch(ctx, raw_args),
        "prizm_workflow" => workflow_tool::dispatch(ctx, raw_args).await,
        "prizm_spawn_task" | "prizm_task_status" | "prizm_set_result" => spawn_task_tool::dispatch(ctx, tool_name, raw_args),
        t if t.starts_with("prizm_terminal_") => terminal_tool::dispatch(ctx, t, raw_args).await,
        _ => unreachable!("every name ToolGroup::of accepts is handled above"),
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
