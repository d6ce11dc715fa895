//! `prizm tool call <name> --args <json>` — invoke any builtin tool by
//! name, for debugging tools this CLI doesn't have a dedicated subcommand
//! for yet (terminals, locks, cron, search, spawned tasks, promotion).

use clap::Args;
use prizm_daemon::Daemon;

use crate::output::{render, OutputFormat};

#[derive(Args)]
pub struct ToolArgs {
    /// Tool name, e.g. `prizm_search` or `prizm_terminal_exec`
    pub name: String,
    /// Raw JSON args object, e.g. `{"action":"list"}`
    #[arg(long, default_value = "{}")]
    pub args: String,
}

pub async fn run(daemon: &Daemon, session_id: &str, format: OutputFormat, args: ToolArgs) -> anyhow::Result<()> {
    let raw_args: serde_json::Value = serde_json::from_str(&args.args)?;
    let result = daemon.dispatch(session_id, &args.name, &raw_args).await;
    render(&result, format)
}
