//! `prizm schedule {ls,show,new,rm}` — thin wrapper over the
//! `prizm_schedule` builtin tool.

use clap::{Args, Subcommand};
use prizm_daemon::Daemon;
use serde_json::json;

use crate::output::{render, OutputFormat};

#[derive(Args)]
pub struct ScheduleArgs {
    #[command(subcommand)]
    pub command: ScheduleCommand,
}

#[derive(Subcommand)]
pub enum ScheduleCommand {
    /// List schedule items
    Ls,
    /// Show one item
    Show { id: String },
    /// Create an item (event, reminder, or deadline)
    New {
        title: String,
        /// Start time, epoch milliseconds
        start_time: i64,
        #[arg(long = "type", default_value = "event")]
        item_type: String,
        #[arg(long)]
        recurrence: Option<String>,
    },
    /// Delete an item
    Rm { id: String },
}

pub async fn run(daemon: &Daemon, session_id: &str, format: OutputFormat, args: ScheduleArgs) -> anyhow::Result<()> {
    let call = match args.command {
        ScheduleCommand::Ls => json!({"action": "list"}),
        ScheduleCommand::Show { id } => json!({"action": "read", "id": id}),
        ScheduleCommand::New { title, start_time, item_type, recurrence } => {
            json!({"action": "create", "title": title, "startTime": start_time, "type": item_type, "recurrence": recurrence})
        }
        ScheduleCommand::Rm { id } => json!({"action": "delete", "id": id}),
    };
    let result = daemon.dispatch(session_id, "prizm_schedule", &call).await;
    render(&result, format)
}
