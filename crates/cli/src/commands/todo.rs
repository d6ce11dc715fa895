//! `prizm todo {ls,new,add,done,rm}` — thin wrapper over the `prizm_todo`
//! builtin tool.

use clap::{Args, Subcommand};
use prizm_daemon::Daemon;
use serde_json::json;

use crate::output::{render, OutputFormat};

#[derive(Args)]
pub struct TodoArgs {
    #[command(subcommand)]
    pub command: TodoCommand,
}

#[derive(Subcommand)]
pub enum TodoCommand {
    /// List todo lists
    Ls,
    /// Create a new list
    New { title: String },
    /// Delete a list
    Rm { list_id: String },
    /// Add items to a list
    Add {
        list_id: String,
        /// Item titles, one per argument
        titles: Vec<String>,
    },
    /// Mark an item's status (todo, doing, done)
    Status { list_id: String, item_id: String, status: String },
}

pub async fn run(daemon: &Daemon, session_id: &str, format: OutputFormat, args: TodoArgs) -> anyhow::Result<()> {
    let call = match args.command {
        TodoCommand::Ls => json!({"action": "list"}),
        TodoCommand::New { title } => json!({"action": "create_list", "title": title}),
        TodoCommand::Rm { list_id } => json!({"action": "delete_list", "listId": list_id}),
        TodoCommand::Add { list_id, titles } => json!({"action": "add_items", "listId": list_id, "titles": titles}),
        TodoCommand::Status { list_id, item_id, status } => {
            json!({"action": "update_item", "listId": list_id, "itemId": item_id, "status": status})
        }
    };
    let result = daemon.dispatch(session_id, "prizm_todo", &call).await;
    render(&result, format)
}
