//! `prizm doc {ls,show,write,rm}` — thin wrapper over the `prizm_document`
//! builtin tool.

use clap::{Args, Subcommand};
use prizm_daemon::Daemon;
use serde_json::json;

use crate::output::{render, OutputFormat};

#[derive(Args)]
pub struct DocArgs {
    #[command(subcommand)]
    pub command: DocCommand,
}

#[derive(Subcommand)]
pub enum DocCommand {
    /// List documents
    Ls,
    /// Print one document's body
    Show { id: String },
    /// Create or update a document
    Write {
        /// Existing document id to update; omit to create a new one
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        title: Option<String>,
        /// Body text; reads from stdin when omitted
        #[arg(long)]
        body: Option<String>,
    },
    /// Delete a document
    Rm { id: String },
}

pub async fn run(daemon: &Daemon, session_id: &str, format: OutputFormat, args: DocArgs) -> anyhow::Result<()> {
    let call = match args.command {
        DocCommand::Ls => json!({"action": "list"}),
        DocCommand::Show { id } => json!({"action": "read", "id": id}),
        DocCommand::Write { id, title, body } => {
            let body = match body {
                Some(b) => b,
                None => std::io::read_to_string(std::io::stdin())?,
            };
            match id {
                Some(id) => json!({"action": "update", "id": id, "title": title, "body": body}),
                None => json!({"action": "create", "title": title.unwrap_or_default(), "body": body}),
            }
        }
        DocCommand::Rm { id } => json!({"action": "delete", "id": id}),
    };
    let result = daemon.dispatch(session_id, "prizm_document", &call).await;
    render(&result, format)
}
