//! `prizm workflow {register,run,resume,cancel,status,list,list-defs}` —
//! thin wrapper over the `prizm_workflow` builtin tool.

use std::collections::HashMap;

use clap::{Args, Subcommand};
use prizm_daemon::Daemon;
use serde_json::json;

use crate::output::{render, OutputFormat};

#[derive(Args)]
pub struct WorkflowArgs {
    #[command(subcommand)]
    pub command: WorkflowCommand,
}

/// Parse `key=value` pairs, e.g. run arguments passed on the command line.
fn parse_kv_pairs(pairs: &[String]) -> HashMap<String, String> {
    pairs
        .iter()
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[derive(Subcommand)]
pub enum WorkflowCommand {
    /// Register a workflow definition from a YAML file
    Register {
        /// Path to the workflow's YAML definition
        path: std::path::PathBuf,
    },
    /// Start a run
    Run {
        workflow_name: String,
        /// `key=value` run arguments, repeatable
        args: Vec<String>,
    },
    /// Resume a run awaiting approval
    Resume {
        workflow_name: String,
        run_id: String,
        token: String,
        #[arg(long, default_value_t = true)]
        approved: bool,
    },
    /// Cancel a run
    Cancel { workflow_name: String, run_id: String },
    /// Show a run's current status
    Status { workflow_name: String, run_id: String },
    /// List runs of a workflow
    List { workflow_name: String },
    /// List every registered workflow definition
    ListDefs,
}

pub async fn run(daemon: &Daemon, session_id: &str, format: OutputFormat, args: WorkflowArgs) -> anyhow::Result<()> {
    let call = match args.command {
        WorkflowCommand::Register { path } => {
            let yaml = std::fs::read_to_string(&path)?;
            json!({"action": "register", "definition": yaml})
        }
        WorkflowCommand::Run { workflow_name, args } => {
            json!({"action": "run", "workflowName": workflow_name, "args": parse_kv_pairs(&args)})
        }
        WorkflowCommand::Resume { workflow_name, run_id, token, approved } => {
            json!({"action": "resume", "workflowName": workflow_name, "runId": run_id, "token": token, "approved": approved})
        }
        WorkflowCommand::Cancel { workflow_name, run_id } => {
            json!({"action": "cancel", "workflowName": workflow_name, "runId": run_id})
        }
        WorkflowCommand::Status { workflow_name, run_id } => {
            json!({"action": "status", "workflowName": workflow_name, "runId": run_id})
        }
        WorkflowCommand::List { workflow_name } => json!({"action": "list", "workflowName": workflow_name}),
        WorkflowCommand::ListDefs => json!({"action": "list_defs"}),
    };
    let result = daemon.dispatch(session_id, "prizm_workflow", &call).await;
    render(&result, format)
}
