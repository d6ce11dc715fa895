//! prizm — thin operator CLI over the builtin tool dispatcher, for local
//! debugging (`scope info`, `doc ls`, `workflow run`, …). Not a client of
//! `prizmd`: there is no transport to speak to (§0.1), so this opens its
//! own [`prizm_daemon::Daemon`] against the same scope directory a
//! long-running `prizmd` would, migrations included.

mod commands;
mod output;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use prizm_daemon::Daemon;

use commands::{doc, schedule, scope, todo, tool, workflow};
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "prizm", version, about = "Prizm workbench engine — operator CLI")]
struct Cli {
    /// Scope root directory (default: $PRIZM_SCOPE_ROOT, else cwd)
    #[arg(short = 'C', long = "scope-root", global = true)]
    scope_root: Option<PathBuf>,

    /// Session id attributed to audit records this invocation writes
    #[arg(long = "session", global = true, default_value = "cli")]
    session: String,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scope info
    Scope(scope::ScopeArgs),
    /// Document operations
    Doc(doc::DocArgs),
    /// Todo list operations
    Todo(todo::TodoArgs),
    /// Schedule operations
    Schedule(schedule::ScheduleArgs),
    /// Workflow run lifecycle
    Workflow(workflow::WorkflowArgs),
    /// Call any builtin tool by name
    Tool(tool::ToolArgs),
}

/// Exposed for parse-only tests, the same shape the reference CLI uses.
fn cli_command() -> clap::Command {
    Cli::command()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let scope_root = match cli.scope_root {
        Some(dir) => dir,
        None => prizm_daemon::env::scope_root()?,
    };
    let scope_id = Daemon::scope_id_for(&scope_root);
    let daemon = Daemon::open(scope_root, scope_id)?;

    match cli.command {
        Commands::Scope(args) => scope::run(&daemon, args),
        Commands::Doc(args) => doc::run(&daemon, &cli.session, cli.output, args).await,
        Commands::Todo(args) => todo::run(&daemon, &cli.session, cli.output, args).await,
        Commands::Schedule(args) => schedule::run(&daemon, &cli.session, cli.output, args).await,
        Commands::Workflow(args) => workflow::run(&daemon, &cli.session, cli.output, args).await,
        Commands::Tool(args) => tool::run(&daemon, &cli.session, cli.output, args).await,
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
