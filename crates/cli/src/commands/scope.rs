//! `prizm scope info` — print the open scope's id and data version.

use clap::{Args, Subcommand};
use prizm_daemon::Daemon;

#[derive(Args)]
pub struct ScopeArgs {
    #[command(subcommand)]
    pub command: ScopeCommand,
}

#[derive(Subcommand)]
pub enum ScopeCommand {
    /// Open (creating and migrating if needed) and print its config
    Info,
}

pub fn run(daemon: &Daemon, args: ScopeArgs) -> anyhow::Result<()> {
    match args.command {
        ScopeCommand::Info => {
            let config = daemon.scope().config();
            println!("id: {}", config.id);
            println!("root: {}", daemon.scope().scope_root().display());
            println!("dataVersion: {}", config.data_version);
            if !config.settings.exclude_patterns.is_empty() {
                println!("excludePatterns: {}", config.settings.exclude_patterns.join(", "));
            }
            Ok(())
        }
    }
}
