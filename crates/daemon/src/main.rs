//! `prizmd`: opens one scope and keeps it alive, forwarding its event bus
//! to the process log, until asked to stop.
//!
//! There is nothing to connect to: no socket is opened here (§0.1 — daemon
//! transport is a non-goal). This binary exists so a scope can be kept
//! warm — migrations already run, terminals and workflow state already
//! resident — by a process a host application supervises directly rather
//! than re-opening the scope per call.

use std::io::Write;

use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

use prizm_daemon::{env, Daemon, DaemonError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("prizmd {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("prizmd {}", env!("CARGO_PKG_VERSION"));
                println!("Keeps one Prizm scope open and its event bus draining until stopped.");
                println!();
                println!("USAGE:");
                println!("    prizmd");
                println!();
                println!("ENV:");
                println!("    PRIZM_SCOPE_ROOT   workbench directory to open (default: cwd)");
                println!("    PRIZM_STATE_DIR    where prizmd.log is written");
                println!("    RUST_LOG           tracing filter (default: info)");
                return Ok(());
            }
            _ => {
                eprintln!("error: unexpected argument '{arg}'");
                eprintln!("Usage: prizmd [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    let state_dir = env::state_dir()?;
    std::fs::create_dir_all(&state_dir)?;
    let log_path = state_dir.join("prizmd.log");
    let _log_guard = setup_logging(&log_path)?;

    let scope_root = env::scope_root()?;
    info!(scope_root = %scope_root.display(), "opening scope");

    let scope_id = Daemon::scope_id_for(&scope_root);
    let daemon = match Daemon::open(scope_root, scope_id) {
        Ok(d) => d,
        Err(e) => {
            error!(error = %e, "failed to open scope");
            return Err(e.into());
        }
    };

    // Drain the event bus onto the log. `Subscription` is a blocking
    // std::sync::mpsc receiver, so this runs on a dedicated blocking
    // thread rather than the async runtime.
    let events = daemon.subscribe_events("");
    tokio::task::spawn_blocking(move || {
        while let Ok(event) = events.recv() {
            info!(event = event.name(), "event");
        }
    });

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    println!("READY");
    info!("prizmd ready");

    tokio::select! {
        _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
        _ = sigint.recv() => info!("received SIGINT, shutting down"),
    }

    info!("prizmd stopped");
    Ok(())
}

fn setup_logging(log_path: &std::path::Path) -> Result<tracing_appender::non_blocking::WorkerGuard, DaemonError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let parent = log_path.parent().ok_or(DaemonError::NoStateDir)?;
    let file_name = log_path.file_name().ok_or(DaemonError::NoStateDir)?;
    let file_appender = tracing_appender::rolling::never(parent, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let mut pid_line = std::fs::OpenOptions::new().create(true).append(true).open(log_path)?;
    writeln!(pid_line, "--- prizmd: starting (pid: {}) ---", std::process::id())?;

    tracing_subscriber::registry()
        .with(EnvFilter::new(env::log_filter()))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(guard)
}
