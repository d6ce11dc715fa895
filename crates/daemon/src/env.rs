//! Centralized environment variable access for the daemon binary.

use std::path::PathBuf;

use crate::DaemonError;

/// Resolve the state directory (daemon log lives here): `PRIZM_STATE_DIR` >
/// `XDG_STATE_HOME/prizm` > `~/.local/state/prizm`.
pub fn state_dir() -> Result<PathBuf, DaemonError> {
    if let Ok(dir) = std::env::var("PRIZM_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("prizm"));
    }
    let home = std::env::var("HOME").map_err(|_| DaemonError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/prizm"))
}

/// The workbench directory this daemon instance opens as a scope.
/// `PRIZM_SCOPE_ROOT` if set, otherwise the current directory.
pub fn scope_root() -> Result<PathBuf, DaemonError> {
    if let Ok(dir) = std::env::var("PRIZM_SCOPE_ROOT") {
        return Ok(PathBuf::from(dir));
    }
    std::env::current_dir().map_err(|_| DaemonError::NoStateDir)
}

/// `RUST_LOG`-style filter override for the installed subscriber, falling
/// back to `info` when unset.
pub fn log_filter() -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
}
