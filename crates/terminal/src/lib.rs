// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! prizm-terminal: `TerminalSessionManager` (§4.14) — exec and interactive
//! terminal sessions an agent tool call can spawn against.
//!
//! Exec sessions are request/response: spawn, wait up to a bound, collect
//! output. Interactive sessions are long-lived tmux panes an agent drives
//! with repeated `send_keys` calls, the way a human would type into a
//! terminal and look at the screen between keystrokes.

mod ansi;
mod exec;
mod manager;

pub use ansi::strip_ansi;
pub use exec::{exec, ExecOutcome, DEFAULT_EXEC_TIMEOUT, MAX_EXEC_TIMEOUT};
pub use manager::{SendKeysOutcome, TerminalError, TerminalManager, TerminalResult};
