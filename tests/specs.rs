//! Behavioral specifications for the `prizm` CLI.
//!
//! These tests are black-box: they invoke the CLI binary against a
//! scratch scope directory and verify stdout, stderr, and exit codes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// cli/
#[path = "specs/cli/errors.rs"]
mod cli_errors;
#[path = "specs/cli/help.rs"]
mod cli_help;

// scope/
#[path = "specs/scope/info.rs"]
mod scope_info;

// doc/
#[path = "specs/doc/lifecycle.rs"]
mod doc_lifecycle;

// todo/
#[path = "specs/todo/lifecycle.rs"]
mod todo_lifecycle;

// schedule/
#[path = "specs/schedule/lifecycle.rs"]
mod schedule_lifecycle;

// workflow/
#[path = "specs/workflow/lifecycle.rs"]
mod workflow_lifecycle;
