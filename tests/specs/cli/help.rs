//! CLI help output specs.
//!
//! Verify help text displays for every subcommand.

use crate::prelude::*;

#[test]
fn no_args_shows_usage_and_fails() {
    Project::empty().cli().fails().stderr_has("Usage:");
}

#[test]
fn help_flag_shows_usage() {
    Project::empty().cli().args(&["--help"]).passes().stdout_has("Usage:");
}

#[test]
fn version_flag_shows_version() {
    Project::empty().cli().args(&["--version"]).passes().stdout_has("0.1");
}

#[test]
fn doc_help_shows_subcommands() {
    Project::empty().cli().args(&["doc", "--help"]).passes().stdout_has("ls").stdout_has("show").stdout_has("write").stdout_has("rm");
}

#[test]
fn workflow_help_shows_subcommands() {
    Project::empty()
        .cli()
        .args(&["workflow", "--help"])
        .passes()
        .stdout_has("register")
        .stdout_has("run")
        .stdout_has("resume");
}
