//! CLI error handling specs.

use crate::prelude::*;

#[test]
fn unknown_subcommand_is_rejected() {
    Project::empty().cli().args(&["bogus"]).fails().stderr_has("error:");
}

#[test]
fn doc_show_without_id_is_rejected() {
    Project::empty().cli().args(&["doc", "show"]).fails().stderr_has("required");
}

#[test]
fn reading_a_missing_document_fails() {
    let project = Project::empty();
    project.cli().args(&["doc", "show", "nope"]).fails().stderr_has("[NOT_FOUND]");
}
