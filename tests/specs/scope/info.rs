//! `prizm scope info` specs.

use crate::prelude::*;

#[test]
fn info_prints_id_and_root_on_first_open() {
    let project = Project::empty();
    project.cli().args(&["scope", "info"]).passes().stdout_has("id:").stdout_has("root:").stdout_has("dataVersion:");
}

#[test]
fn reopening_keeps_the_same_scope_id() {
    let project = Project::empty();
    let first = project.cli().args(&["scope", "info"]).passes().stdout();
    let second = project.cli().args(&["scope", "info"]).passes().stdout();
    assert_eq!(first, second);
}
