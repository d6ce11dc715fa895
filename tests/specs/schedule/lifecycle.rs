//! `prizm schedule` lifecycle: create, list, read, delete.

use crate::prelude::*;

#[test]
fn new_ls_show_rm() {
    let project = Project::empty();

    let json = project
        .cli()
        .args(&["-o", "json", "schedule", "new", "Team standup", "1000", "--type", "event"])
        .passes()
        .stdout();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let id = value["data"].as_str().unwrap().to_string();

    project.cli().args(&["schedule", "ls"]).passes().stdout_has("1 item(s)").stdout_has("Team standup");

    project.cli().args(&["schedule", "show", &id]).passes().stdout_has("Team standup at 1000");

    project.cli().args(&["schedule", "rm", &id]).passes().stdout_has("deleted");

    project.cli().args(&["schedule", "show", &id]).fails().stderr_has("[NOT_FOUND]");
}

#[test]
fn unknown_item_type_is_rejected() {
    let project = Project::empty();
    project
        .cli()
        .args(&["schedule", "new", "Oddity", "1000", "--type", "bogus"])
        .fails()
        .stderr_has("[INVALID_INPUT]");
}
