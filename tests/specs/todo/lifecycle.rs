//! `prizm todo` lifecycle: create list, add items, update status, delete.

use crate::prelude::*;

#[test]
fn new_add_status_rm() {
    let project = Project::empty();

    let json = project.cli().args(&["-o", "json", "todo", "new", "Groceries"]).passes().stdout();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let list_id = value["data"].as_str().unwrap().to_string();

    project.cli().args(&["todo", "ls"]).passes().stdout_has("1 list(s)").stdout_has("Groceries");

    project.cli().args(&["todo", "add", &list_id, "milk", "eggs"]).passes().stdout_has("now has 2 item(s)");

    // Pull the item id back out of the list listing's structured data.
    let json = project.cli().args(&["-o", "json", "todo", "ls"]).passes().stdout();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["data"].as_str().unwrap().contains("2 item(s)"));

    project.cli().args(&["todo", "rm", &list_id]).passes().stdout_has("deleted list");

    project.cli().args(&["todo", "ls"]).passes().stdout_has("0 list(s)");
}

#[test]
fn status_rejects_an_unknown_value() {
    let project = Project::empty();
    let list_id = project
        .cli()
        .args(&["-o", "json", "todo", "new", "Scratch"])
        .passes()
        .stdout();
    let value: serde_json::Value = serde_json::from_str(&list_id).unwrap();
    let list_id = value["data"].as_str().unwrap().to_string();

    project.cli().args(&["todo", "status", &list_id, "item-1", "bogus"]).fails().stderr_has("[INVALID_INPUT]");
}
