use super::*;
use crate::support::fixture;
use serde_json::json;

#[test]
fn create_list_then_add_items() {
    let fx = fixture();
    let ctx = fx.ctx();

    let created = dispatch(&ctx, &json!({"action": "create_list", "title": "Groceries"}));
    assert!(!created.is_error, "{}", created.text);
    let list_id = created.structured_data.unwrap();

    let added = dispatch(&ctx, &json!({"action": "add_items", "listId": list_id, "titles": ["milk", "eggs"]}));
    assert!(!added.is_error);
    assert_eq!(added.text, "Groceries now has 2 item(s)");
}

#[test]
fn update_item_changes_status() {
    let fx = fixture();
    let ctx = fx.ctx();
    let created = dispatch(&ctx, &json!({"action": "create_list", "title": "Groceries"}));
    let list_id = created.structured_data.unwrap();
    dispatch(&ctx, &json!({"action": "add_items", "listId": list_id, "titles": ["milk"]}));

    let list = todo_service::list(&ctx.env).unwrap().into_iter().next().unwrap();
    let item_id = list.items[0].id.as_str().to_string();

    let updated = dispatch(&ctx, &json!({"action": "update_item", "listId": list_id, "itemId": item_id, "status": "done"}));
    assert!(!updated.is_error, "{}", updated.text);

    let list = todo_service::get(&ctx.env, &list_id).unwrap();
    assert_eq!(list.items[0].status, TodoStatus::Done);
}

#[test]
fn unknown_status_is_rejected() {
    let fx = fixture();
    let ctx = fx.ctx();
    let created = dispatch(&ctx, &json!({"action": "create_list", "title": "Groceries"}));
    let list_id = created.structured_data.unwrap();
    dispatch(&ctx, &json!({"action": "add_items", "listId": list_id, "titles": ["milk"]}));
    let list = todo_service::get(&ctx.env, &list_id).unwrap();
    let item_id = list.items[0].id.as_str().to_string();

    let result = dispatch(&ctx, &json!({"action": "update_item", "listId": list_id, "itemId": item_id, "status": "frozen"}));
    assert!(result.is_error);
    assert!(result.text.starts_with("[INVALID_INPUT]"));
}

#[test]
fn delete_item_removes_it_from_the_list() {
    let fx = fixture();
    let ctx = fx.ctx();
    let created = dispatch(&ctx, &json!({"action": "create_list", "title": "Groceries"}));
    let list_id = created.structured_data.unwrap();
    dispatch(&ctx, &json!({"action": "add_items", "listId": list_id, "titles": ["milk"]}));
    let list = todo_service::get(&ctx.env, &list_id).unwrap();
    let item_id = list.items[0].id.as_str().to_string();

    let result = dispatch(&ctx, &json!({"action": "delete_item", "listId": list_id, "itemId": item_id}));
    assert!(!result.is_error);

    let list = todo_service::get(&ctx.env, &list_id).unwrap();
    assert!(list.items.is_empty());
}
