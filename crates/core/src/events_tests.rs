use super::*;

#[test]
fn name_matches_serialized_type_tag() {
    let event = Event::DocumentCreated {
        id: DocumentId::new("d1"),
        relative_path: "notes.md".into(),
    };
    let v = serde_json::to_value(&event).expect("serialize");
    assert_eq!(v.get("type").unwrap(), event.name());
}

#[test]
fn topic_prefix_groups_by_family() {
    let event = Event::TodoListCreated { id: TodoListId::new("l1") };
    assert_eq!(event.topic_prefix(), "todo:");
}

#[test]
fn lock_changed_flattens_resource_ref() {
    let event = Event::ResourceLockChanged {
        action: LockAction::Acquired,
        resource: ResourceRef::new(ResourceType::Document, "d1"),
        session_id: SessionId::new("s1"),
        reason: None,
    };
    let v = serde_json::to_value(&event).expect("serialize");
    assert_eq!(v.get("resourceType").unwrap(), "document");
    assert_eq!(v.get("resourceId").unwrap(), "d1");
    assert_eq!(event.resource_type(), Some(ResourceType::Document));
}
