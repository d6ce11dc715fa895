use super::*;
use prizm_core::{MessageRole, SessionId, SessionMessage};

#[test]
fn write_then_read_round_trips() {
    let tmp = tempfile::tempdir().unwrap();
    let mut session = AgentSession::new(SessionId::new("s1"), "main", 10);
    session.push_message(SessionMessage::new("m1", MessageRole::User, "hi", 11));

    write(tmp.path(), &session).unwrap();

    let found = read_by_id(tmp.path(), "s1").unwrap().unwrap();
    assert_eq!(found.messages.len(), 1);
    assert_eq!(found.messages[0].content, "hi");
}

#[test]
fn legacy_directory_layout_is_read_and_migrated() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join(".prizm/agent-sessions/s1");
    std::fs::create_dir_all(dir.join("messages")).unwrap();
    std::fs::write(
        dir.join("meta.md"),
        "---\nid: s1\nscope: main\ncreatedAt: 10\nupdatedAt: 10\n---\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("messages/0001.md"),
        "---\nid: m1\nrole: user\ncontent: legacy hi\ncreatedAt: 11\n---\n",
    )
    .unwrap();

    assert!(is_legacy(tmp.path(), "s1"));
    let found = read_by_id(tmp.path(), "s1").unwrap().unwrap();
    assert_eq!(found.messages.len(), 1);
    assert_eq!(found.messages[0].content, "legacy hi");

    write(tmp.path(), &found).unwrap();
    assert!(!dir.join("meta.md").exists());
    assert!(!is_legacy(tmp.path(), "s1"));
    assert!(read_by_id(tmp.path(), "s1").unwrap().is_some());
}

#[test]
fn delete_removes_session_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let session = AgentSession::new(SessionId::new("s1"), "main", 10);
    write(tmp.path(), &session).unwrap();

    delete(tmp.path(), "s1").unwrap();
    assert!(read_by_id(tmp.path(), "s1").unwrap().is_none());
}
