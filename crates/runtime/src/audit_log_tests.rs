use super::*;

fn record(result: AuditResult) -> AuditRecord {
    AuditRecord {
        timestamp: 1_000,
        tool_name: "prizm_document".to_string(),
        action: AuditAction::Update,
        resource_type: "document".to_string(),
        resource_id: "d1".to_string(),
        resource_title: Some("Hello".to_string()),
        detail: None,
        result,
        error_message: None,
    }
}

#[test]
fn append_then_read_all_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agent-sessions").join("s1").join("audit.jsonl");
    let log = AuditLog::new();

    log.append(&path, &record(AuditResult::Success)).unwrap();
    log.append(&path, &record(AuditResult::Denied)).unwrap();

    let records = log.read_all(&path).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].result, AuditResult::Success);
    assert_eq!(records[1].result, AuditResult::Denied);
}

#[test]
fn read_all_on_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let log = AuditLog::new();
    let records = log.read_all(&dir.path().join("missing.jsonl")).unwrap();
    assert!(records.is_empty());
}

#[test]
fn a_corrupt_line_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("audit.jsonl");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "not json\n").unwrap();

    let log = AuditLog::new();
    log.append(&path, &record(AuditResult::Success)).unwrap();

    let records = log.read_all(&path).unwrap();
    assert_eq!(records.len(), 1);
}

#[test]
fn append_is_append_only_order_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("audit.jsonl");
    let log = AuditLog::new();
    for i in 0..5 {
        let mut r = record(AuditResult::Success);
        r.timestamp = i;
        log.append(&path, &r).unwrap();
    }
    let records = log.read_all(&path).unwrap();
    let timestamps: Vec<i64> = records.iter().map(|r| r.timestamp).collect();
    assert_eq!(timestamps, vec![0, 1, 2, 3, 4]);
}
