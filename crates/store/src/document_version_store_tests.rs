use super::*;

#[test]
fn save_version_bumps_counter_on_change() {
    let tmp = tempfile::tempdir().unwrap();
    let v1 = save_version(tmp.path(), "d1", "Doc", "line1\nline2", 10, None, None).unwrap();
    assert_eq!(v1.version, 1);

    let v2 = save_version(tmp.path(), "d1", "Doc", "line1\nline2\nline3", 20, None, None).unwrap();
    assert_eq!(v2.version, 2);

    let history = get_version_history(tmp.path(), "d1").unwrap();
    assert_eq!(history.len(), 2);
}

#[test]
fn save_version_same_content_is_noop() {
    let tmp = tempfile::tempdir().unwrap();
    save_version(tmp.path(), "d1", "Doc", "line1", 10, None, None).unwrap();
    let repeat = save_version(tmp.path(), "d1", "Doc", "line1", 20, None, None).unwrap();

    assert_eq!(repeat.version, 1);
    assert_eq!(get_version_history(tmp.path(), "d1").unwrap().len(), 1);
}

#[test]
fn compute_diff_reports_additions_and_stats() {
    let diff = compute_diff("line1\nline2", "line1\nline2\nline3");
    assert!(diff.contains("新增"));
    assert!(diff.contains("line3"));
    assert!(diff.contains("+1 / -0"));
}

#[test]
fn compute_diff_identical_reports_no_change() {
    assert_eq!(compute_diff("same", "same"), "无显著变更");
}

#[test]
fn content_hash_is_sixteen_hex_chars() {
    let hash = content_hash("hello world");
    assert_eq!(hash.len(), 16);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
}
