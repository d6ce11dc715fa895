use super::*;

#[test]
fn first_version_is_one() {
    let v = DocumentVersion::first("Notes", "abc123", 10);
    assert_eq!(v.version, 1);
}

#[test]
fn next_version_increments() {
    let v1 = DocumentVersion::first("Notes", "abc123", 10);
    let v2 = v1.next("Notes", "def456", 20);
    assert_eq!(v2.version, 2);
    assert_eq!(v2.content_hash, "def456");
}
