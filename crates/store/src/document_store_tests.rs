use super::*;
use prizm_core::DocumentId;

#[test]
fn write_then_read_by_id() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = MetadataCache::new(tmp.path(), &[]);
    let mut doc = Document::new(DocumentId::new("d1"), "My Notes", "", 10);
    doc.body = "# hello".into();

    let written = write(tmp.path(), &cache, doc).unwrap();
    assert_eq!(written.relative_path, "My Notes.md");

    let found = read_by_id(tmp.path(), &cache, "d1").unwrap().unwrap();
    assert_eq!(found.title, "My Notes");
    assert_eq!(found.body, "# hello");
}

#[test]
fn rewriting_with_new_title_relocates_file() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = MetadataCache::new(tmp.path(), &[]);
    let doc = Document::new(DocumentId::new("d1"), "Old Title", "", 10);
    write(tmp.path(), &cache, doc).unwrap();

    let mut renamed = read_by_id(tmp.path(), &cache, "d1").unwrap().unwrap();
    renamed.title = "New Title".into();
    let written = write(tmp.path(), &cache, renamed).unwrap();

    assert_eq!(written.relative_path, "New Title.md");
    assert!(!tmp.path().join("Old Title.md").exists());
}

#[test]
fn read_all_sorts_by_created_at() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = MetadataCache::new(tmp.path(), &[]);
    write(tmp.path(), &cache, Document::new(DocumentId::new("d2"), "Second", "", 20)).unwrap();
    write(tmp.path(), &cache, Document::new(DocumentId::new("d1"), "First", "", 10)).unwrap();

    let all = read_all(tmp.path(), &cache).unwrap();
    assert_eq!(all.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(), vec!["d1", "d2"]);
}

#[test]
fn delete_removes_file_and_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = MetadataCache::new(tmp.path(), &[]);
    write(tmp.path(), &cache, Document::new(DocumentId::new("d1"), "Gone", "", 10)).unwrap();

    delete(tmp.path(), &cache, "d1").unwrap();
    delete(tmp.path(), &cache, "d1").unwrap();
    assert!(read_by_id(tmp.path(), &cache, "d1").unwrap().is_none());
}
