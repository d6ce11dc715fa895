use super::*;
use prizm_core::{ClipboardItemId, ClipboardItemType};

#[test]
fn write_then_read_by_id() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = MetadataCache::new(tmp.path(), &[]);
    let mut item = ClipboardItem::new(ClipboardItemId::new("c1"), ClipboardItemType::Text, 10);
    item.body = "hello clipboard".into();

    write(tmp.path(), item).unwrap();

    let found = read_by_id(tmp.path(), &cache, "c1").unwrap().unwrap();
    assert_eq!(found.body, "hello clipboard");
}

#[test]
fn rewrite_does_not_relocate() {
    let tmp = tempfile::tempdir().unwrap();
    let item = ClipboardItem::new(ClipboardItemId::new("c1"), ClipboardItemType::Text, 10);
    write(tmp.path(), item.clone()).unwrap();
    write(tmp.path(), item).unwrap();

    assert!(tmp.path().join(".prizm/clipboard/c1.md").exists());
}

#[test]
fn delete_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = MetadataCache::new(tmp.path(), &[]);
    let item = ClipboardItem::new(ClipboardItemId::new("c1"), ClipboardItemType::Text, 10);
    write(tmp.path(), item).unwrap();

    delete(tmp.path(), "c1").unwrap();
    delete(tmp.path(), "c1").unwrap();
    assert!(read_by_id(tmp.path(), &cache, "c1").unwrap().is_none());
}
