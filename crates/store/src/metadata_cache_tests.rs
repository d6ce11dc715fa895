use super::*;
use std::fs;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn scan_finds_md_files_and_skips_system_dirs() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(root, "notes.md", "# hi");
    write(root, "sub/more.md", "# more");
    write(root, ".prizm/scope.json", "{}");
    write(root, "node_modules/pkg/readme.md", "nope");

    let cache = MetadataCache::new(root, &[]);
    let mut found: Vec<_> = cache.scan().unwrap();
    found.sort();
    assert_eq!(
        found,
        vec![PathBuf::from("notes.md"), PathBuf::from("sub/more.md")]
    );
}

#[test]
fn exclude_patterns_are_honored() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(root, "keep.md", "keep");
    write(root, "drafts/skip.md", "skip");

    let cache = MetadataCache::new(root, &["drafts/**".to_string()]);
    let found = cache.scan().unwrap();
    assert_eq!(found, vec![PathBuf::from("keep.md")]);
}

#[test]
fn scan_is_cached_until_invalidated() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(root, "a.md", "a");

    let cache = MetadataCache::new(root, &[]);
    assert_eq!(cache.scan().unwrap().len(), 1);

    write(root, "b.md", "b");
    assert_eq!(cache.scan().unwrap().len(), 1, "stale cache still returns old scan");

    cache.invalidate();
    assert_eq!(cache.scan().unwrap().len(), 2);
}
