use super::*;

#[test]
fn new_document_has_matching_created_and_updated() {
    let doc = Document::new(DocumentId::new("d1"), "Notes", "notes.md", 100);
    assert_eq!(doc.created_at, doc.updated_at);
    assert!(doc.tags.is_empty());
    assert!(doc.llm_summary.is_none());
}

#[test]
fn serializes_with_camel_case_keys() {
    let doc = Document::new(DocumentId::new("d1"), "Notes", "notes.md", 100);
    let v = serde_json::to_value(&doc).expect("serialize");
    assert!(v.get("relativePath").is_some());
    assert!(v.get("createdAt").is_some());
    assert!(v.get("body").is_none());
}
