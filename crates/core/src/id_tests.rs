use super::*;

define_id! {
    #[derive(Default)]
    pub struct TestId;
}

#[test]
fn display_and_as_str_agree() {
    let id = TestId::new("doc-1");
    assert_eq!(id.as_str(), "doc-1");
    assert_eq!(id.to_string(), "doc-1");
}

#[test]
fn short_truncates_when_longer() {
    let id = TestId::new("0123456789abcdef");
    assert_eq!(id.short(8), "01234567");
}

#[test]
fn short_is_noop_when_shorter() {
    let id = TestId::new("abc");
    assert_eq!(id.short(8), "abc");
}

#[test]
fn equality_against_str_and_borrow() {
    let id = TestId::new("x");
    assert_eq!(id, "x");
    assert_eq!(id, *"x".to_string().as_str());
    let set: std::collections::HashSet<TestId> = [TestId::new("a"), TestId::new("b")].into();
    assert!(set.contains("a"));
}

#[test]
fn sequential_id_gen_increments() {
    let gen = SequentialIdGen::new("doc");
    assert_eq!(gen.next(), "doc-1");
    assert_eq!(gen.next(), "doc-2");
}

#[test]
fn uuid_id_gen_produces_distinct_ids() {
    let gen = UuidIdGen;
    assert_ne!(gen.next(), gen.next());
}
