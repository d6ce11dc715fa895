use super::*;

#[test]
fn total_is_sum_of_input_and_output() {
    let rec = TokenUsageRecord::new("t1", UsageScope::Chat, 0, "gpt", 100, 50);
    assert_eq!(rec.total_tokens, 150);
}
