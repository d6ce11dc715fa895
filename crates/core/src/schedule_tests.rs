use super::*;

#[test]
fn new_item_defaults_to_upcoming() {
    let item = ScheduleItem::new(ScheduleId::new("e1"), "Launch", ScheduleItemType::Event, 1_000);
    assert_eq!(item.status, ScheduleStatus::Upcoming);
    assert!(item.reminders.is_empty());
}

#[test]
fn type_field_renames_in_json() {
    let item = ScheduleItem::new(ScheduleId::new("e1"), "Launch", ScheduleItemType::Deadline, 1_000);
    let v = serde_json::to_value(&item).expect("serialize");
    assert_eq!(v.get("type").unwrap(), "deadline");
}
