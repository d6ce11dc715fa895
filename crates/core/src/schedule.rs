//! `ScheduleItem`: a calendar entry (event, reminder, or deadline).

use serde::{Deserialize, Serialize};

use crate::id::ScheduleId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleItemType {
    Event,
    Reminder,
    Deadline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Upcoming,
    Active,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub id: ScheduleId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub item_type: ScheduleItemType,
    pub start_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reminders: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub status: ScheduleStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linked_items: Vec<String>,
}

impl ScheduleItem {
    pub fn new(id: ScheduleId, title: impl Into<String>, item_type: ScheduleItemType, start_time: i64) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            item_type,
            start_time,
            end_time: None,
            all_day: None,
            recurrence: None,
            reminders: Vec::new(),
            tags: Vec::new(),
            status: ScheduleStatus::Upcoming,
            linked_items: Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
