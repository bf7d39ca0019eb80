//! Store-neutral calendar event type.
//!
//! The subsystem works exclusively with this type: the cache holds it,
//! the view renderers project it, and the store client converts it to
//! and from the wire payloads in `protocol`.

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// A single-instance calendar event owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start: DateTime<Utc>,
    /// End instant, always >= `start`.
    pub end: DateTime<Utc>,
    /// When set, time-of-day components are ignored for display.
    #[serde(default)]
    pub is_all_day: bool,
    /// Display-only notification flag. Delivery is not scheduled here.
    #[serde(default)]
    pub notification: bool,
    /// Notification lead time in minutes (display only).
    #[serde(default)]
    pub notification_time: i64,
    pub user_id: String,
}

impl Event {
    /// Calendar date the event starts on.
    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Hour-of-day the event starts in (minutes ignored).
    pub fn start_hour(&self) -> u32 {
        self.start.hour()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_test_event() -> Event {
        Event {
            id: "ev-1".to_string(),
            title: "Standup".to_string(),
            description: None,
            location: None,
            start: Utc.with_ymd_and_hms(2024, 6, 10, 9, 30, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 6, 10, 10, 0, 0).unwrap(),
            is_all_day: false,
            notification: false,
            notification_time: 0,
            user_id: "u-1".to_string(),
        }
    }

    #[test]
    fn start_hour_ignores_minutes() {
        let event = make_test_event();
        assert_eq!(event.start_hour(), 9);
        assert_eq!(event.start_date(), NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
    }

    #[test]
    fn duration_spans_start_to_end() {
        let event = make_test_event();
        assert_eq!(event.duration(), Duration::minutes(30));
    }

    #[test]
    fn serializes_with_camel_case_wire_keys() {
        let json = serde_json::to_value(make_test_event()).unwrap();
        assert!(json.get("isAllDay").is_some(), "missing isAllDay: {json}");
        assert!(json.get("notificationTime").is_some());
        assert!(json.get("userId").is_some());
        // Absent optionals are omitted, not null
        assert!(json.get("description").is_none());
    }
}
