//! Date range for filtering events.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Half-open UTC range `[from, to)` used for cache loads and view spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        DateRange { from, to }
    }

    /// Range covering `count` whole days starting at midnight of `first`.
    pub fn days(first: NaiveDate, count: i64) -> Self {
        let from = first.and_time(NaiveTime::MIN).and_utc();
        DateRange {
            from,
            to: from + Duration::days(count),
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant < self.to
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.contains(date.and_time(NaiveTime::MIN).and_utc())
    }

    /// RFC3339 bounds for store query parameters.
    pub fn from_rfc3339(&self) -> String {
        self.from.to_rfc3339()
    }

    pub fn to_rfc3339(&self) -> String {
        self.to.to_rfc3339()
    }
}
