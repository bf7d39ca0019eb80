//! Per-user calendar preferences.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// Calendar layout granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Month,
    Week,
    Day,
}

/// Working-hours window shown emphasized in week/day views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// A user's calendar preferences. Singleton per user: defaulted at
/// first load, fetched once from the store, pushed back on change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarSettings {
    pub default_view: ViewMode,
    /// 0 = Sunday .. 6 = Saturday.
    pub first_day_of_week: u8,
    pub show_week_numbers: bool,
    pub notifications_enabled: bool,
    /// Default notification lead time in minutes for new events.
    pub default_notification_time: i64,
    /// IANA time zone identifier, e.g. "Europe/Stockholm".
    pub time_zone: String,
    pub working_hours: WorkingHours,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        CalendarSettings {
            default_view: ViewMode::Month,
            first_day_of_week: 0,
            show_week_numbers: false,
            notifications_enabled: true,
            default_notification_time: 30,
            time_zone: "UTC".to_string(),
            working_hours: WorkingHours {
                start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            },
        }
    }
}

impl CalendarSettings {
    /// The configured first day of the week as a `Weekday`.
    pub fn first_weekday(&self) -> Weekday {
        match self.first_day_of_week % 7 {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            _ => Weekday::Sat,
        }
    }

    /// Parse the time zone identifier, rejecting unknown names.
    pub fn timezone(&self) -> Result<chrono_tz::Tz, ValidationError> {
        chrono_tz::Tz::from_str(&self.time_zone)
            .map_err(|_| ValidationError::UnknownTimeZone(self.time_zone.clone()))
    }

    /// Check the fields a user can get wrong through the settings form.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.first_day_of_week > 6 {
            return Err(ValidationError::BadFirstDayOfWeek(self.first_day_of_week));
        }
        if self.default_notification_time < 0 {
            return Err(ValidationError::NegativeLeadTime);
        }
        self.timezone()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = CalendarSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.default_view, ViewMode::Month);
        assert_eq!(settings.first_weekday(), Weekday::Sun);
    }

    #[test]
    fn first_weekday_maps_all_seven_days() {
        let mut settings = CalendarSettings::default();
        let expected = [
            Weekday::Sun,
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ];
        for (dow, want) in expected.iter().enumerate() {
            settings.first_day_of_week = dow as u8;
            assert_eq!(settings.first_weekday(), *want);
        }
    }

    #[test]
    fn rejects_out_of_range_first_day() {
        let settings = CalendarSettings {
            first_day_of_week: 7,
            ..Default::default()
        };
        assert_eq!(
            settings.validate(),
            Err(ValidationError::BadFirstDayOfWeek(7))
        );
    }

    #[test]
    fn rejects_unknown_time_zone() {
        let settings = CalendarSettings {
            time_zone: "Mars/Olympus_Mons".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::UnknownTimeZone(_))
        ));
    }

    #[test]
    fn view_mode_uses_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&ViewMode::Month).unwrap(), "\"month\"");
        assert_eq!(
            serde_json::from_str::<ViewMode>("\"week\"").unwrap(),
            ViewMode::Week
        );
    }
}
