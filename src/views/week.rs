//! Week grid renderer.
//!
//! Seven consecutive days starting at the configured first day of the
//! week, each subdivided into 24 hourly slots.

use chrono::{Duration, NaiveDate};

use calgrid_core::{CalendarSettings, DateRange, Event, ViewMode};

use super::{hour_slots, week_start, CalendarView, HourSlot, Layout};
use crate::config::GridConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub slots: Vec<HourSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekLayout {
    pub days: Vec<DayColumn>,
}

pub struct WeekView;

impl CalendarView for WeekView {
    fn mode(&self) -> ViewMode {
        ViewMode::Week
    }

    fn span(&self, selected: NaiveDate, settings: &CalendarSettings) -> DateRange {
        DateRange::days(week_start(selected, settings.first_weekday()), 7)
    }

    fn render(
        &self,
        events: &[Event],
        selected: NaiveDate,
        settings: &CalendarSettings,
        _config: &GridConfig,
    ) -> Layout {
        let start = week_start(selected, settings.first_weekday());
        let days = (0..7)
            .map(|offset| {
                let date = start + Duration::days(offset);
                DayColumn {
                    date,
                    slots: hour_slots(events, date),
                }
            })
            .collect();

        Layout::Week(WeekLayout { days })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::make_event;
    use chrono::{Datelike, TimeZone, Utc};

    fn render_week(events: &[Event], selected: NaiveDate, settings: &CalendarSettings) -> WeekLayout {
        match WeekView.render(events, selected, settings, &GridConfig::default()) {
            Layout::Week(layout) => layout,
            other => panic!("expected week layout, got {other:?}"),
        }
    }

    #[test]
    fn week_has_seven_days_of_24_slots_from_configured_start() {
        let settings = CalendarSettings {
            first_day_of_week: 1, // Monday
            ..Default::default()
        };
        let selected = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(); // Wednesday
        let layout = render_week(&[], selected, &settings);

        assert_eq!(layout.days.len(), 7);
        assert_eq!(layout.days[0].date, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        assert_eq!(layout.days[0].date.weekday(), chrono::Weekday::Mon);
        for day in &layout.days {
            assert_eq!(day.slots.len(), 24);
            for (hour, slot) in day.slots.iter().enumerate() {
                assert_eq!(slot.hour, hour as u32);
            }
        }
    }

    #[test]
    fn event_lands_in_its_start_hour_slot_minutes_ignored() {
        let event = make_event(
            "E1",
            "Review",
            Utc.with_ymd_and_hms(2024, 6, 12, 14, 45, 0).unwrap(),
            30,
        );
        let layout = render_week(
            std::slice::from_ref(&event),
            NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
            &CalendarSettings::default(),
        );

        let wednesday = layout
            .days
            .iter()
            .find(|d| d.date == NaiveDate::from_ymd_opt(2024, 6, 12).unwrap())
            .unwrap();
        assert_eq!(wednesday.slots[14].events.len(), 1);
        assert_eq!(wednesday.slots[14].events[0].time_label.as_deref(), Some("14:45"));
        assert!(wednesday.slots[15].events.is_empty(), "no spill into later slots");
    }

    #[test]
    fn events_outside_the_week_are_not_placed() {
        let event = make_event(
            "E1",
            "Elsewhere",
            Utc.with_ymd_and_hms(2024, 6, 20, 9, 0, 0).unwrap(),
            30,
        );
        let layout = render_week(
            std::slice::from_ref(&event),
            NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
            &CalendarSettings::default(),
        );

        let placed: usize = layout
            .days
            .iter()
            .flat_map(|d| &d.slots)
            .map(|s| s.events.len())
            .sum();
        assert_eq!(placed, 0);
    }
}
