//! Calendar view projection.
//!
//! Three interchangeable renderers project the event cache onto a
//! calendar layout for a given selected date. Layouts are pure data;
//! presentation draws them. Renderers never fetch: the session loads
//! the span a renderer reports via `span`.

pub mod day;
pub mod month;
pub mod transition;
pub mod week;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use calgrid_core::{CalendarSettings, DateRange, Event, ViewMode};

use crate::config::GridConfig;

pub use day::DayLayout;
pub use month::{DayCell, MonthLayout, MonthWeek};
pub use transition::{SlideDirection, ViewTransition};
pub use week::{DayColumn, WeekLayout};

/// Common contract of the month/week/day renderers, selected via the
/// view state's mode field.
pub trait CalendarView {
    fn mode(&self) -> ViewMode;

    /// The date span this renderer displays for `selected`. The session
    /// loads exactly this range into the cache.
    fn span(&self, selected: NaiveDate, settings: &CalendarSettings) -> DateRange;

    fn render(
        &self,
        events: &[Event],
        selected: NaiveDate,
        settings: &CalendarSettings,
        config: &GridConfig,
    ) -> Layout;
}

/// Output of a render pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    Month(MonthLayout),
    Week(WeekLayout),
    Day(DayLayout),
}

/// Renderer for a mode.
pub fn view_for(mode: ViewMode) -> &'static dyn CalendarView {
    match mode {
        ViewMode::Month => &month::MonthView,
        ViewMode::Week => &week::WeekView,
        ViewMode::Day => &day::DayView,
    }
}

/// A single event as a layout places it. All-day entries carry no time
/// label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventEntry {
    pub event_id: String,
    pub title: String,
    pub all_day: bool,
    pub time_label: Option<String>,
}

impl EventEntry {
    pub fn from_event(event: &Event) -> Self {
        EventEntry {
            event_id: event.id.clone(),
            title: event.title.clone(),
            all_day: event.is_all_day,
            time_label: if event.is_all_day {
                None
            } else {
                Some(event.start.format("%H:%M").to_string())
            },
        }
    }
}

/// Hourly slot of a week/day column. An event lands in the slot whose
/// hour equals its start hour; minutes are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourSlot {
    pub hour: u32,
    pub events: Vec<EventEntry>,
}

/// Build the 24 hourly slots for one day.
pub(crate) fn hour_slots(events: &[Event], date: NaiveDate) -> Vec<HourSlot> {
    (0..24)
        .map(|hour| HourSlot {
            hour,
            events: events
                .iter()
                .filter(|e| e.start_date() == date && e.start_hour() == hour)
                .map(EventEntry::from_event)
                .collect(),
        })
        .collect()
}

/// Most recent `first_dow` on or before `date`.
pub(crate) fn week_start(date: NaiveDate, first_dow: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_sunday()
        - first_dow.num_days_from_sunday())
        % 7;
    date - Duration::days(offset as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_start_lands_on_configured_day() {
        // 2024-06-12 is a Wednesday
        let wed = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();

        assert_eq!(
            week_start(wed, Weekday::Sun),
            NaiveDate::from_ymd_opt(2024, 6, 9).unwrap()
        );
        assert_eq!(
            week_start(wed, Weekday::Mon),
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
        );
        // First day after the date's weekday wraps to the prior week
        assert_eq!(
            week_start(wed, Weekday::Thu),
            NaiveDate::from_ymd_opt(2024, 6, 6).unwrap()
        );
    }

    #[test]
    fn week_start_is_identity_on_the_first_day_itself() {
        let sun = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        assert_eq!(week_start(sun, Weekday::Sun), sun);
    }
}
