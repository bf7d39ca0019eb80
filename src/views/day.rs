//! Day timeline renderer.
//!
//! A single column of 24 hourly slots for the selected date.

use chrono::NaiveDate;

use calgrid_core::{CalendarSettings, DateRange, Event, ViewMode};

use super::{hour_slots, CalendarView, HourSlot, Layout};
use crate::config::GridConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayLayout {
    pub date: NaiveDate,
    pub slots: Vec<HourSlot>,
}

pub struct DayView;

impl CalendarView for DayView {
    fn mode(&self) -> ViewMode {
        ViewMode::Day
    }

    fn span(&self, selected: NaiveDate, _settings: &CalendarSettings) -> DateRange {
        DateRange::days(selected, 1)
    }

    fn render(
        &self,
        events: &[Event],
        selected: NaiveDate,
        _settings: &CalendarSettings,
        _config: &GridConfig,
    ) -> Layout {
        Layout::Day(DayLayout {
            date: selected,
            slots: hour_slots(events, selected),
        })
    }
}
