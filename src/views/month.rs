//! Month grid renderer.
//!
//! Projects events onto a grid of complete weeks covering the selected
//! month. Days outside the month stay present (and clickable) but are
//! flagged so presentation can de-emphasize them. Busy days render at
//! most the configured number of inline entries; the rest collapse
//! into an overflow count whose badge opens the full list on request.

use chrono::{Datelike, Duration, NaiveDate};

use calgrid_core::{CalendarSettings, DateRange, Event, ViewMode};

use super::{week_start, CalendarView, EventEntry, Layout};
use crate::config::GridConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for the leading/trailing days that pad the grid to
    /// complete weeks.
    pub in_month: bool,
    pub selected: bool,
    /// Inline entries, capped at the configured threshold.
    pub events: Vec<EventEntry>,
    /// How many further events the count badge stands for.
    pub overflow: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthWeek {
    /// ISO week number, present when the settings ask for it.
    pub number: Option<u32>,
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthLayout {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<MonthWeek>,
}

impl MonthLayout {
    /// Full entry list for one day, for the badge's compact list.
    pub fn day_events(events: &[Event], date: NaiveDate) -> Vec<EventEntry> {
        events
            .iter()
            .filter(|e| e.start_date() == date)
            .map(EventEntry::from_event)
            .collect()
    }
}

pub struct MonthView;

fn first_of_month(selected: NaiveDate) -> NaiveDate {
    selected.with_day(1).unwrap_or(selected)
}

fn first_of_next_month(selected: NaiveDate) -> NaiveDate {
    let (year, month) = if selected.month() == 12 {
        (selected.year() + 1, 1)
    } else {
        (selected.year(), selected.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(selected)
}

/// First day of the grid: the week containing the 1st of the month.
fn grid_start(selected: NaiveDate, settings: &CalendarSettings) -> NaiveDate {
    week_start(first_of_month(selected), settings.first_weekday())
}

/// One past the last day of the grid: the week boundary after the last
/// day of the month.
fn grid_end(selected: NaiveDate, settings: &CalendarSettings) -> NaiveDate {
    let last = first_of_next_month(selected) - Duration::days(1);
    week_start(last, settings.first_weekday()) + Duration::days(7)
}

impl CalendarView for MonthView {
    fn mode(&self) -> ViewMode {
        ViewMode::Month
    }

    fn span(&self, selected: NaiveDate, settings: &CalendarSettings) -> DateRange {
        let start = grid_start(selected, settings);
        let days = (grid_end(selected, settings) - start).num_days();
        DateRange::days(start, days)
    }

    fn render(
        &self,
        events: &[Event],
        selected: NaiveDate,
        settings: &CalendarSettings,
        config: &GridConfig,
    ) -> Layout {
        let start = grid_start(selected, settings);
        let end = grid_end(selected, settings);
        let limit = config.month_inline_events;

        let mut weeks = Vec::new();
        let mut cursor = start;
        while cursor < end {
            let mut days = Vec::with_capacity(7);
            for offset in 0..7 {
                let date = cursor + Duration::days(offset);
                let all = MonthLayout::day_events(events, date);
                let overflow = all.len().saturating_sub(limit);
                let mut inline = all;
                inline.truncate(limit);

                days.push(DayCell {
                    date,
                    in_month: date.month() == selected.month() && date.year() == selected.year(),
                    selected: date == selected,
                    events: inline,
                    overflow,
                });
            }
            weeks.push(MonthWeek {
                number: settings.show_week_numbers.then(|| cursor.iso_week().week()),
                days,
            });
            cursor = cursor + Duration::days(7);
        }

        Layout::Month(MonthLayout {
            year: selected.year(),
            month: selected.month(),
            weeks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::make_event;
    use chrono::{TimeZone, Utc};

    fn render_month(
        events: &[Event],
        selected: NaiveDate,
        settings: &CalendarSettings,
        config: &GridConfig,
    ) -> MonthLayout {
        match MonthView.render(events, selected, settings, config) {
            Layout::Month(layout) => layout,
            other => panic!("expected month layout, got {other:?}"),
        }
    }

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn grid_spans_complete_weeks_for_every_first_day_setting() {
        let config = GridConfig::default();
        for dow in 0..7u8 {
            let settings = CalendarSettings {
                first_day_of_week: dow,
                ..Default::default()
            };
            let layout = render_month(&[], june(10), &settings, &config);

            for week in &layout.weeks {
                assert_eq!(week.days.len(), 7, "ragged week with first_day {dow}");
                assert_eq!(
                    week.days[0].date.weekday(),
                    settings.first_weekday(),
                    "week must start on the configured day"
                );
            }
            // Grid covers the whole of June
            assert!(layout.weeks.first().unwrap().days[0].date <= june(1));
            assert!(layout.weeks.last().unwrap().days[6].date >= june(30));
        }
    }

    #[test]
    fn days_outside_month_are_present_but_flagged() {
        // June 2024 starts on a Saturday; a Sunday-start grid leads
        // with six days of May.
        let settings = CalendarSettings::default();
        let layout = render_month(&[], june(10), &settings, &GridConfig::default());

        let first_week = &layout.weeks[0];
        assert_eq!(first_week.days[0].date, NaiveDate::from_ymd_opt(2024, 5, 26).unwrap());
        assert!(!first_week.days[0].in_month);
        assert!(first_week.days[6].in_month, "June 1st belongs to the month");
    }

    #[test]
    fn inline_events_never_exceed_threshold() {
        let config = GridConfig {
            month_inline_events: 2,
            ..Default::default()
        };
        let events: Vec<Event> = (0..5)
            .map(|i| {
                make_event(
                    &format!("E{i}"),
                    &format!("Event {i}"),
                    Utc.with_ymd_and_hms(2024, 6, 10, 9 + i, 0, 0).unwrap(),
                    30,
                )
            })
            .collect();
        let layout = render_month(&events, june(10), &CalendarSettings::default(), &config);

        let cell = layout
            .weeks
            .iter()
            .flat_map(|w| &w.days)
            .find(|d| d.date == june(10))
            .unwrap();
        assert_eq!(cell.events.len(), 2, "inline list must respect the cap");
        assert_eq!(cell.overflow, 3, "excess events live behind the badge");

        // The badge's expanded list still reaches everything
        assert_eq!(MonthLayout::day_events(&events, june(10)).len(), 5);
    }

    #[test]
    fn all_day_event_appears_on_its_date_without_time_label() {
        let mut event = make_event(
            "E1",
            "Team Sync",
            Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap(),
            24 * 60,
        );
        event.is_all_day = true;
        let layout = render_month(
            std::slice::from_ref(&event),
            june(10),
            &CalendarSettings::default(),
            &GridConfig::default(),
        );

        let cell = layout
            .weeks
            .iter()
            .flat_map(|w| &w.days)
            .find(|d| d.date == june(10))
            .unwrap();
        assert_eq!(cell.events.len(), 1);
        assert_eq!(cell.events[0].title, "Team Sync");
        assert!(cell.events[0].all_day);
        assert_eq!(cell.events[0].time_label, None, "all-day events show no time");
    }

    #[test]
    fn week_numbers_follow_the_setting() {
        let with = CalendarSettings {
            show_week_numbers: true,
            first_day_of_week: 1,
            ..Default::default()
        };
        let layout = render_month(&[], june(10), &with, &GridConfig::default());
        assert!(layout.weeks.iter().all(|w| w.number.is_some()));

        let without = CalendarSettings::default();
        let layout = render_month(&[], june(10), &without, &GridConfig::default());
        assert!(layout.weeks.iter().all(|w| w.number.is_none()));
    }

    #[test]
    fn span_matches_the_rendered_grid() {
        let settings = CalendarSettings::default();
        let span = MonthView.span(june(10), &settings);
        let layout = render_month(&[], june(10), &settings, &GridConfig::default());

        let first = layout.weeks.first().unwrap().days[0].date;
        let last = layout.weeks.last().unwrap().days[6].date;
        assert!(span.contains_date(first));
        assert!(span.contains_date(last));
        assert!(!span.contains_date(last + Duration::days(1)));
    }
}
