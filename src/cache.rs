//! In-memory event collection cache.
//!
//! Holds the events loaded for the visible date range and is the
//! single source of truth the views render from. All operations are
//! synchronous; the session performs the network fetches that populate
//! it. Only the owning UI thread mutates it, so there are no locks.

use chrono::{Duration, NaiveDate};
use tracing::debug;

use calgrid_core::Event;

/// The set of currently-loaded events, kept sorted by start instant.
/// No two entries ever share an id; inserting an existing id replaces
/// the entry in place.
#[derive(Debug, Default)]
pub struct EventCache {
    events: Vec<Event>,
}

impl EventCache {
    pub fn new() -> Self {
        EventCache::default()
    }

    /// Replace the cache contents with a freshly fetched range. A
    /// duplicated id in the incoming list keeps the last occurrence.
    pub fn replace(&mut self, events: Vec<Event>) {
        self.events.clear();
        for event in events {
            match self.events.iter_mut().find(|e| e.id == event.id) {
                Some(existing) => *existing = event,
                None => self.events.push(event),
            }
        }
        self.sort();
        debug!(count = self.events.len(), "cache replaced");
    }

    /// Insert an event, overwriting any entry with the same id.
    pub fn insert(&mut self, event: Event) {
        match self.events.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => *existing = event,
            None => self.events.push(event),
        }
        self.sort();
    }

    /// Remove an event by id, returning it if present.
    pub fn remove(&mut self, event_id: &str) -> Option<Event> {
        let index = self.events.iter().position(|e| e.id == event_id)?;
        let event = self.events.remove(index);
        debug!(event_id, "cache entry removed");
        Some(event)
    }

    /// Shift an event to a new start date, preserving time-of-day and
    /// duration. Returns the prior start date for rollback, or `None`
    /// if the id is unknown.
    pub fn move_to_date(&mut self, event_id: &str, date: NaiveDate) -> Option<NaiveDate> {
        let event = self.events.iter_mut().find(|e| e.id == event_id)?;
        let previous = event.start_date();
        let shift = Duration::days((date - previous).num_days());
        event.start = event.start + shift;
        event.end = event.end + shift;
        debug!(event_id, %previous, %date, "cache entry moved");
        self.sort();
        Some(previous)
    }

    pub fn get(&self, event_id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == event_id)
    }

    /// Events starting on `date`, in start order. Also serves the
    /// month view's expanded badge list.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        self.events.iter().filter(|e| e.start_date() == date).collect()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    fn sort(&mut self) {
        self.events.sort_by_key(|e| e.start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::make_event;
    use chrono::{TimeZone, Utc};

    fn ts(day: u32, hour: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, hour, 15, 0).unwrap()
    }

    #[test]
    fn insert_with_existing_id_overwrites() {
        let mut cache = EventCache::new();
        cache.insert(make_event("E1", "Old title", ts(10, 9), 60));
        cache.insert(make_event("E1", "New title", ts(11, 9), 60));

        assert_eq!(cache.len(), 1, "same id must never duplicate");
        assert_eq!(cache.get("E1").unwrap().title, "New title");
    }

    #[test]
    fn removed_event_is_gone_after_reload() {
        let mut cache = EventCache::new();
        cache.replace(vec![
            make_event("E1", "One", ts(10, 9), 60),
            make_event("E2", "Two", ts(11, 9), 60),
        ]);
        cache.remove("E1");
        cache.replace(cache.events().to_vec());

        assert!(cache.get("E1").is_none(), "no dangling state after remove");
        assert!(cache.get("E2").is_some());
    }

    #[test]
    fn move_preserves_time_of_day_and_duration() {
        let mut cache = EventCache::new();
        cache.insert(make_event("E1", "Standup", ts(10, 9), 45));

        let previous = cache
            .move_to_date("E1", NaiveDate::from_ymd_opt(2024, 6, 12).unwrap())
            .unwrap();

        assert_eq!(previous, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        let moved = cache.get("E1").unwrap();
        assert_eq!(moved.start, ts(12, 9));
        assert_eq!(moved.duration(), Duration::minutes(45));
    }

    #[test]
    fn move_back_restores_original_start() {
        let mut cache = EventCache::new();
        cache.insert(make_event("E1", "Standup", ts(10, 9), 45));

        let previous = cache
            .move_to_date("E1", NaiveDate::from_ymd_opt(2024, 6, 12).unwrap())
            .unwrap();
        cache.move_to_date("E1", previous).unwrap();

        assert_eq!(cache.get("E1").unwrap().start, ts(10, 9));
    }

    #[test]
    fn move_unknown_id_is_none() {
        let mut cache = EventCache::new();
        assert!(cache
            .move_to_date("nope", NaiveDate::from_ymd_opt(2024, 6, 12).unwrap())
            .is_none());
    }

    #[test]
    fn events_are_kept_in_start_order() {
        let mut cache = EventCache::new();
        cache.insert(make_event("E2", "Later", ts(12, 9), 60));
        cache.insert(make_event("E1", "Earlier", ts(10, 9), 60));

        let ids: Vec<&str> = cache.events().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["E1", "E2"]);
    }

    #[test]
    fn events_on_filters_by_start_date() {
        let mut cache = EventCache::new();
        cache.replace(vec![
            make_event("E1", "One", ts(10, 9), 60),
            make_event("E2", "Two", ts(10, 14), 60),
            make_event("E3", "Three", ts(11, 9), 60),
        ]);

        let june_10 = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let on_day: Vec<&str> = cache.events_on(june_10).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(on_day, vec!["E1", "E2"]);
    }
}
