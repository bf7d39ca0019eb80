//! Transient view state.
//!
//! Tracks the active view mode, the selected date, and any in-flight
//! drag payload. Process-local, never persisted, reset on reload.

use chrono::NaiveDate;

use calgrid_core::ViewMode;

/// The event currently being dragged, plus the candidate drop target
/// updated on hover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub event_id: String,
    /// Start date when the drag began.
    pub origin: NaiveDate,
    /// Last hovered drop candidate, if any.
    pub over: Option<NaiveDate>,
}

/// Owned, injectable view state container.
#[derive(Debug)]
pub struct ViewStateStore {
    mode: ViewMode,
    selected_date: NaiveDate,
    dragging: Option<DragPayload>,
}

impl ViewStateStore {
    pub fn new(mode: ViewMode, selected_date: NaiveDate) -> Self {
        ViewStateStore {
            mode,
            selected_date,
            dragging: None,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Switch views. The selected date is deliberately untouched so a
    /// month -> week -> day round trip lands on the same date.
    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    pub fn begin_drag(&mut self, payload: DragPayload) {
        self.dragging = Some(payload);
    }

    pub fn drag(&self) -> Option<&DragPayload> {
        self.dragging.as_ref()
    }

    /// Update the hover candidate of the active drag, if one exists.
    pub fn hover(&mut self, target: Option<NaiveDate>) {
        if let Some(drag) = self.dragging.as_mut() {
            drag.over = target;
        }
    }

    pub fn take_drag(&mut self) -> Option<DragPayload> {
        self.dragging.take()
    }

    pub fn reset(&mut self, mode: ViewMode, selected_date: NaiveDate) {
        *self = ViewStateStore::new(mode, selected_date);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn view_switching_preserves_selected_date() {
        let mut state = ViewStateStore::new(ViewMode::Month, june(10));

        for mode in [ViewMode::Week, ViewMode::Day, ViewMode::Month] {
            state.set_mode(mode);
            assert_eq!(state.selected_date(), june(10));
        }
        assert_eq!(state.mode(), ViewMode::Month);
    }

    #[test]
    fn hover_updates_only_an_active_drag() {
        let mut state = ViewStateStore::new(ViewMode::Month, june(10));
        state.hover(Some(june(12)));
        assert!(state.drag().is_none());

        state.begin_drag(DragPayload {
            event_id: "E1".to_string(),
            origin: june(10),
            over: None,
        });
        state.hover(Some(june(12)));
        assert_eq!(state.drag().unwrap().over, Some(june(12)));

        let payload = state.take_drag().unwrap();
        assert_eq!(payload.event_id, "E1");
        assert!(state.drag().is_none());
    }
}
