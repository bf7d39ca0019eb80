//! Drag relocation of events.
//!
//! Pick-up stores the dragged event in the view state; hover only
//! tracks the candidate target (feedback is the renderer's job); drop
//! commits through an optimistic cache move followed by a store
//! confirmation or rollback. The commit is split-phase — `begin_drop`
//! applies the optimistic move and `resolve` settles it when the store
//! answers — so the in-flight window is explicit and a second drag of
//! the same event during it is rejected.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, info};

use calgrid_core::protocol::EventPatch;
use calgrid_core::{Event, StoreResult};

use crate::cache::EventCache;
use crate::notify::{ErrorKind, Notifier};
use crate::store::CalendarStore;
use crate::view_state::{DragPayload, ViewStateStore};

/// Per-event relocation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relocation {
    /// Optimistically applied, store confirmation outstanding.
    Pending { previous: NaiveDate },
    /// Store confirmed; the optimistic state stands.
    Applied,
    /// Store rejected; the cache was rolled back to `previous`.
    Failed { previous: NaiveDate },
}

/// An optimistic move awaiting its store confirmation.
#[derive(Debug)]
pub struct PendingRelocation {
    pub event_id: String,
    pub previous: NaiveDate,
    pub target: NaiveDate,
    pub patch: EventPatch,
}

/// What `begin_drop` decided.
#[derive(Debug)]
pub enum BeginDrop {
    /// Optimistic move applied; send `patch` and `resolve`.
    Started(PendingRelocation),
    /// Invalid or unchanged target, nothing to do.
    Noop,
    /// A relocation of this event is already in flight.
    Rejected,
}

/// Final outcome of a drop gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocationOutcome {
    Committed,
    RolledBack,
    Rejected,
    Noop,
}

/// Coordinates pick-up, hover, and drop-commit for event drags.
#[derive(Debug, Default)]
pub struct DragController {
    relocations: HashMap<String, Relocation>,
}

impl DragController {
    pub fn new() -> Self {
        DragController::default()
    }

    /// Begin dragging an event. No mutation happens here. Returns false
    /// when the event is unknown or its previous relocation has not
    /// resolved yet.
    pub fn pick_up(
        &mut self,
        view_state: &mut ViewStateStore,
        cache: &EventCache,
        event_id: &str,
    ) -> bool {
        if self.is_in_flight(event_id) {
            debug!(event_id, "drag rejected, relocation in flight");
            return false;
        }
        let Some(event) = cache.get(event_id) else {
            return false;
        };
        // A fresh drag supersedes a settled Applied/Failed record.
        self.relocations.remove(event_id);
        view_state.begin_drag(DragPayload {
            event_id: event_id.to_string(),
            origin: event.start_date(),
            over: None,
        });
        true
    }

    /// Track the current drop candidate. Purely informational.
    pub fn hover(&self, view_state: &mut ViewStateStore, target: Option<NaiveDate>) {
        view_state.hover(target);
    }

    /// End the drag gesture and, for a valid changed target, apply the
    /// optimistic move. The caller sends the returned patch to the
    /// store and settles with `resolve`.
    pub fn begin_drop(
        &mut self,
        view_state: &mut ViewStateStore,
        cache: &mut EventCache,
        target: Option<NaiveDate>,
    ) -> BeginDrop {
        let Some(payload) = view_state.take_drag() else {
            return BeginDrop::Noop;
        };
        // Dropped outside any valid slot
        let Some(target) = target else {
            return BeginDrop::Noop;
        };
        if self.is_in_flight(&payload.event_id) {
            return BeginDrop::Rejected;
        }
        let Some(event) = cache.get(&payload.event_id) else {
            return BeginDrop::Noop;
        };
        if event.start_date() == target {
            return BeginDrop::Noop;
        }

        let Some(previous) = cache.move_to_date(&payload.event_id, target) else {
            return BeginDrop::Noop;
        };
        // The moved entry is the source of the patch timestamps.
        let patch = match cache.get(&payload.event_id) {
            Some(moved) => EventPatch::reschedule(moved.start, moved.end),
            None => return BeginDrop::Noop,
        };

        self.relocations
            .insert(payload.event_id.clone(), Relocation::Pending { previous });
        info!(event_id = %payload.event_id, %previous, %target, "relocation pending");

        BeginDrop::Started(PendingRelocation {
            event_id: payload.event_id,
            previous,
            target,
            patch,
        })
    }

    /// Settle a pending relocation with the store's answer. On success
    /// the confirmed event replaces the optimistic entry; on failure
    /// the cache rolls back to the captured date before the failure
    /// notice is raised.
    pub fn resolve(
        &mut self,
        pending: PendingRelocation,
        result: StoreResult<Event>,
        cache: &mut EventCache,
        notifier: &mut Notifier,
    ) -> RelocationOutcome {
        match result {
            Ok(confirmed) => {
                cache.insert(confirmed);
                self.relocations
                    .insert(pending.event_id.clone(), Relocation::Applied);
                notifier.success(format!("Event moved to {}", pending.target));
                RelocationOutcome::Committed
            }
            Err(err) => {
                cache.move_to_date(&pending.event_id, pending.previous);
                self.relocations.insert(
                    pending.event_id.clone(),
                    Relocation::Failed {
                        previous: pending.previous,
                    },
                );
                notifier.failure(ErrorKind::EventUpdateFailed, &err);
                RelocationOutcome::RolledBack
            }
        }
    }

    /// Full drop gesture: optimistic move, store update, settle.
    pub async fn drop_on<S: CalendarStore>(
        &mut self,
        target: Option<NaiveDate>,
        view_state: &mut ViewStateStore,
        cache: &mut EventCache,
        store: &S,
        notifier: &mut Notifier,
    ) -> RelocationOutcome {
        match self.begin_drop(view_state, cache, target) {
            BeginDrop::Noop => RelocationOutcome::Noop,
            BeginDrop::Rejected => RelocationOutcome::Rejected,
            BeginDrop::Started(pending) => {
                let result = store.update_event(&pending.event_id, &pending.patch).await;
                self.resolve(pending, result, cache, notifier)
            }
        }
    }

    pub fn is_in_flight(&self, event_id: &str) -> bool {
        matches!(
            self.relocations.get(event_id),
            Some(Relocation::Pending { .. })
        )
    }

    /// Last relocation transition recorded for an event.
    pub fn relocation(&self, event_id: &str) -> Option<Relocation> {
        self.relocations.get(event_id).copied()
    }

    pub fn reset(&mut self) {
        self.relocations.clear();
    }
}
