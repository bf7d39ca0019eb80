//! Settings synchronizer.
//!
//! Reconciles the local `SettingsStore` with the remote store:
//! fetch-on-first-load, push-on-change, push-on-unload. The pull gate
//! is absolute: no push ever happens before the first successful fetch
//! completes, so local scaffold defaults can never overwrite what the
//! server has.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::notify::{ErrorKind, Notifier};
use crate::settings::SettingsStore;
use crate::store::CalendarStore;

/// Synchronization lifecycle. Fetch failure drops back to
/// `Uninitialized`; the caller may retry on next mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Uninitialized,
    Fetching,
    Initialized,
}

/// Trailing debounce: each trigger re-arms a deadline `delay` in the
/// future; the action fires once the deadline passes with no further
/// triggers. The clock is injected so tests stay deterministic.
#[derive(Debug)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Debounce {
            delay,
            deadline: None,
        }
    }

    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn is_due(&self, now: Instant) -> bool {
        matches!(self.deadline, Some(deadline) if deadline <= now)
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn clear(&mut self) {
        self.deadline = None;
    }
}

/// Reconciles local settings with the remote store.
pub struct SettingsSync {
    user_id: String,
    phase: SyncPhase,
    debounce: Debounce,
}

impl SettingsSync {
    pub fn new(user_id: impl Into<String>, debounce_delay: Duration) -> Self {
        SettingsSync {
            user_id: user_id.into(),
            phase: SyncPhase::Uninitialized,
            debounce: Debounce::new(debounce_delay),
        }
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// First-load fetch. Failure is silent (logged, recorded, no toast)
    /// and leaves the phase `Uninitialized`; there is no automatic
    /// retry. A `null` server response keeps the built-in defaults and
    /// still counts as initialized.
    pub async fn initialize<S: CalendarStore>(
        &mut self,
        store: &S,
        settings: &mut SettingsStore,
        notifier: &mut Notifier,
    ) -> bool {
        if self.phase == SyncPhase::Initialized {
            return true;
        }
        self.phase = SyncPhase::Fetching;

        match store.fetch_settings(&self.user_id).await {
            Ok(remote) => {
                settings.apply_remote(remote);
                self.phase = SyncPhase::Initialized;
                info!(user_id = %self.user_id, "settings sync initialized");
                true
            }
            Err(err) => {
                self.phase = SyncPhase::Uninitialized;
                warn!(user_id = %self.user_id, "initial settings fetch failed");
                notifier.failure_silent(ErrorKind::SyncFailed, &err);
                false
            }
        }
    }

    /// Record a settings mutation. Arms the trailing debounce; the
    /// actual push happens through `push_if_due`.
    pub fn note_change(&mut self, now: Instant) {
        self.debounce.trigger(now);
    }

    /// Push local changes if the debounce deadline has passed. Refuses
    /// before initialization regardless of how many changes are queued.
    pub async fn push_if_due<S: CalendarStore>(
        &mut self,
        store: &S,
        settings: &mut SettingsStore,
        notifier: &mut Notifier,
        now: Instant,
    ) -> bool {
        if !self.debounce.is_due(now) {
            return false;
        }
        self.push(store, settings, notifier).await
    }

    /// Immediate push for explicit saves and page-unload. Skips the
    /// debounce but never the initialization gate.
    pub async fn flush<S: CalendarStore>(
        &mut self,
        store: &S,
        settings: &mut SettingsStore,
        notifier: &mut Notifier,
    ) -> bool {
        if !self.debounce.is_armed() && !settings.is_dirty() {
            return false;
        }
        self.push(store, settings, notifier).await
    }

    async fn push<S: CalendarStore>(
        &mut self,
        store: &S,
        settings: &mut SettingsStore,
        notifier: &mut Notifier,
    ) -> bool {
        if self.phase != SyncPhase::Initialized {
            debug!(phase = ?self.phase, "push refused before initial fetch");
            return false;
        }

        match store.save_settings(&self.user_id, settings.settings()).await {
            Ok(()) => {
                settings.mark_clean();
                self.debounce.clear();
                debug!("settings pushed");
                true
            }
            Err(err) => {
                // Deadline stays armed so the next poll retries.
                notifier.failure(ErrorKind::SyncFailed, &err);
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.phase = SyncPhase::Uninitialized;
        self.debounce.clear();
    }
}
