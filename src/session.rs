//! Calendar session: the composition root.
//!
//! Owns every state container for one signed-in user and wires the
//! controllers to the store. Constructed at session start, reset at
//! logout; tests build their own against a mock store, so nothing in
//! the subsystem is a global.

use chrono::NaiveDate;
use std::time::Instant;
use tracing::{info, warn};

use calgrid_core::ViewMode;

use crate::cache::EventCache;
use crate::config::GridConfig;
use crate::dialogs::DialogController;
use crate::drag::DragController;
use crate::notify::{ErrorKind, Notifier};
use crate::settings::SettingsStore;
use crate::store::CalendarStore;
use crate::sync::SettingsSync;
use crate::view_state::ViewStateStore;
use crate::views::{view_for, Layout, ViewTransition};

/// One user's calendar session.
pub struct CalendarSession<S: CalendarStore> {
    user_id: String,
    config: GridConfig,
    store: S,
    pub settings: SettingsStore,
    pub view_state: ViewStateStore,
    pub cache: EventCache,
    pub sync: SettingsSync,
    pub drag: DragController,
    pub dialogs: DialogController,
    pub transition: ViewTransition,
    pub notifier: Notifier,
    needs_recovery: bool,
}

impl<S: CalendarStore> CalendarSession<S> {
    pub fn new(user_id: impl Into<String>, store: S, config: GridConfig, today: NaiveDate) -> Self {
        let user_id = user_id.into();
        CalendarSession {
            sync: SettingsSync::new(user_id.clone(), config.sync_debounce()),
            view_state: ViewStateStore::new(ViewMode::Month, today),
            settings: SettingsStore::new(),
            cache: EventCache::new(),
            drag: DragController::new(),
            dialogs: DialogController::new(),
            transition: ViewTransition::new(),
            notifier: Notifier::new(),
            needs_recovery: false,
            user_id,
            config,
            store,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// First mount: pull settings (adopting the user's default view),
    /// then load the visible range.
    pub async fn start(&mut self) {
        info!(user_id = %self.user_id, "calendar session starting");
        if self
            .sync
            .initialize(&self.store, &mut self.settings, &mut self.notifier)
            .await
        {
            self.view_state.set_mode(self.settings.settings().default_view);
        }
        self.load_visible_range().await;
    }

    /// Fetch the active view's span and replace the cache with it.
    pub async fn load_visible_range(&mut self) -> bool {
        let view = view_for(self.view_state.mode());
        let span = view.span(self.view_state.selected_date(), self.settings.settings());

        match self.store.fetch_events(&self.user_id, &span).await {
            Ok(events) => {
                self.cache.replace(events);
                self.needs_recovery = false;
                true
            }
            Err(err) => {
                warn!(user_id = %self.user_id, "event range load failed");
                self.needs_recovery = true;
                self.notifier.failure(ErrorKind::SyncFailed, &err);
                false
            }
        }
    }

    /// Switch views. Starts the slide transition and keeps the selected
    /// date; the cache is not re-fetched.
    pub fn set_view(&mut self, mode: ViewMode) {
        let from = self.view_state.mode();
        self.transition.begin(from, mode);
        self.view_state.set_mode(mode);
    }

    /// Select a date. Returns whether the new date falls outside the
    /// loaded span, in which case the caller should `load_visible_range`.
    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        let view = view_for(self.view_state.mode());
        let loaded = view.span(self.view_state.selected_date(), self.settings.settings());
        self.view_state.select_date(date);
        !loaded.contains_date(date)
    }

    /// Project the cache through the active renderer.
    pub fn layout(&self) -> Layout {
        view_for(self.view_state.mode()).render(
            self.cache.events(),
            self.view_state.selected_date(),
            self.settings.settings(),
            &self.config,
        )
    }

    /// Record a settings mutation and arm the debounced push.
    pub fn settings_changed(&mut self, now: Instant) {
        self.sync.note_change(now);
    }

    /// Poll for a due debounced push. Presentation calls this from its
    /// tick.
    pub async fn push_settings_if_due(&mut self, now: Instant) -> bool {
        self.sync
            .push_if_due(&self.store, &mut self.settings, &mut self.notifier, now)
            .await
    }

    /// Explicit save action or page-unload flush.
    pub async fn flush_settings(&mut self) -> bool {
        self.sync
            .flush(&self.store, &mut self.settings, &mut self.notifier)
            .await
    }

    /// Whether the last range load failed and the recovery screen with
    /// its manual retry should be shown.
    pub fn needs_recovery(&self) -> bool {
        self.needs_recovery
    }

    /// Manual retry from the recovery screen.
    pub async fn retry_load(&mut self) -> bool {
        self.load_visible_range().await
    }

    /// Logout: drop all per-user state back to construction defaults.
    pub fn reset(&mut self, today: NaiveDate) {
        self.settings.reset();
        self.sync.reset();
        self.cache.clear();
        self.drag.reset();
        self.dialogs.reset();
        self.view_state.reset(ViewMode::Month, today);
        self.transition = ViewTransition::new();
        self.notifier = Notifier::new();
        self.needs_recovery = false;
        info!(user_id = %self.user_id, "calendar session reset");
    }
}
