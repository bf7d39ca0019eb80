//! Local settings store.
//!
//! Holds the user's calendar preferences as process-local state with a
//! dirty/clean flag and an initialization gate. The store never talks
//! to the network itself; `sync::SettingsSync` reconciles it with the
//! remote store and is the only component allowed to push.

use tracing::debug;

use calgrid_core::{CalendarSettings, ValidationError};

/// Owned, injectable settings container. Constructed with built-in
/// defaults at session start; `apply_remote` installs the server copy.
#[derive(Debug, Default)]
pub struct SettingsStore {
    settings: CalendarSettings,
    initialized: bool,
    dirty: bool,
}

impl SettingsStore {
    pub fn new() -> Self {
        SettingsStore::default()
    }

    pub fn settings(&self) -> &CalendarSettings {
        &self.settings
    }

    /// Whether the first successful fetch has completed. Until then the
    /// settings are local scaffold defaults and must not be pushed.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether there are local changes the store has not seen.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Install the result of the initial fetch. `None` means the user
    /// has nothing stored yet; the built-in defaults stand.
    pub fn apply_remote(&mut self, remote: Option<CalendarSettings>) {
        if let Some(settings) = remote {
            self.settings = settings;
        }
        self.initialized = true;
        self.dirty = false;
        debug!("settings initialized");
    }

    /// Replace the settings from a user edit. Validates before
    /// accepting and marks the store dirty.
    pub fn set(&mut self, settings: CalendarSettings) -> Result<(), ValidationError> {
        settings.validate()?;
        self.settings = settings;
        self.dirty = true;
        Ok(())
    }

    /// Mutate the settings in place (single-field edits from the
    /// settings form). Marks the store dirty.
    pub fn update(&mut self, mutate: impl FnOnce(&mut CalendarSettings)) {
        mutate(&mut self.settings);
        self.dirty = true;
    }

    /// Called by the synchronizer after a successful push.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Back to construction state, for logout.
    pub fn reset(&mut self) {
        *self = SettingsStore::default();
    }
}
