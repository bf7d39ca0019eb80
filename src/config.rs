//! Ambient subsystem configuration.
//!
//! Loaded from `~/.config/calgrid/config.toml`. Every field has a
//! default so a missing or partial file is fine.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

fn default_store_url() -> String {
    "http://127.0.0.1:4096".to_string()
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_sync_debounce_ms() -> u64 {
    400
}

fn default_month_inline_events() -> usize {
    3
}

/// Tunables for the scheduling subsystem.
#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    /// Base URL of the remote calendar store.
    #[serde(default = "default_store_url")]
    pub store_url: String,

    /// Client-side timeout applied to every store call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Trailing debounce for change-triggered settings pushes.
    #[serde(default = "default_sync_debounce_ms")]
    pub sync_debounce_ms: u64,

    /// How many events a month-view day cell renders inline before the
    /// remainder collapses into a count badge.
    #[serde(default = "default_month_inline_events")]
    pub month_inline_events: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            store_url: default_store_url(),
            request_timeout_secs: default_request_timeout_secs(),
            sync_debounce_ms: default_sync_debounce_ms(),
            month_inline_events: default_month_inline_events(),
        }
    }
}

impl GridConfig {
    /// Config file at ~/.config/calgrid/config.toml
    pub fn config_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join("calgrid").join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it is
    /// missing or malformed.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return GridConfig::default();
        };
        let Ok(content) = std::fs::read_to_string(&path) else {
            return GridConfig::default();
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), %err, "ignoring malformed config file");
                GridConfig::default()
            }
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn sync_debounce(&self) -> Duration {
        Duration::from_millis(self.sync_debounce_ms)
    }
}
