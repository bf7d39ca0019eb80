//! calgrid: the calendar scheduling subsystem.
//!
//! Represents single-instance calendar events, projects them across
//! month/week/day views, supports drag-based rescheduling with
//! optimistic updates and rollback, and reconciles local calendar
//! settings with a remote store.
//!
//! Everything is owned, injectable state: construct a
//! [`session::CalendarSession`] with a user id, a
//! [`store::CalendarStore`] implementation, and a
//! [`config::GridConfig`], then drive it from UI callbacks. The
//! subsystem is single-threaded; the only suspension points are the
//! store calls.

pub mod cache;
pub mod config;
pub mod dialogs;
pub mod drag;
pub mod notify;
pub mod session;
pub mod settings;
pub mod store;
pub mod sync;
pub mod view_state;
pub mod views;

pub use calgrid_core::{
    CalendarSettings, DateRange, Event, StoreError, StoreResult, ValidationError, ViewMode,
};

pub use cache::EventCache;
pub use config::GridConfig;
pub use dialogs::{Dialog, DialogController, EventDraft, Submit};
pub use drag::{DragController, Relocation, RelocationOutcome};
pub use notify::{ErrorKind, Notice, Notifier, Severity};
pub use session::CalendarSession;
pub use settings::SettingsStore;
pub use store::{CalendarStore, HttpStore};
pub use sync::{Debounce, SettingsSync, SyncPhase};
pub use view_state::{DragPayload, ViewStateStore};
pub use views::{CalendarView, Layout, ViewTransition};
