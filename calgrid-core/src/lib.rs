//! Core types for the calgrid scheduling subsystem.
//!
//! This crate provides the types shared between the subsystem and the
//! remote calendar store:
//! - `Event` and `CalendarSettings` domain types
//! - `protocol` module for the store wire format (payloads, envelope)
//! - `DateRange` for range-filtered event queries
//! - `StoreError` for transport failures

pub mod date_range;
pub mod error;
pub mod event;
pub mod protocol;
pub mod settings;

pub use date_range::DateRange;
pub use error::{StoreError, StoreResult, ValidationError};
pub use event::Event;
pub use settings::{CalendarSettings, ViewMode, WorkingHours};
