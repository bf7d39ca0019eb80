//! Error types for the calgrid subsystem.

use thiserror::Error;

/// Errors that can occur talking to the remote calendar store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Transport-level failure (connection refused, TLS, DNS, ...).
    #[error("Store request failed: {0}")]
    Http(String),

    /// The store answered and reported a failure. The message is the
    /// server's own and is shown to the user verbatim where the flow
    /// calls for it.
    #[error("{0}")]
    Api(String),

    #[error("Store request timed out after {0}s")]
    Timeout(u64),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The store answered 2xx but the body was not what we expected.
    #[error("Invalid response from store: {0}")]
    BadResponse(String),
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Validation failures for user-entered event and settings fields,
/// checked before anything is sent to the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("End must not be before start")]
    EndBeforeStart,

    #[error("Notification lead time must not be negative")]
    NegativeLeadTime,

    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    #[error("First day of week must be 0-6, got {0}")]
    BadFirstDayOfWeek(u8),
}
