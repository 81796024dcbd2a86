//! Error types for the core crate.
//!
//! The tree and selection logic never fails: "not found" is an empty result
//! and redundant mutations are no-ops. Errors only exist at the edges:
//!
//! - [`DriveError`] - decoding the drive listing
//! - [`ScheduleError`] - converting publish times between local and UTC
//! - [`HistoryError`] - persistence port failures

use thiserror::Error;

/// Drive listing decode errors.
#[derive(Debug, Error)]
pub enum DriveError {
    /// The listing is not valid JSON or has the wrong shape.
    #[error("invalid drive listing: {0}")]
    InvalidListing(#[from] serde_json::Error),
}

/// Publish time conversion errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The input is not `YYYY-MM-DDTHH:MM[:SS]`.
    #[error("invalid local time '{0}'")]
    InvalidLocalTime(String),

    /// The input is not an RFC 3339 timestamp.
    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    /// The wall time falls into a DST gap in the target zone.
    #[error("local time '{0}' does not exist in this time zone")]
    NonexistentLocalTime(String),
}

/// History persistence errors.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The backing storage is not available.
    #[error("history storage not available")]
    StorageUnavailable,

    /// Stored entries could not be (de)serialized.
    #[error("history data is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The backend rejected a write or delete.
    #[error("failed to write history: {0}")]
    WriteFailed(String),
}

/// Result alias for history operations.
pub type HistoryResult<T> = Result<T, HistoryError>;
