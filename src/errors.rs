//! Unified error types and result handling.
//!
//! Every fallible operation in the crate returns the crate-wide [`Result`]
//! alias. Errors are surfaced at the action boundary (logged and shown to the
//! operator); none of them are allowed to take down a live mirror
//! subscription.

use crate::entities::DataSource;
use thiserror::Error;

/// Unified error type for all console operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The target record vanished from the local mirror before the mutation
    /// could be applied.
    #[error("record not found: {collection}/{key}")]
    NotFound {
        /// Collection the record was expected in
        collection: DataSource,
        /// Record key within the collection
        key: String,
    },

    /// A mutation is already in flight for this record. The first write must
    /// resolve before another one is accepted for the same key.
    #[error("mutation already in flight for {collection}/{key}")]
    MutationInFlight {
        /// Collection of the contested record
        collection: DataSource,
        /// Record key within the collection
        key: String,
    },

    /// The remote store rejected a partial-field update. Triggers rollback of
    /// the optimistic local change.
    #[error("remote write failed: {message}")]
    RemoteWrite {
        /// Reason reported by the store
        message: String,
    },

    /// A caller-side precondition failed before any write was attempted.
    #[error("validation failed: {message}")]
    Validation {
        /// Human-readable description of the failed precondition
        message: String,
    },

    /// The acting identity is not allowed to perform this action.
    #[error("permission denied: {action}")]
    PermissionDenied {
        /// Action that was refused
        action: String,
    },

    /// The SMS gateway delivered to some but not all recipients. Reported as
    /// a ratio, never treated as a hard failure by callers.
    #[error("notification delivered to {delivered} of {total} recipients")]
    PartialNotification {
        /// Recipients the gateway accepted
        delivered: usize,
        /// Recipients attempted
        total: usize,
    },

    /// Transport-level failure talking to an external gateway.
    #[error("gateway error: {message}")]
    Gateway {
        /// Underlying transport error
        message: String,
    },

    /// Configuration error (unreadable or malformed config file, bad URL).
    #[error("configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error at the normalization boundary
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writer error during export
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::Gateway {
            message: value.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
