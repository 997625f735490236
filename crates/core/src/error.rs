//! Engine error model.

use thiserror::Error;

/// Result type used across the tracking engine.
pub type TrackResult<T> = Result<T, TrackError>;

/// Tracking-engine error.
///
/// Keep this focused on deterministic failures of the engine itself
/// (unclassifiable values, malformed identifiers). Failures of the remote
/// update call belong to the `UpdateService` implementation, not here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackError {
    /// A field holds a value whose kind the engine cannot classify, so it
    /// cannot be safely snapshotted or diffed.
    #[error("unsupported value for field `{field}`: {detail}")]
    UnsupportedValue { field: String, detail: String },

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl TrackError {
    pub fn unsupported_value(field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::UnsupportedValue {
            field: field.into(),
            detail: detail.into(),
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
