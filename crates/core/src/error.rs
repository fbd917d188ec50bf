//! API error model.

use thiserror::Error;

/// Result type used across the API surface.
pub type ApiResult<T> = Result<T, ApiError>;

/// API-level error.
///
/// These are programmer-error guards and host write failures. The outcome of an
/// inventory operation is reported as data (see `TransactionType`), never as an
/// `ApiError`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A required argument was absent or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation was called while the receiver was not ready for it.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The host refused or failed to write a slot.
    #[error("slot {index} write failed: {reason}")]
    SlotWrite { index: usize, reason: String },

    /// A host-side lock was poisoned.
    #[error("lock poisoned")]
    Poisoned,
}

impl ApiError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn slot_write(index: usize, reason: impl Into<String>) -> Self {
        Self::SlotWrite {
            index,
            reason: reason.into(),
        }
    }
}
