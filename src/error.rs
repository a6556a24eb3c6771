//! Error types for session storage operations.

use thiserror::Error;

/// Result type alias for session storage operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Error taxonomy for session storage.
///
/// "Not found" is never an error: lookups on absent or unknown session ids
/// resolve to `None` (or an empty list). The variants below cover the cases
/// that genuinely fail an operation.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Redis command or connection failure, propagated unchanged from the
    /// client.
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// A stored metadata payload could not be encoded or decoded as JSON.
    #[error("malformed session metadata: {0}")]
    Meta(#[from] serde_json::Error),

    /// A stored `lastUsedAt` timestamp could not be parsed as ISO-8601.
    #[error("malformed session timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),

    /// Internal invariant failure (e.g. a poisoned lock).
    #[error("internal error: {0}")]
    Internal(String),
}

impl SessionError {
    /// Returns `true` if this error was caused by a corrupt stored record
    /// rather than the storage transport.
    ///
    /// Callers enumerating sessions can use this to decide between skipping
    /// a record and failing the whole listing.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sessionkit::SessionError;
    /// let malformed = serde_json::from_str::<bool>("not json").unwrap_err();
    /// assert!(SessionError::from(malformed).is_malformed_record());
    ///
    /// assert!(!SessionError::Internal("lock poisoned".to_string()).is_malformed_record());
    /// ```
    #[must_use]
    pub const fn is_malformed_record(&self) -> bool {
        matches!(self, Self::Meta(_) | Self::Timestamp(_))
    }
}
