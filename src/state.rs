//! Session state types.
//!
//! All types are `Clone` so stores can hand out owned snapshots.

use std::fmt::{self, Write as _};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// ID Type
// ═══════════════════════════════════════════════════════════════════════

/// Opaque identifier of a session.
///
/// Consumers never parse the identifier for structure; it is only compared
/// for equality or used as a storage key. The Redis-backed store namespaces
/// fresh identifiers with a key prefix, and the prefixed string is the
/// identifier handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a new random session identifier.
    ///
    /// Uses 128 bits of randomness, hex-encoded. Collisions are not checked
    /// for; at this entropy a collision silently overwriting an existing
    /// session is academic.
    #[must_use]
    pub fn generate() -> Self {
        let bytes: [u8; 16] = rand::random();

        let mut raw = String::with_capacity(bytes.len() * 2);
        for byte in bytes {
            let _ = write!(raw, "{byte:02x}");
        }

        Self(raw)
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier, returning the underlying string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for SessionId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Core State Types
// ═══════════════════════════════════════════════════════════════════════

/// A user session.
///
/// Binds an opaque identifier to a user identity, a friendly label, a
/// last-access timestamp, and caller-typed metadata. `user_id` and `meta`
/// are set once at creation; only `last_used_at` changes afterwards, as a
/// side effect of reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session<U, M> {
    /// Unique session identifier.
    pub id: SessionId,

    /// A friendly label of the session.
    pub label: String,

    /// The ID of the user that the session is associated with.
    pub user_id: U,

    /// When the session was last accessed.
    pub last_used_at: DateTime<Utc>,

    /// Additional metadata associated with the session.
    pub meta: M,
}

/// Input for creating a session.
///
/// The store generates the identifier and the initial `last_used_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSession<U, M> {
    /// The ID of the user the session belongs to.
    pub user_id: U,

    /// A friendly label of the session.
    pub label: String,

    /// Additional metadata to associate with the session.
    pub meta: M,
}
