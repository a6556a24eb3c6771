//! Session storage constants.
//!
//! This module pins down the wire format of the Redis-backed store: the key
//! layout and the hash fields of a session record.

/// Redis key layout for the persistent session store.
pub mod keys {
    /// Key of the set containing all active session identifiers.
    pub const SESSIONS: &str = "auth.sessions";

    /// Prefix added to each session identifier key.
    pub const SESSION_PREFIX: &str = "auth.session:";
}

/// Hash fields of a stored session record.
pub mod fields {
    /// The user the session belongs to.
    pub const USER: &str = "user";

    /// Human-readable session label.
    pub const LABEL: &str = "label";

    /// Last-access timestamp, ISO-8601 UTC.
    pub const LAST_USED_AT: &str = "lastUsedAt";

    /// JSON-encoded session metadata.
    pub const META: &str = "meta";

    /// Every hash field a session record carries.
    ///
    /// Destroying a session deletes exactly this list, so creation and
    /// destruction can never drift apart.
    pub const ALL: [&str; 4] = [USER, LABEL, LAST_USED_AT, META];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_prefix_is_namespaced() {
        assert!(keys::SESSION_PREFIX.ends_with(':'));
        assert_ne!(keys::SESSION_PREFIX, keys::SESSIONS);
    }

    #[test]
    fn test_all_fields_listed() {
        assert_eq!(
            fields::ALL,
            [fields::USER, fields::LABEL, fields::LAST_USED_AT, fields::META]
        );
    }
}
