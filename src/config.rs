//! Session store configuration.
//!
//! Key-layout values should be provided by the embedding application; the
//! defaults reproduce the standard layout in [`crate::constants`].

use crate::constants::keys;

/// Key-layout configuration for the Redis-backed session store.
///
/// # Examples
///
/// ```
/// use sessionkit::RedisSessionConfig;
///
/// let config = RedisSessionConfig::default()
///     .with_session_prefix("myapp.session:")
///     .with_sessions_key("myapp.sessions");
///
/// assert_eq!(config.session_prefix, "myapp.session:");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisSessionConfig {
    /// Prefix added to each session identifier key.
    pub session_prefix: String,

    /// Key of the set tracking all active session identifiers.
    pub sessions_key: String,
}

impl RedisSessionConfig {
    /// Set the prefix added to session identifier keys.
    #[must_use]
    pub fn with_session_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.session_prefix = prefix.into();
        self
    }

    /// Set the key of the tracking set.
    #[must_use]
    pub fn with_sessions_key(mut self, key: impl Into<String>) -> Self {
        self.sessions_key = key.into();
        self
    }
}

impl Default for RedisSessionConfig {
    fn default() -> Self {
        Self {
            session_prefix: keys::SESSION_PREFIX.to_string(),
            sessions_key: keys::SESSIONS.to_string(),
        }
    }
}
