//! Redis-based session store implementation.
//!
//! # Architecture
//!
//! Sessions are stored in Redis with:
//! - **Session record**: hash at `auth.session:{hex}` with fields `user`,
//!   `label`, `lastUsedAt` (ISO-8601 UTC string), `meta` (JSON string)
//! - **Tracking set**: `auth.sessions` (Set) → all live session keys,
//!   used solely to enable enumeration without a key scan
//!
//! The prefixed key doubles as the session identifier handed to callers.
//!
//! Creating a session writes the hash and then adds the key to the tracking
//! set; destroying deletes the hash fields and then removes the key. The
//! two steps are not transactional. A crash in between leaves an orphaned
//! tracking entry, which enumeration skips (a record without a `user` field
//! is treated as nonexistent).
//!
//! # Connection
//!
//! The store connects lazily: constructing it performs no I/O, and every
//! operation first ensures an active connection, establishing one on
//! demand. Timeouts and retries are the Redis client's concern.
//!
//! # Example
//!
//! ```no_run
//! use sessionkit::RedisSessionStore;
//!
//! # fn example() -> sessionkit::Result<()> {
//! let sessions: RedisSessionStore<String, serde_json::Value> =
//!     RedisSessionStore::from_url("redis://127.0.0.1:6379")?;
//! # Ok(())
//! # }
//! ```

use crate::config::RedisSessionConfig;
use crate::constants::fields;
use crate::error::Result;
use crate::providers::SessionStore;
use crate::state::{NewSession, Session, SessionId};
use chrono::{DateTime, SecondsFormat, Utc};
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::marker::PhantomData;
use tokio::sync::OnceCell;

/// Redis-based session store.
///
/// Generic over the caller's user-id type `U` and metadata type `M`. The
/// user id travels as the raw string in the `user` hash field, so `U` must
/// convert to and from a string; metadata is JSON-encoded via serde.
///
/// # Thread Safety
///
/// This type is `Clone` and can be safely shared across tasks. Clones share
/// the same `ConnectionManager` once a connection has been established.
pub struct RedisSessionStore<U, M> {
    /// Redis client; no connection is held until first use.
    client: Client,

    /// Connection manager, established on first use.
    connection: OnceCell<ConnectionManager>,

    /// Key-layout configuration.
    config: RedisSessionConfig,

    _marker: PhantomData<fn() -> (U, M)>,
}

impl<U, M> RedisSessionStore<U, M> {
    /// Create a new Redis session store with the standard key layout.
    ///
    /// No connection is established; see [`connect`](Self::connect).
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_config(client, RedisSessionConfig::default())
    }

    /// Create a new Redis session store with a custom key layout.
    #[must_use]
    pub fn with_config(client: Client, config: RedisSessionConfig) -> Self {
        Self {
            client,
            connection: OnceCell::new(),
            config,
            _marker: PhantomData,
        }
    }

    /// Create a new Redis session store from a connection URL.
    ///
    /// # Arguments
    ///
    /// * `redis_url` - Redis connection URL (e.g., "redis://127.0.0.1:6379")
    ///
    /// # Errors
    ///
    /// Returns error if the URL is malformed. Connecting happens lazily, so
    /// an unreachable server surfaces on the first operation instead.
    pub fn from_url(redis_url: &str) -> Result<Self> {
        Ok(Self::new(Client::open(redis_url)?))
    }

    /// Ensure an active connection to Redis, establishing one if needed.
    ///
    /// Every operation does this implicitly; calling it up front is
    /// optional and idempotent.
    ///
    /// # Errors
    ///
    /// Returns error if connection to Redis fails.
    pub async fn connect(&self) -> Result<()> {
        self.connection().await?;
        Ok(())
    }

    /// Get the shared connection manager, connecting on first use.
    async fn connection(&self) -> Result<ConnectionManager> {
        let manager = self
            .connection
            .get_or_try_init(|| ConnectionManager::new(self.client.clone()))
            .await?;

        Ok(manager.clone())
    }

    /// Returns a unique session id, namespaced under the configured prefix.
    ///
    /// The prefixed string is used directly as the Redis key.
    fn fresh_session_id(&self) -> SessionId {
        let token = SessionId::generate();
        SessionId::from(format!("{}{token}", self.config.session_prefix))
    }
}

impl<U, M> Clone for RedisSessionStore<U, M> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            connection: self.connection.clone(),
            config: self.config.clone(),
            _marker: PhantomData,
        }
    }
}

/// ISO-8601 UTC with millisecond precision and a `Z` suffix.
fn format_last_used_at(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_last_used_at(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

impl<U, M> SessionStore<U, M> for RedisSessionStore<U, M>
where
    U: AsRef<str> + From<String> + Clone + PartialEq + Send + Sync,
    M: Serialize + DeserializeOwned + Send + Sync,
{
    async fn get_user_id_from_session(
        &self,
        session_id: Option<&SessionId>,
    ) -> Result<Option<U>> {
        let Some(session_id) = session_id else {
            return Ok(None);
        };

        let mut conn = self.connection().await?;

        let user_id: Option<String> = conn.hget(session_id.as_str(), fields::USER).await?;
        let Some(user_id) = user_id else {
            return Ok(None);
        };

        let _: () = conn
            .hset(
                session_id.as_str(),
                fields::LAST_USED_AT,
                format_last_used_at(Utc::now()),
            )
            .await?;

        tracing::debug!(session_id = %session_id, "touched session on user id read");

        Ok(Some(U::from(user_id)))
    }

    async fn get_session_meta(&self, session_id: Option<&SessionId>) -> Result<Option<M>> {
        let Some(session_id) = session_id else {
            return Ok(None);
        };

        let mut conn = self.connection().await?;

        let meta: Option<String> = conn.hget(session_id.as_str(), fields::META).await?;
        let Some(meta) = meta else {
            return Ok(None);
        };

        let _: () = conn
            .hset(
                session_id.as_str(),
                fields::LAST_USED_AT,
                format_last_used_at(Utc::now()),
            )
            .await?;

        tracing::debug!(session_id = %session_id, "touched session on meta read");

        Ok(Some(serde_json::from_str(&meta)?))
    }

    async fn create_session(&self, new_session: NewSession<U, M>) -> Result<SessionId> {
        let session_id = self.fresh_session_id();

        let mut conn = self.connection().await?;

        let meta = serde_json::to_string(&new_session.meta)?;
        let last_used_at = format_last_used_at(Utc::now());

        // NOTE: Make sure the fields match the ones in `destroy_session`!
        let _: () = conn
            .hset_multiple(
                session_id.as_str(),
                &[
                    (fields::USER, new_session.user_id.as_ref()),
                    (fields::LABEL, new_session.label.as_str()),
                    (fields::LAST_USED_AT, last_used_at.as_str()),
                    (fields::META, meta.as_str()),
                ],
            )
            .await?;

        let _: () = conn
            .sadd(self.config.sessions_key.as_str(), session_id.as_str())
            .await?;

        tracing::info!(
            session_id = %session_id,
            user_id = new_session.user_id.as_ref(),
            "created session"
        );

        Ok(session_id)
    }

    async fn destroy_session(&self, session_id: &SessionId) -> Result<()> {
        let mut conn = self.connection().await?;

        // NOTE: Make sure to delete every field in the session hash!
        let _: () = conn.hdel(session_id.as_str(), &fields::ALL[..]).await?;

        let _: () = conn
            .srem(self.config.sessions_key.as_str(), session_id.as_str())
            .await?;

        tracing::info!(session_id = %session_id, "destroyed session");

        Ok(())
    }

    async fn get_user_sessions(&self, user_id: &U) -> Result<Vec<Session<U, M>>> {
        let all_sessions = self.list_sessions().await?;

        Ok(all_sessions
            .into_iter()
            .filter(|session| session.user_id == *user_id)
            .collect())
    }

    async fn list_sessions(&self) -> Result<Vec<Session<U, M>>> {
        let mut conn = self.connection().await?;

        let session_ids: Vec<String> =
            conn.smembers(self.config.sessions_key.as_str()).await?;

        let mut sessions = Vec::with_capacity(session_ids.len());

        for session_id in session_ids {
            let record: HashMap<String, String> = conn.hgetall(session_id.as_str()).await?;

            // A record without a `user` field is a leftover tracking-set
            // entry, e.g. from a crash between the two deletes in
            // `destroy_session`. Treat it as nonexistent.
            let Some(user_id) = record.get(fields::USER) else {
                continue;
            };

            let last_used_at =
                parse_last_used_at(record.get(fields::LAST_USED_AT).map_or("", String::as_str))?;
            let meta = serde_json::from_str(record.get(fields::META).map_or("", String::as_str))?;

            sessions.push(Session {
                id: SessionId::from(session_id),
                label: record.get(fields::LABEL).cloned().unwrap_or_default(),
                user_id: U::from(user_id.clone()),
                last_used_at,
                meta,
            });
        }

        sessions.sort_by(|a, b| b.last_used_at.cmp(&a.last_used_at));

        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::keys;

    // Note: These tests require a running Redis instance
    // Run with: docker run -d -p 6379:6379 redis:7-alpine

    fn store(namespace: &str) -> RedisSessionStore<String, serde_json::Value> {
        let config = RedisSessionConfig::default()
            .with_session_prefix(format!("test.{namespace}.session:"))
            .with_sessions_key(format!("test.{namespace}.sessions"));

        #[allow(clippy::unwrap_used)]
        let client = Client::open("redis://127.0.0.1:6379").unwrap();

        RedisSessionStore::with_config(client, config)
    }

    #[test]
    fn test_fresh_session_id_is_prefixed() {
        #[allow(clippy::unwrap_used)]
        let client = Client::open("redis://127.0.0.1:6379").unwrap();
        let sessions: RedisSessionStore<String, ()> = RedisSessionStore::new(client);

        let session_id = sessions.fresh_session_id();
        assert!(session_id.as_str().starts_with(keys::SESSION_PREFIX));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_last_used_at_round_trips() {
        let formatted = format_last_used_at(Utc::now());
        assert!(formatted.ends_with('Z'));

        let parsed = parse_last_used_at(&formatted).unwrap();
        assert_eq!(format_last_used_at(parsed), formatted);
    }

    #[tokio::test]
    #[ignore] // Requires Redis running
    #[allow(clippy::unwrap_used)]
    async fn test_redis_session_lifecycle() {
        let sessions = store("lifecycle");

        let session_id = sessions
            .create_session(NewSession {
                user_id: "user-id".to_string(),
                label: "test".to_string(),
                meta: serde_json::json!({ "device": "laptop" }),
            })
            .await
            .unwrap();

        // Lookup touches and returns the stored user id
        let user_id = sessions
            .get_user_id_from_session(Some(&session_id))
            .await
            .unwrap();
        assert_eq!(user_id.as_deref(), Some("user-id"));

        // Metadata survives the JSON round-trip
        let meta = sessions.get_session_meta(Some(&session_id)).await.unwrap();
        assert_eq!(meta, Some(serde_json::json!({ "device": "laptop" })));

        // Enumeration sees the session
        let listed = sessions.list_sessions().await.unwrap();
        assert!(listed.iter().any(|session| session.id == session_id));

        // Destroy, then verify it behaves as if it never existed
        sessions.destroy_session(&session_id).await.unwrap();

        let user_id = sessions
            .get_user_id_from_session(Some(&session_id))
            .await
            .unwrap();
        assert_eq!(user_id, None);

        let listed = sessions.list_sessions().await.unwrap();
        assert!(!listed.iter().any(|session| session.id == session_id));
    }

    #[tokio::test]
    #[ignore] // Requires Redis running
    #[allow(clippy::unwrap_used)]
    async fn test_unknown_session_id_resolves_to_none() {
        let sessions = store("unknown");

        let unknown = SessionId::from("test.unknown.session:does-not-exist");

        assert_eq!(
            sessions.get_user_id_from_session(Some(&unknown)).await.unwrap(),
            None
        );
        assert_eq!(sessions.get_session_meta(Some(&unknown)).await.unwrap(), None);
    }

    #[tokio::test]
    #[ignore] // Requires Redis running
    #[allow(clippy::unwrap_used)]
    async fn test_orphaned_tracking_entry_is_skipped() {
        let sessions = store("orphan");

        let session_id = sessions
            .create_session(NewSession {
                user_id: "user-id".to_string(),
                label: "live".to_string(),
                meta: serde_json::json!({}),
            })
            .await
            .unwrap();

        // Simulate a crash between the HDEL and SREM of destroy_session:
        // a tracking entry whose hash record no longer exists.
        let orphan = "test.orphan.session:dangling";
        let mut conn = sessions.connection().await.unwrap();
        let _: () = conn
            .sadd(sessions.config.sessions_key.as_str(), orphan)
            .await
            .unwrap();

        let listed = sessions.list_sessions().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, session_id);

        // Cleanup
        let _: () = conn
            .srem(sessions.config.sessions_key.as_str(), orphan)
            .await
            .unwrap();
        sessions.destroy_session(&session_id).await.unwrap();
    }
}
