//! In-memory session store implementation.
//!
//! Keeps sessions in a process-local map. Volatile: nothing survives a
//! restart, and nothing is shared across processes. The map is an
//! explicitly-owned, injectable object; clones share the same state.

use crate::error::{Result, SessionError};
use crate::providers::SessionStore;
use crate::state::{NewSession, Session, SessionId};
use chrono::Utc;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// In-memory session store.
///
/// A single `Mutex` guards the whole map, so callers get
/// single-writer-at-a-time access without further coordination. Suitable
/// for tests and single-process applications; use
/// [`RedisSessionStore`](crate::stores::RedisSessionStore) when sessions
/// must outlive the process.
#[derive(Debug)]
pub struct InMemorySessionStore<U, M> {
    sessions: Arc<Mutex<HashMap<SessionId, Session<U, M>>>>,
}

impl<U, M> InMemorySessionStore<U, M> {
    /// Create a new, empty in-memory session store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Get count of stored sessions (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if the lock is poisoned.
    pub fn session_count(&self) -> Result<usize> {
        Ok(self
            .sessions
            .lock()
            .map_err(|_| SessionError::Internal("session map lock poisoned".to_string()))?
            .len())
    }
}

impl<U, M> Default for InMemorySessionStore<U, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U, M> Clone for InMemorySessionStore<U, M> {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
        }
    }
}

impl<U, M> SessionStore<U, M> for InMemorySessionStore<U, M>
where
    U: Clone + PartialEq + Send + Sync,
    M: Clone + Send + Sync,
{
    fn get_user_id_from_session(
        &self,
        session_id: Option<&SessionId>,
    ) -> impl Future<Output = Result<Option<U>>> + Send {
        let sessions = Arc::clone(&self.sessions);
        let session_id = session_id.cloned();

        async move {
            let Some(session_id) = session_id else {
                return Ok(None);
            };

            let mut sessions_guard = sessions
                .lock()
                .map_err(|_| SessionError::Internal("session map lock poisoned".to_string()))?;

            let Some(session) = sessions_guard.get_mut(&session_id) else {
                return Ok(None);
            };

            session.last_used_at = Utc::now();
            Ok(Some(session.user_id.clone()))
        }
    }

    fn get_session_meta(
        &self,
        session_id: Option<&SessionId>,
    ) -> impl Future<Output = Result<Option<M>>> + Send {
        let sessions = Arc::clone(&self.sessions);
        let session_id = session_id.cloned();

        async move {
            let Some(session_id) = session_id else {
                return Ok(None);
            };

            let mut sessions_guard = sessions
                .lock()
                .map_err(|_| SessionError::Internal("session map lock poisoned".to_string()))?;

            let Some(session) = sessions_guard.get_mut(&session_id) else {
                return Ok(None);
            };

            session.last_used_at = Utc::now();
            Ok(Some(session.meta.clone()))
        }
    }

    fn create_session(
        &self,
        new_session: NewSession<U, M>,
    ) -> impl Future<Output = Result<SessionId>> + Send {
        let sessions = Arc::clone(&self.sessions);

        async move {
            let session_id = SessionId::generate();

            let mut sessions_guard = sessions
                .lock()
                .map_err(|_| SessionError::Internal("session map lock poisoned".to_string()))?;

            sessions_guard.insert(
                session_id.clone(),
                Session {
                    id: session_id.clone(),
                    label: new_session.label,
                    user_id: new_session.user_id,
                    last_used_at: Utc::now(),
                    meta: new_session.meta,
                },
            );

            Ok(session_id)
        }
    }

    fn destroy_session(
        &self,
        session_id: &SessionId,
    ) -> impl Future<Output = Result<()>> + Send {
        let sessions = Arc::clone(&self.sessions);
        let session_id = session_id.clone();

        async move {
            sessions
                .lock()
                .map_err(|_| SessionError::Internal("session map lock poisoned".to_string()))?
                .remove(&session_id);

            Ok(())
        }
    }

    fn get_user_sessions(
        &self,
        user_id: &U,
    ) -> impl Future<Output = Result<Vec<Session<U, M>>>> + Send {
        let sessions = Arc::clone(&self.sessions);
        let user_id = user_id.clone();

        async move {
            let sessions_guard = sessions
                .lock()
                .map_err(|_| SessionError::Internal("session map lock poisoned".to_string()))?;

            let mut user_sessions: Vec<Session<U, M>> = sessions_guard
                .values()
                .filter(|session| session.user_id == user_id)
                .cloned()
                .collect();

            user_sessions.sort_by(|a, b| b.last_used_at.cmp(&a.last_used_at));

            Ok(user_sessions)
        }
    }

    fn list_sessions(&self) -> impl Future<Output = Result<Vec<Session<U, M>>>> + Send {
        let sessions = Arc::clone(&self.sessions);

        async move {
            let sessions_guard = sessions
                .lock()
                .map_err(|_| SessionError::Internal("session map lock poisoned".to_string()))?;

            let mut all_sessions: Vec<Session<U, M>> =
                sessions_guard.values().cloned().collect();

            // Most recently used first. The map's own iteration order is
            // arbitrary and carries no meaning.
            all_sessions.sort_by(|a, b| b.last_used_at.cmp(&a.last_used_at));

            Ok(all_sessions)
        }
    }
}
