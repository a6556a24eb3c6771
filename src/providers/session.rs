//! Session store trait.

use crate::error::Result;
use crate::state::{NewSession, Session, SessionId};

/// Session store.
///
/// This trait abstracts over session storage. It is generic over the
/// caller's user-id type `U` and metadata type `M`; concrete backends add
/// the bounds their storage model needs.
///
/// # Contract
///
/// - Lookups on a `None` or unknown session id resolve to `Ok(None)`,
///   never an error.
/// - A successful read of the user id or metadata touches the session's
///   `last_used_at` timestamp.
/// - [`list_sessions`](Self::list_sessions) orders by `last_used_at`
///   descending; [`get_user_sessions`](Self::get_user_sessions) preserves
///   that relative order.
/// - Destroying a session is idempotent.
pub trait SessionStore<U, M>: Send + Sync {
    /// Returns the ID of the authenticated user if there exists one for a
    /// given session.
    ///
    /// Touches the session's `last_used_at` on success.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying storage fails. An absent session is
    /// `Ok(None)`, not an error.
    fn get_user_id_from_session(
        &self,
        session_id: Option<&SessionId>,
    ) -> impl std::future::Future<Output = Result<Option<U>>> + Send;

    /// Returns meta information associated with a given session.
    ///
    /// Touches the session's `last_used_at` on success.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying storage fails or a stored metadata
    /// payload cannot be decoded. An absent session is `Ok(None)`.
    fn get_session_meta(
        &self,
        session_id: Option<&SessionId>,
    ) -> impl std::future::Future<Output = Result<Option<M>>> + Send;

    /// Creates a new session for a given user and returns the session
    /// identifier.
    ///
    /// The store generates a fresh identifier and sets `last_used_at` to
    /// now.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying storage fails.
    fn create_session(
        &self,
        new_session: NewSession<U, M>,
    ) -> impl std::future::Future<Output = Result<SessionId>> + Send;

    /// Destroys a session if there exists one.
    ///
    /// Destroying a nonexistent session is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying storage fails.
    fn destroy_session(
        &self,
        session_id: &SessionId,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Returns all sessions associated with a given user.
    ///
    /// The result is the [`list_sessions`](Self::list_sessions) output
    /// filtered to one user, in the same relative order.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying storage fails or a stored record
    /// cannot be decoded.
    fn get_user_sessions(
        &self,
        user_id: &U,
    ) -> impl std::future::Future<Output = Result<Vec<Session<U, M>>>> + Send;

    /// Lists all sessions in the system, most recently used first.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying storage fails or a stored record
    /// cannot be decoded.
    fn list_sessions(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Session<U, M>>>> + Send;
}
