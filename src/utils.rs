//! Bearer-token helpers for session identifiers.
//!
//! The token transport format is a bearer-style string: the HTTP
//! `Authorization` header value is `"Bearer " + session_id`, and the token
//! itself is the raw session id.

use crate::state::SessionId;

/// HTTP Authorization scheme stripped from bearer tokens.
const BEARER_PREFIX: &str = "Bearer ";

/// Returns the session ID carried by an HTTP `Authorization` header, if the
/// header contains one.
///
/// An absent or empty header yields `None`.
///
/// NOTE: The first `"Bearer "` occurrence is removed wherever it appears in
/// the header, not only as a leading prefix. Tokens are opaque random hex,
/// so a legitimate token never contains the scheme string itself.
///
/// # Examples
///
/// ```
/// use sessionkit::utils::session_id_from_auth_token;
///
/// let session_id = session_id_from_auth_token(Some("Bearer abc123"));
/// assert_eq!(session_id.as_ref().map(|id| id.as_str()), Some("abc123"));
///
/// assert!(session_id_from_auth_token(None).is_none());
/// assert!(session_id_from_auth_token(Some("")).is_none());
/// ```
#[must_use]
pub fn session_id_from_auth_token(header: Option<&str>) -> Option<SessionId> {
    let header = header?;
    if header.is_empty() {
        return None;
    }

    let raw = header.replacen(BEARER_PREFIX, "", 1);
    Some(SessionId::from(raw))
}

/// Returns the `Authorization` token that should be used to associate a
/// given session.
///
/// The token is the raw session id string.
#[must_use]
pub fn auth_token_for_session_id(session_id: &SessionId) -> String {
    session_id.as_str().to_string()
}

/// Wraps a raw string into a [`SessionId`].
///
/// No validation is performed; the caller vouches for the string.
#[must_use]
pub fn to_session_id(raw: impl Into<String>) -> SessionId {
    SessionId::from(raw.into())
}
