//! # sessionkit
//!
//! Minimal session management behind a storage-agnostic contract.
//!
//! ## Features
//!
//! - **Storage-agnostic**: one [`SessionStore`] contract, interchangeable backends
//! - **In-memory**: volatile, process-local store for tests and single-process apps
//! - **Redis**: persistent store built on hash records plus a tracking set
//! - **Typed**: generic over the caller's user-id and metadata types
//!
//! ## Behavior contract
//!
//! Both backends agree on observable behavior:
//!
//! - An absent or unknown session id resolves to `None`, never an error.
//! - Reading the user id or metadata of a live session touches its
//!   `last_used_at` timestamp.
//! - Enumeration yields the most recently used session first.
//! - Destroying a session is idempotent.
//!
//! ## Example
//!
//! ```no_run
//! use sessionkit::{InMemorySessionStore, NewSession, SessionStore};
//!
//! # async fn example() -> sessionkit::Result<()> {
//! let sessions = InMemorySessionStore::<String, ()>::new();
//!
//! let session_id = sessions
//!     .create_session(NewSession {
//!         user_id: "user-1".to_string(),
//!         label: "cli".to_string(),
//!         meta: (),
//!     })
//!     .await?;
//!
//! let user_id = sessions.get_user_id_from_session(Some(&session_id)).await?;
//! assert_eq!(user_id.as_deref(), Some("user-1"));
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod config;
pub mod constants;
pub mod error;
pub mod providers;
pub mod state;
pub mod stores;
pub mod utils;

// Re-export main types for convenience
pub use config::RedisSessionConfig;
pub use error::{Result, SessionError};
pub use providers::SessionStore;
pub use state::{NewSession, Session, SessionId};
pub use stores::{InMemorySessionStore, RedisSessionStore};
