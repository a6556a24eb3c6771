//! Storage provider contracts.
//!
//! Providers are **interfaces**, not implementations. Application code
//! depends on these traits, and the embedding application picks a concrete
//! backend from [`crate::stores`]. This enables:
//!
//! - **Testing**: session logic runs against the in-memory store at memory speed
//! - **Production**: the Redis store persists sessions across processes
//!
//! No caller depends on which backend is active; the backends are drop-in
//! substitutes for one another.

pub mod session;

// Re-export provider traits
pub use session::SessionStore;
