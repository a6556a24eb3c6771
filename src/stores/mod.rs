//! Storage implementations for the session contract.
//!
//! - **In-memory store** - volatile, process-local map; no persistence
//!   across restarts, no cross-process sharing
//! - **Redis store** - persistent hash records plus a tracking set for
//!   enumeration

pub mod memory;
pub mod session_redis;

// Re-exports
pub use memory::InMemorySessionStore;
pub use session_redis::RedisSessionStore;
