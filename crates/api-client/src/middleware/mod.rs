//! Building blocks for request/response processing
//!
//! This module re-exports the resilience and session components from
//! `hbnb-core`.

// Re-export from hbnb-core for convenience
pub use hbnb_core::retry::RetryConfig;
pub use hbnb_core::session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
