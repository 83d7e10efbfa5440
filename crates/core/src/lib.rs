//! Core utilities for the HBnB client
//!
//! This crate provides shared functionality used by the API client and the
//! command-line front end:
//!
//! - **Error handling**: structured errors for storage and configuration
//! - **Retry policy**: bounded retry with linear backoff
//! - **Session storage**: credential/profile persistence behind a trait
//! - **Localized messages**: Arabic/English strings for terminal errors
//!
//! # Example
//!
//! ```rust,no_run
//! use hbnb_core::session::{FileSessionStore, SessionStore};
//!
//! let store = FileSessionStore::default_location().expect("No config directory");
//! if let Some(token) = store.token() {
//!     println!("Logged in with token {token}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod i18n;
pub mod retry;
pub mod session;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::i18n::Lang;
    pub use crate::retry::RetryConfig;
    pub use crate::session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
}
