//! Resilient API client for the HBnB booking platform
//!
//! This crate provides a unified, resilient HTTP client for the HBnB REST
//! API, covering the public browsing/booking surface and the administrative
//! back-office.
//!
//! # Features
//!
//! - **Environment-based configuration**: load the API root and timeouts
//!   from environment variables
//! - **Bounded retry with linear backoff**: timeouts, transport failures,
//!   and 5xx responses are re-attempted; definitive 4xx failures are not
//! - **Uniform error shape**: every terminal failure carries an optional
//!   status plus the server's error fields
//! - **Session-expiry signaling**: a 401 clears the injected session store
//!   and broadcasts an event the calling layer can turn into navigation
//! - **Request correlation**: unique IDs on every request for debugging
//!
//! # Example
//!
//! ```rust,no_run
//! use hbnb_api_client::{ClientConfig, HbnbClient};
//! use hbnb_core::session::FileSessionStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(FileSessionStore::default_location()?);
//!     let client = HbnbClient::with_config(ClientConfig::from_env()?, store)?;
//!
//!     // Log in and persist the session
//!     let login = client.auth().login("guest@hbnb.sa", "secret").await?;
//!     println!("Welcome {}", login.user.first_name);
//!
//!     // Browse featured places
//!     let featured = client.places().featured().await?;
//!     println!("{} featured places", featured.places.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod redirect;

pub use client::HbnbClient;
pub use config::{ClientConfig, Environment};
pub use error::{ApiError, ApiResult, ErrorBody};
pub use redirect::{RedirectPolicy, SessionExpired, SessionExpiredReceiver};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::HbnbClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::{
        AdminApi, AuthApi, BookingsApi, CitiesApi, MediaApi, PlacesApi, ReviewsApi,
    };
    pub use crate::error::{ApiError, ApiResult, ErrorBody};
    pub use crate::redirect::{RedirectPolicy, SessionExpired};
}
