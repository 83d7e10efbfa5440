//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for a set of backend routes.
//!
//! ## Mapping to the HBnB REST API
//!
//! | Module | Backend routes | Description |
//! |--------|---------------|-------------|
//! | `auth` | `/auth/*` | Login, OTP, magic link, profile |
//! | `places` | `/places*` | Search, featured rails, detail, favorites |
//! | `cities` | `/cities*` | City list and search |
//! | `reviews` | `/places/<id>/reviews` | Guest reviews |
//! | `bookings` | `/bookings*`, `/owner/bookings*` | Availability, booking lifecycle |
//! | `media` | `/places/<id>/media`, `/media/<id>` | Photo upload and removal |
//! | `admin` | `/admin/*` | Back-office dashboard and moderation |

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod cities;
pub mod media;
pub mod places;
pub mod reviews;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use bookings::BookingsApi;
pub use cities::CitiesApi;
pub use media::MediaApi;
pub use places::PlacesApi;
pub use reviews::ReviewsApi;
