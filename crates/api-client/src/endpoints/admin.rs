//! Back-office endpoints
//!
//! Maps to the `/admin/*` routes. All of them require an admin-role token;
//! a non-admin token receives a 403 which surfaces as a definitive client
//! error.

use crate::client::HbnbClient;
use crate::endpoints::auth::UserProfile;
use crate::endpoints::bookings::Booking;
use crate::endpoints::reviews::Review;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Back-office API interface
#[derive(Clone)]
pub struct AdminApi {
    client: HbnbClient,
}

impl AdminApi {
    /// Create a new back-office API interface
    pub(crate) fn new(client: HbnbClient) -> Self {
        Self { client }
    }

    /// Platform-wide counters for the dashboard
    ///
    /// GET /admin/dashboard
    pub async fn dashboard(&self) -> ApiResult<DashboardStats> {
        self.client.get("/admin/dashboard", &[]).await
    }

    /// List users with optional role filter and name/email search
    ///
    /// GET /admin/users
    pub async fn list_users(
        &self,
        search: Option<&str>,
        role: Option<&str>,
        page: u32,
    ) -> ApiResult<AdminUsersResponse> {
        self.client
            .get(
                "/admin/users",
                &[
                    ("search", search.map(str::to_string)),
                    ("role", role.map(str::to_string)),
                    ("page", Some(page.to_string())),
                ],
            )
            .await
    }

    /// Update a user's editable fields
    ///
    /// PUT /admin/users/<id>
    pub async fn update_user(
        &self,
        id: &str,
        update: &serde_json::Value,
    ) -> ApiResult<AdminUserResponse> {
        self.client.put(&format!("/admin/users/{id}"), update).await
    }

    /// Deactivate a user account
    ///
    /// DELETE /admin/users/<id>
    pub async fn delete_user(&self, id: &str) -> ApiResult<AdminMessageResponse> {
        self.client.delete(&format!("/admin/users/{id}")).await
    }

    /// List bookings, optionally filtered by status
    ///
    /// GET /admin/bookings
    pub async fn list_bookings(
        &self,
        status: Option<&str>,
        page: u32,
    ) -> ApiResult<AdminBookingsResponse> {
        self.client
            .get(
                "/admin/bookings",
                &[
                    ("status", status.map(str::to_string)),
                    ("page", Some(page.to_string())),
                ],
            )
            .await
    }

    /// Force a booking into a new lifecycle status
    ///
    /// PUT /admin/bookings/<id>
    pub async fn update_booking_status(
        &self,
        id: &str,
        status: &str,
    ) -> ApiResult<AdminBookingResponse> {
        let body = json!({ "status": status });
        self.client.put(&format!("/admin/bookings/{id}"), &body).await
    }

    /// List reviews filtered by moderation state
    ///
    /// GET /admin/reviews
    pub async fn list_reviews(&self, approved: Option<bool>) -> ApiResult<AdminReviewsResponse> {
        self.client
            .get(
                "/admin/reviews",
                &[("approved", approved.map(|v| v.to_string()))],
            )
            .await
    }

    /// Approve or reject a review
    ///
    /// PUT /admin/reviews/<id>
    pub async fn moderate_review(
        &self,
        id: &str,
        approved: bool,
    ) -> ApiResult<AdminMessageResponse> {
        let body = json!({ "is_approved": approved });
        self.client.put(&format!("/admin/reviews/{id}"), &body).await
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Platform-wide dashboard counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Registered users
    pub users: u64,
    /// Listed places
    pub places: u64,
    /// Bookings ever made
    pub bookings: u64,
    /// Reviews ever written
    pub reviews: u64,
    /// Amenity catalog size
    pub amenities: u64,
    /// City catalog size
    pub cities: u64,
    /// Property type catalog size
    pub property_types: u64,
    /// Bookings currently confirmed or checked in
    pub active_bookings: u64,
    /// Completed payment volume
    pub total_revenue: f64,
    /// Bookings awaiting owner confirmation
    pub pending_bookings: u64,
}

/// Paginated user list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUsersResponse {
    /// Users on this page (private view)
    pub users: Vec<UserProfile>,
    /// Total match count
    pub total: u64,
    /// Total page count
    pub pages: u32,
    /// The page served
    pub page: u32,
}

/// Single-user mutation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUserResponse {
    /// Informational message
    pub message: Option<String>,
    /// Updated user
    pub user: UserProfile,
}

/// Paginated booking list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminBookingsResponse {
    /// Bookings on this page
    pub bookings: Vec<Booking>,
    /// Total match count
    pub total: u64,
    /// Total page count
    pub pages: u32,
    /// The page served
    pub page: u32,
}

/// Single-booking mutation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminBookingResponse {
    /// Informational message
    pub message: Option<String>,
    /// Updated booking
    pub booking: Booking,
}

/// Review moderation list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminReviewsResponse {
    /// Reviews on this page
    pub reviews: Vec<Review>,
    /// Total match count
    pub total: Option<u64>,
    /// Total page count
    pub pages: Option<u32>,
}

/// Message-only response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminMessageResponse {
    /// Informational message
    pub message: Option<String>,
}
