//! Booking endpoints
//!
//! Maps to the `/bookings*` and `/owner/bookings*` routes:
//! - Availability and price quoting before booking
//! - Booking creation and lifecycle (cancel, owner confirm)
//!
//! Stays of 30 nights or more are quoted as monthly bookings with the
//! place's monthly discount applied.

use crate::client::HbnbClient;
use crate::endpoints::places::PlaceCard;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Bookings API interface
#[derive(Clone)]
pub struct BookingsApi {
    client: HbnbClient,
}

impl BookingsApi {
    /// Create a new bookings API interface
    pub(crate) fn new(client: HbnbClient) -> Self {
        Self { client }
    }

    /// Check availability and get a price quote for a date range
    ///
    /// POST /bookings/check-availability
    pub async fn check_availability(
        &self,
        place_id: &str,
        check_in: &str,
        check_out: &str,
    ) -> ApiResult<AvailabilityResponse> {
        let body = json!({
            "place_id": place_id,
            "check_in": check_in,
            "check_out": check_out,
        });
        self.client.post("/bookings/check-availability", &body).await
    }

    /// Create a booking
    ///
    /// POST /bookings
    pub async fn create(&self, request: &CreateBookingRequest) -> ApiResult<CreateBookingResponse> {
        self.client.post("/bookings", request).await
    }

    /// List the authenticated guest's bookings
    ///
    /// GET /bookings
    pub async fn list(&self) -> ApiResult<ListBookingsResponse> {
        self.client.get("/bookings", &[]).await
    }

    /// Fetch a single booking by ID
    ///
    /// GET /bookings/<id>
    pub async fn get(&self, id: &str) -> ApiResult<Booking> {
        self.client.get(&format!("/bookings/{id}"), &[]).await
    }

    /// Cancel a booking as the guest
    ///
    /// POST /bookings/<id>/cancel
    pub async fn cancel(&self, id: &str) -> ApiResult<BookingActionResponse> {
        self.client
            .post(&format!("/bookings/{id}/cancel"), &json!({}))
            .await
    }

    /// List bookings on the authenticated owner's properties
    ///
    /// GET /owner/bookings
    pub async fn owner_list(&self) -> ApiResult<ListBookingsResponse> {
        self.client.get("/owner/bookings", &[]).await
    }

    /// Confirm a pending booking as the owner
    ///
    /// POST /owner/bookings/<id>/confirm
    pub async fn owner_confirm(&self, id: &str) -> ApiResult<BookingActionResponse> {
        self.client
            .post(&format!("/owner/bookings/{id}/confirm"), &json!({}))
            .await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Availability check and price quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    /// Whether the date range is free of conflicting bookings
    pub available: bool,
    /// The quoted place
    pub place_id: String,
    /// Check-in date (YYYY-MM-DD)
    pub check_in: String,
    /// Check-out date (YYYY-MM-DD)
    pub check_out: String,
    /// Number of nights
    pub nights: u32,
    /// Nightly price
    pub price_per_night: f64,
    /// Price before discount and fees
    pub subtotal: f64,
    /// Monthly-stay discount amount
    pub discount: f64,
    /// Platform service fee
    pub service_fee: f64,
    /// Total price
    pub total: f64,
    /// "nightly" or "monthly"
    pub booking_type: String,
    /// Price currency (ISO 4217)
    pub currency: String,
}

/// Booking creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    /// Place to book
    pub place_id: String,
    /// Check-in date (YYYY-MM-DD)
    pub check_in: String,
    /// Check-out date (YYYY-MM-DD)
    pub check_out: String,
    /// Number of adults
    pub adults: u32,
    /// Number of children
    #[serde(default)]
    pub children: u32,
    /// Number of infants
    #[serde(default)]
    pub infants: u32,
    /// Free-text requests passed to the owner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

/// Booking creation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingResponse {
    /// Informational message
    pub message: Option<String>,
    /// The created booking
    pub booking: Booking,
}

/// Guest or owner booking list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBookingsResponse {
    /// Bookings, newest first
    pub bookings: Vec<Booking>,
    /// Total booking count
    pub total: Option<u64>,
}

/// Response to cancel/confirm actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingActionResponse {
    /// Informational message
    pub message: Option<String>,
    /// Updated booking, when returned
    pub booking: Option<Booking>,
}

/// A booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    /// Booking ID
    pub id: String,
    /// Booked place
    pub place_id: String,
    /// Booking guest
    pub guest_id: Option<String>,
    /// Check-in date (YYYY-MM-DD)
    pub check_in: String,
    /// Check-out date (YYYY-MM-DD)
    pub check_out: String,
    /// Number of adults
    #[serde(default)]
    pub adults: u32,
    /// Number of children
    #[serde(default)]
    pub children: u32,
    /// Number of infants
    #[serde(default)]
    pub infants: u32,
    /// Adults plus children
    pub total_guests: Option<u32>,
    /// Nightly price at booking time
    pub price_per_night: Option<f64>,
    /// Number of nights
    pub total_nights: Option<u32>,
    /// Price before discount and fees
    pub subtotal: Option<f64>,
    /// Monthly-stay discount amount
    pub discount_amount: Option<f64>,
    /// Platform service fee
    pub service_fee: Option<f64>,
    /// Total price
    pub total_price: Option<f64>,
    /// Price currency (ISO 4217)
    pub currency: Option<String>,
    /// Lifecycle status: "pending", "confirmed", "checked_in", "cancelled", ...
    pub status: String,
    /// "nightly" or "monthly"
    pub booking_type: Option<String>,
    /// Free-text requests passed to the owner
    pub special_requests: Option<String>,
    /// Creation timestamp (ISO 8601)
    pub created_at: Option<String>,
    /// Place card data, when included
    pub place: Option<PlaceCard>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_deserialize() {
        let json = r#"{
            "available": true,
            "place_id": "p1",
            "check_in": "2026-09-01",
            "check_out": "2026-10-05",
            "nights": 34,
            "price_per_night": 300.0,
            "subtotal": 10200.0,
            "discount": 1020.0,
            "service_fee": 459.0,
            "total": 9639.0,
            "booking_type": "monthly",
            "currency": "SAR"
        }"#;

        let quote: AvailabilityResponse = serde_json::from_str(json).unwrap();
        assert!(quote.available);
        assert_eq!(quote.booking_type, "monthly");
        assert_eq!(quote.nights, 34);
    }

    #[test]
    fn test_create_request_serialize() {
        let request = CreateBookingRequest {
            place_id: "p1".to_string(),
            check_in: "2026-09-01".to_string(),
            check_out: "2026-09-04".to_string(),
            adults: 2,
            children: 1,
            infants: 0,
            special_requests: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["place_id"], "p1");
        assert_eq!(value["adults"], 2);
        assert!(value.get("special_requests").is_none());
    }

    #[test]
    fn test_booking_deserialize_with_place_card() {
        let json = r#"{
            "id": "b1",
            "place_id": "p1",
            "guest_id": "u1",
            "check_in": "2026-09-01",
            "check_out": "2026-09-04",
            "adults": 2,
            "status": "pending",
            "total_price": 1417.5,
            "currency": "SAR",
            "place": {
                "id": "p1",
                "title": "فيلا النخيل",
                "price_per_night": 450.0,
                "currency": "SAR",
                "review_count": 3
            }
        }"#;

        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.status, "pending");
        assert_eq!(booking.place.unwrap().title, "فيلا النخيل");
    }
}
