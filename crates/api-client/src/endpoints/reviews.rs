//! Review endpoints
//!
//! Maps to the `/places/<id>/reviews` routes. Reviews are written by guests
//! after a stay and held for moderation before appearing publicly.

use crate::client::HbnbClient;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Reviews API interface
#[derive(Clone)]
pub struct ReviewsApi {
    client: HbnbClient,
}

impl ReviewsApi {
    /// Create a new reviews API interface
    pub(crate) fn new(client: HbnbClient) -> Self {
        Self { client }
    }

    /// List approved reviews for a place
    ///
    /// GET /places/<id>/reviews
    pub async fn for_place(&self, place_id: &str) -> ApiResult<ListReviewsResponse> {
        self.client
            .get(&format!("/places/{place_id}/reviews"), &[])
            .await
    }

    /// Submit a review for a place
    ///
    /// POST /places/<id>/reviews
    pub async fn create(
        &self,
        place_id: &str,
        rating: u8,
        comment: &str,
    ) -> ApiResult<CreateReviewResponse> {
        let body = json!({ "rating": rating, "comment": comment });
        self.client
            .post(&format!("/places/{place_id}/reviews"), &body)
            .await
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Reviews for a place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListReviewsResponse {
    /// Approved reviews, newest first
    pub reviews: Vec<Review>,
    /// Total review count
    pub total: Option<u64>,
}

/// Review creation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReviewResponse {
    /// Informational message
    pub message: Option<String>,
    /// The created review (pending moderation)
    pub review: Option<Review>,
}

/// A guest review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Review ID
    pub id: String,
    /// Reviewed place
    pub place_id: String,
    /// Overall rating, 1-5
    pub rating: u8,
    /// Cleanliness sub-rating
    pub cleanliness: Option<u8>,
    /// Accuracy sub-rating
    pub accuracy: Option<u8>,
    /// Location sub-rating
    pub location_rating: Option<u8>,
    /// Value sub-rating
    pub value: Option<u8>,
    /// Communication sub-rating
    pub communication: Option<u8>,
    /// Check-in sub-rating
    pub check_in_rating: Option<u8>,
    /// Free-text comment
    pub comment: Option<String>,
    /// Language the comment was written in
    pub language: Option<String>,
    /// Author public profile
    pub author: Option<serde_json::Value>,
    /// Creation timestamp (ISO 8601)
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_deserialize() {
        let json = r#"{
            "id": "r9",
            "place_id": "p1",
            "rating": 5,
            "cleanliness": 5,
            "accuracy": 4,
            "comment": "مكان رائع",
            "language": "ar",
            "author": {"id": "u2", "first_name": "Nora"},
            "created_at": "2025-11-02T10:00:00"
        }"#;

        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.rating, 5);
        assert_eq!(review.comment.as_deref(), Some("مكان رائع"));
        assert_eq!(review.location_rating, None);
    }
}
