//! Place listing and search endpoints
//!
//! Maps to the `/places*` and `/property-types` routes:
//! - Filtered, paginated search
//! - Home-page rails (featured, budget, monthly stays)
//! - Place detail
//! - Favorite toggle (verb decided by current state)

use crate::client::HbnbClient;
use crate::endpoints::cities::City;
use crate::endpoints::media::MediaItem;
use crate::error::ApiResult;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Places API interface
#[derive(Clone)]
pub struct PlacesApi {
    client: HbnbClient,
}

impl PlacesApi {
    /// Create a new places API interface
    pub(crate) fn new(client: HbnbClient) -> Self {
        Self { client }
    }

    /// Search places with filters and pagination
    ///
    /// GET /places
    pub async fn list(&self, filters: &PlaceFilters) -> ApiResult<ListPlacesResponse> {
        self.client.get("/places", &filters.to_query()).await
    }

    /// Featured properties for the home page
    ///
    /// GET /places/featured
    pub async fn featured(&self) -> ApiResult<PlaceRail> {
        self.client.get("/places/featured", &[]).await
    }

    /// Below-average-price properties
    ///
    /// GET /places/budget
    pub async fn budget(&self) -> ApiResult<PlaceRail> {
        self.client.get("/places/budget", &[]).await
    }

    /// Properties offering monthly stays
    ///
    /// GET /places/monthly
    pub async fn monthly(&self) -> ApiResult<PlaceRail> {
        self.client.get("/places/monthly", &[]).await
    }

    /// Fetch a single place by ID
    ///
    /// GET /places/<id>
    pub async fn get(&self, id: &str) -> ApiResult<Place> {
        self.client.get(&format!("/places/{id}"), &[]).await
    }

    /// Add or remove a place from the user's favorites
    ///
    /// POST or DELETE /places/<id>/favorite, depending on the desired state
    pub async fn set_favorite(&self, id: &str, favorited: bool) -> ApiResult<FavoriteResponse> {
        let method = if favorited {
            Method::POST
        } else {
            Method::DELETE
        };
        self.client
            .request(method, &format!("/places/{id}/favorite"), Option::<&()>::None)
            .await
    }

    /// List property types (apartments, chalets, rest houses, ...)
    ///
    /// GET /property-types
    pub async fn property_types(&self) -> ApiResult<Vec<PropertyType>> {
        self.client.get("/property-types", &[]).await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Search filters for listing places
///
/// Unset filters are omitted from the query string entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceFilters {
    /// Filter by city
    pub city_id: Option<String>,
    /// Filter by property type
    pub property_type_id: Option<String>,
    /// Trip type: "family", "singles", ...
    pub trip_type: Option<String>,
    /// Minimum nightly price
    pub min_price: Option<f64>,
    /// Maximum nightly price
    pub max_price: Option<f64>,
    /// Minimum guest capacity
    pub guests: Option<u32>,
    /// Minimum bedroom count
    pub bedrooms: Option<u32>,
    /// Free-text search over titles and descriptions
    pub q: Option<String>,
    /// Sort order: "newest", "price_low", "price_high", "rating"
    pub sort: Option<String>,
    /// 1-based page number
    pub page: Option<u32>,
    /// Page size
    pub per_page: Option<u32>,
    /// Display language for localized fields
    pub lang: Option<String>,
}

impl PlaceFilters {
    /// Create empty filters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by city
    #[must_use]
    pub fn with_city(mut self, city_id: impl Into<String>) -> Self {
        self.city_id = Some(city_id.into());
        self
    }

    /// Filter by property type
    #[must_use]
    pub fn with_property_type(mut self, property_type_id: impl Into<String>) -> Self {
        self.property_type_id = Some(property_type_id.into());
        self
    }

    /// Filter by nightly price range
    #[must_use]
    pub fn with_price_range(mut self, min: f64, max: f64) -> Self {
        self.min_price = Some(min);
        self.max_price = Some(max);
        self
    }

    /// Filter by minimum guest capacity
    #[must_use]
    pub fn with_guests(mut self, guests: u32) -> Self {
        self.guests = Some(guests);
        self
    }

    /// Free-text search
    #[must_use]
    pub fn with_search(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    /// Set the sort order
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Set pagination
    #[must_use]
    pub fn with_page(mut self, page: u32, per_page: u32) -> Self {
        self.page = Some(page);
        self.per_page = Some(per_page);
        self
    }

    /// Set the display language
    #[must_use]
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    fn to_query(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("city_id", self.city_id.clone()),
            ("property_type_id", self.property_type_id.clone()),
            ("trip_type", self.trip_type.clone()),
            ("min_price", self.min_price.map(|v| v.to_string())),
            ("max_price", self.max_price.map(|v| v.to_string())),
            ("guests", self.guests.map(|v| v.to_string())),
            ("bedrooms", self.bedrooms.map(|v| v.to_string())),
            ("q", self.q.clone()),
            ("sort", self.sort.clone()),
            ("page", self.page.map(|v| v.to_string())),
            ("per_page", self.per_page.map(|v| v.to_string())),
            ("lang", self.lang.clone()),
        ]
    }
}

/// Paginated search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPlacesResponse {
    /// Matching places as listing cards
    pub places: Vec<PlaceCard>,
    /// Total match count
    pub total: u64,
    /// Total page count
    pub pages: u32,
    /// The page served
    pub current_page: u32,
    /// Whether a next page exists
    pub has_next: bool,
    /// Whether a previous page exists
    pub has_prev: bool,
}

/// Unpaginated rail of listing cards (featured/budget/monthly)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceRail {
    /// Places in display order
    pub places: Vec<PlaceCard>,
}

/// Minimal place data for listing cards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceCard {
    /// Place ID
    pub id: String,
    /// Localized title
    pub title: String,
    /// Nightly price
    pub price_per_night: f64,
    /// Monthly price, when monthly stays are offered
    pub monthly_price: Option<f64>,
    /// Price currency (ISO 4217)
    pub currency: String,
    /// Average guest rating
    pub average_rating: Option<f64>,
    /// Number of reviews
    #[serde(default)]
    pub review_count: u32,
    /// City summary
    pub city: Option<City>,
    /// Property type summary
    pub property_type: Option<PropertyType>,
    /// Cover image URL
    pub image_url: Option<String>,
    /// Whether this is an elite/featured listing
    #[serde(default)]
    pub is_featured: bool,
    /// Guest capacity
    pub max_guests: Option<u32>,
    /// Bedroom count
    pub bedrooms: Option<u32>,
}

/// Full place detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    /// Place ID
    pub id: String,
    /// Localized title
    pub title: String,
    /// English title
    pub title_en: Option<String>,
    /// Arabic title
    pub title_ar: Option<String>,
    /// Localized description
    pub description: Option<String>,
    /// Nightly price
    pub price_per_night: f64,
    /// Monthly price, when monthly stays are offered
    pub monthly_price: Option<f64>,
    /// Price currency (ISO 4217)
    pub currency: String,
    /// City ID
    pub city_id: Option<String>,
    /// Property type ID
    pub property_type_id: Option<String>,
    /// Guest capacity
    pub max_guests: Option<u32>,
    /// Bedroom count
    pub bedrooms: Option<u32>,
    /// Bathroom count
    pub bathrooms: Option<u32>,
    /// Bed count
    pub beds: Option<u32>,
    /// Whether this is an elite/featured listing
    #[serde(default)]
    pub is_featured: bool,
    /// Whether bookings confirm without owner approval
    #[serde(default)]
    pub is_instant_book: bool,
    /// Trip type the listing targets
    pub trip_type: Option<String>,
    /// Check-in time
    pub check_in_time: Option<String>,
    /// Check-out time
    pub check_out_time: Option<String>,
    /// Average guest rating
    pub average_rating: Option<f64>,
    /// Number of reviews
    #[serde(default)]
    pub review_count: u32,
    /// Localized house rules
    pub rules: Option<String>,
    /// Amenities offered
    #[serde(default)]
    pub amenities: Vec<Amenity>,
    /// Photos and videos
    #[serde(default)]
    pub media: Vec<MediaItem>,
    /// Owner public profile
    pub owner: Option<serde_json::Value>,
}

/// Amenity entry on a place detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Amenity {
    /// Amenity ID
    pub id: String,
    /// Localized name
    pub name: String,
    /// Icon name
    pub icon: Option<String>,
}

/// Property type entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyType {
    /// Property type ID
    pub id: String,
    /// Localized name
    pub name: String,
    /// English name
    pub name_en: Option<String>,
    /// Arabic name
    pub name_ar: Option<String>,
    /// Icon name
    pub icon: Option<String>,
    /// Representative image URL
    pub image_url: Option<String>,
    /// Number of active listings of this type
    pub place_count: Option<u64>,
}

/// Favorite toggle response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteResponse {
    /// Informational message
    pub message: Option<String>,
    /// New favorite state, when the backend reports it
    pub favorited: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_builder() {
        let filters = PlaceFilters::new()
            .with_city("riyadh")
            .with_price_range(100.0, 800.0)
            .with_guests(4)
            .with_sort("price_low")
            .with_page(2, 20);

        assert_eq!(filters.city_id, Some("riyadh".to_string()));
        assert_eq!(filters.min_price, Some(100.0));
        assert_eq!(filters.max_price, Some(800.0));
        assert_eq!(filters.guests, Some(4));
        assert_eq!(filters.page, Some(2));
    }

    #[test]
    fn test_filters_query_omits_unset() {
        let filters = PlaceFilters::new().with_city("jeddah");
        let query = filters.to_query();
        let set: Vec<_> = query.iter().filter(|(_, v)| v.is_some()).collect();
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].0, "city_id");
    }

    #[test]
    fn test_place_card_deserialize() {
        let json = r#"{
            "id": "p1",
            "title": "شاليه الواحة",
            "price_per_night": 450.0,
            "monthly_price": null,
            "currency": "SAR",
            "average_rating": 4.8,
            "review_count": 12,
            "city": {"id": "c1", "name": "الرياض", "is_featured": true},
            "property_type": {"id": "t1", "name": "شاليهات"},
            "image_url": "https://cdn.hbnb.sa/p1/cover.jpg",
            "is_featured": true,
            "max_guests": 6,
            "bedrooms": 2
        }"#;

        let card: PlaceCard = serde_json::from_str(json).unwrap();
        assert_eq!(card.id, "p1");
        assert_eq!(card.currency, "SAR");
        assert!(card.is_featured);
        assert_eq!(card.city.unwrap().name, "الرياض");
    }
}
