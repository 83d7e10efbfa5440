//! City endpoints
//!
//! Maps to the `/cities*` routes used by the home page and search bar.

use crate::client::HbnbClient;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};

/// Cities API interface
#[derive(Clone)]
pub struct CitiesApi {
    client: HbnbClient,
}

impl CitiesApi {
    /// Create a new cities API interface
    pub(crate) fn new(client: HbnbClient) -> Self {
        Self { client }
    }

    /// List cities, optionally only the featured ones
    ///
    /// GET /cities
    pub async fn list(&self, featured_only: bool) -> ApiResult<Vec<City>> {
        let featured = featured_only.then(|| "true".to_string());
        self.client.get("/cities", &[("featured", featured)]).await
    }

    /// Fetch a single city by ID
    ///
    /// GET /cities/<id>
    pub async fn get(&self, id: &str) -> ApiResult<City> {
        self.client.get(&format!("/cities/{id}"), &[]).await
    }

    /// Autocomplete search over city names
    ///
    /// GET /cities/search
    pub async fn search(&self, q: &str, lang: &str) -> ApiResult<Vec<City>> {
        self.client
            .get(
                "/cities/search",
                &[
                    ("q", Some(q.to_string())),
                    ("lang", Some(lang.to_string())),
                ],
            )
            .await
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// City entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    /// City ID
    pub id: String,
    /// Localized name
    pub name: String,
    /// English name
    pub name_en: Option<String>,
    /// Arabic name
    pub name_ar: Option<String>,
    /// Localized region name
    pub region: Option<String>,
    /// Latitude of the city center
    pub latitude: Option<f64>,
    /// Longitude of the city center
    pub longitude: Option<f64>,
    /// Representative image URL
    pub image_url: Option<String>,
    /// Whether the city appears on the home page
    #[serde(default)]
    pub is_featured: bool,
    /// Number of active listings in the city
    pub place_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_deserialize() {
        let json = r#"{
            "id": "c1",
            "name": "الرياض",
            "name_en": "Riyadh",
            "name_ar": "الرياض",
            "region": "منطقة الرياض",
            "latitude": 24.7136,
            "longitude": 46.6753,
            "image_url": null,
            "is_featured": true,
            "place_count": 120
        }"#;

        let city: City = serde_json::from_str(json).unwrap();
        assert_eq!(city.name_en.as_deref(), Some("Riyadh"));
        assert!(city.is_featured);
        assert_eq!(city.place_count, Some(120));
    }
}
