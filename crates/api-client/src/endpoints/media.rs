//! Media endpoints
//!
//! Maps to the `/places/<id>/media` and `/media/<id>` routes. Uploads go
//! out as multipart forms and are never retried: the payload may not be
//! safely re-sent and the server may already hold a partial effect.

use crate::client::HbnbClient;
use crate::error::ApiResult;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

/// Media API interface
#[derive(Clone)]
pub struct MediaApi {
    client: HbnbClient,
}

impl MediaApi {
    /// Create a new media API interface
    pub(crate) fn new(client: HbnbClient) -> Self {
        Self { client }
    }

    /// List media for a place
    ///
    /// GET /places/<id>/media
    pub async fn for_place(&self, place_id: &str) -> ApiResult<ListMediaResponse> {
        self.client
            .get(&format!("/places/{place_id}/media"), &[])
            .await
    }

    /// Upload a prepared multipart form to a place's media collection
    ///
    /// POST /places/<id>/media
    pub async fn upload(&self, place_id: &str, form: Form) -> ApiResult<UploadMediaResponse> {
        self.client
            .upload(&format!("/places/{place_id}/media"), form)
            .await
    }

    /// Upload a single photo from memory
    ///
    /// Convenience wrapper around [`upload`](Self::upload) that builds the
    /// multipart form.
    pub async fn upload_photo(
        &self,
        place_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
        caption: Option<&str>,
    ) -> ApiResult<UploadMediaResponse> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let mut form = Form::new().part("file", part);
        if let Some(caption) = caption {
            form = form.text("caption", caption.to_string());
        }
        self.upload(place_id, form).await
    }

    /// Remove a media item
    ///
    /// DELETE /media/<id>
    pub async fn delete(&self, media_id: &str) -> ApiResult<DeleteMediaResponse> {
        self.client.delete(&format!("/media/{media_id}")).await
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Media list for a place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMediaResponse {
    /// Media items in display order
    pub media: Vec<MediaItem>,
}

/// Upload response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadMediaResponse {
    /// Informational message
    pub message: Option<String>,
    /// The stored media item
    pub media: Option<MediaItem>,
}

/// Deletion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteMediaResponse {
    /// Informational message
    pub message: Option<String>,
}

/// A photo or video attached to a place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    /// Media ID
    pub id: String,
    /// Full-size URL
    pub url: String,
    /// Thumbnail URL
    pub thumbnail_url: Option<String>,
    /// Localized caption
    pub caption: Option<String>,
    /// "image" or "video"
    pub media_type: Option<String>,
    /// Whether this item is the listing cover
    #[serde(default)]
    pub is_cover: bool,
    /// Display position
    pub sort_order: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_item_deserialize() {
        let json = r#"{
            "id": "m1",
            "url": "https://cdn.hbnb.sa/p1/1.jpg",
            "thumbnail_url": "https://cdn.hbnb.sa/p1/1_thumb.jpg",
            "caption": "المسبح الخارجي",
            "media_type": "image",
            "is_cover": true,
            "sort_order": 0
        }"#;

        let item: MediaItem = serde_json::from_str(json).unwrap();
        assert!(item.is_cover);
        assert_eq!(item.media_type.as_deref(), Some("image"));
    }
}
