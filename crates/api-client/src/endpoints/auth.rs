//! Authentication and profile endpoints
//!
//! Maps to the `/auth/*` routes:
//! - Email/password login
//! - Passwordless login via OTP code or magic link
//! - Current-user profile read/update
//!
//! Successful logins persist the returned session (token, refresh token,
//! cached profile) to the client's session store so later requests pick up
//! the credential automatically.

use crate::client::HbnbClient;
use crate::error::ApiResult;
use hbnb_core::session::Session;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

/// Authentication API interface
#[derive(Clone)]
pub struct AuthApi {
    client: HbnbClient,
}

impl AuthApi {
    /// Create a new authentication API interface
    pub(crate) fn new(client: HbnbClient) -> Self {
        Self { client }
    }

    /// Email/password login
    ///
    /// POST /auth/login
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let body = json!({ "email": email, "password": password });
        let response: LoginResponse = self.client.post("/auth/login", &body).await?;
        self.persist(&response);
        Ok(response)
    }

    /// Request a one-time code by email
    ///
    /// POST /auth/otp/request
    pub async fn request_otp(&self, email: &str) -> ApiResult<OtpRequestResponse> {
        let body = json!({ "email": email });
        self.client.post("/auth/otp/request", &body).await
    }

    /// Verify a one-time code; registers the user on first login
    ///
    /// POST /auth/otp/verify
    pub async fn verify_otp(&self, email: &str, code: &str) -> ApiResult<LoginResponse> {
        let body = json!({ "email": email, "code": code });
        let response: LoginResponse = self.client.post("/auth/otp/verify", &body).await?;
        self.persist(&response);
        Ok(response)
    }

    /// Request a magic sign-in link by email
    ///
    /// POST /auth/magic-link/request
    pub async fn request_magic_link(&self, email: &str) -> ApiResult<OtpRequestResponse> {
        let body = json!({ "email": email });
        self.client.post("/auth/magic-link/request", &body).await
    }

    /// Verify a magic-link token
    ///
    /// POST /auth/magic-link/verify
    pub async fn verify_magic_link(&self, email: &str, token: &str) -> ApiResult<LoginResponse> {
        let body = json!({ "email": email, "token": token });
        let response: LoginResponse = self.client.post("/auth/magic-link/verify", &body).await?;
        self.persist(&response);
        Ok(response)
    }

    /// Fetch the authenticated user's profile
    ///
    /// GET /auth/me
    pub async fn me(&self) -> ApiResult<UserProfile> {
        self.client.get("/auth/me", &[]).await
    }

    /// Update the authenticated user's profile
    ///
    /// PUT /auth/me
    pub async fn update_me(&self, update: &ProfileUpdate) -> ApiResult<ProfileUpdateResponse> {
        self.client.put("/auth/me", update).await
    }

    /// Drop the stored session without calling the backend
    ///
    /// The backend keeps no server-side session state; logout is local.
    pub fn logout(&self) -> ApiResult<()> {
        self.client
            .store()
            .clear()
            .map_err(|e| crate::error::ApiError::config(e.to_string()))
    }

    fn persist(&self, response: &LoginResponse) {
        let mut session = Session::new(response.access_token.clone());
        if let Some(ref refresh) = response.refresh_token {
            session = session.with_refresh_token(refresh.clone());
        }
        match serde_json::to_value(&response.user) {
            Ok(user) => session = session.with_user(user),
            Err(e) => warn!(error = %e, "Could not cache user profile"),
        }
        if let Err(e) = self.client.store().save(&session) {
            warn!(error = %e, "Could not persist session");
        }
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Successful login response (shared by password, OTP, and magic-link flows)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub access_token: String,
    /// Refresh token, when issued
    pub refresh_token: Option<String>,
    /// The authenticated user's profile
    pub user: UserProfile,
    /// Set by passwordless flows when the login auto-registered the user
    #[serde(default)]
    pub is_new_user: Option<bool>,
    /// Informational message
    pub message: Option<String>,
}

/// Response to an OTP or magic-link request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpRequestResponse {
    /// Informational message
    pub message: Option<String>,
    /// Seconds until the code expires
    pub expires_in: Option<u64>,
}

/// User profile as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// User ID
    pub id: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Convenience full name
    pub full_name: Option<String>,
    /// Email (present only on private views)
    pub email: Option<String>,
    /// Phone number (present only on private views)
    pub phone: Option<String>,
    /// Avatar image URL
    pub avatar_url: Option<String>,
    /// Free-text bio
    pub bio: Option<String>,
    /// Role: "guest", "owner", or "admin"
    pub role: String,
    /// Whether the email was verified
    #[serde(default)]
    pub is_verified: bool,
    /// Preferred display language
    pub preferred_language: Option<String>,
    /// Account creation timestamp (ISO 8601)
    pub created_at: Option<String>,
}

/// Profile update payload (only set fields are sent)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// Given name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Free-text bio
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Avatar image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Preferred display language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,
}

/// Profile update response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdateResponse {
    /// Informational message
    pub message: Option<String>,
    /// Updated profile
    pub user: UserProfile,
}
