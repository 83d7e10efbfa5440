//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{
    AdminApi, AuthApi, BookingsApi, CitiesApi, MediaApi, PlacesApi, ReviewsApi,
};
use crate::error::{ApiError, ApiResult, ErrorBody};
use crate::redirect::{SessionExpired, SessionExpiredReceiver};
use hbnb_core::session::SessionStore;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// HBnB API client with built-in resilience
///
/// This client wraps `reqwest` and adds:
/// - Per-attempt timeout with bounded retry and linear backoff
/// - A single structured error shape for every terminal failure
/// - Bearer credentials read fresh from the session store on each request
/// - Session-expiry signaling on 401 (store cleared, event broadcast)
/// - Request correlation IDs for tracing
#[derive(Clone)]
pub struct HbnbClient {
    inner: Client,
    config: Arc<ClientConfig>,
    store: Arc<dyn SessionStore>,
    expiry: broadcast::Sender<SessionExpired>,
}

impl HbnbClient {
    /// Create a client with configuration from environment variables
    pub fn new(store: Arc<dyn SessionStore>) -> ApiResult<Self> {
        Self::with_config(ClientConfig::from_env()?, store)
    }

    /// Create a client with specific configuration
    pub fn with_config(config: ClientConfig, store: Arc<dyn SessionStore>) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static("hbnb-client/2.0"));

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Transport)?;

        let (expiry, _) = broadcast::channel(16);

        Ok(Self {
            inner,
            config: Arc::new(config),
            store,
            expiry,
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the session store backing this client
    #[must_use]
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Subscribe to session-expiry events
    ///
    /// One event is emitted per 401 response, after the stored session has
    /// been cleared. Navigation policy belongs to the subscriber; see
    /// [`RedirectPolicy`](crate::redirect::RedirectPolicy).
    #[must_use]
    pub fn subscribe_session_expired(&self) -> SessionExpiredReceiver {
        self.expiry.subscribe()
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access authentication endpoints
    #[must_use]
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    /// Access place listing/search endpoints
    #[must_use]
    pub fn places(&self) -> PlacesApi {
        PlacesApi::new(self.clone())
    }

    /// Access city endpoints
    #[must_use]
    pub fn cities(&self) -> CitiesApi {
        CitiesApi::new(self.clone())
    }

    /// Access review endpoints
    #[must_use]
    pub fn reviews(&self) -> ReviewsApi {
        ReviewsApi::new(self.clone())
    }

    /// Access booking endpoints
    #[must_use]
    pub fn bookings(&self) -> BookingsApi {
        BookingsApi::new(self.clone())
    }

    /// Access media endpoints
    #[must_use]
    pub fn media(&self) -> MediaApi {
        MediaApi::new(self.clone())
    }

    /// Access back-office endpoints
    #[must_use]
    pub fn admin(&self) -> AdminApi {
        AdminApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // HTTP verbs
    // -------------------------------------------------------------------------

    /// Perform a GET request
    ///
    /// Query entries whose value is `None` or the empty string are dropped
    /// before encoding.
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, Option<String>)],
    ) -> ApiResult<T> {
        let query = filter_params(params);
        self.execute(Method::GET, path, Option::<&()>::None, &query)
            .await
    }

    /// Perform a POST request with a JSON body
    #[instrument(skip(self, body))]
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.execute(Method::POST, path, Some(body), &[]).await
    }

    /// Perform a PUT request with a JSON body
    #[instrument(skip(self, body))]
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.execute(Method::PUT, path, Some(body), &[]).await
    }

    /// Perform a DELETE request
    #[instrument(skip(self))]
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.execute(Method::DELETE, path, Option::<&()>::None, &[])
            .await
    }

    /// Perform a request with a dynamically chosen verb
    ///
    /// Used where the verb is decided at runtime, such as toggling a
    /// favorite via POST-or-DELETE. `Content-Type: application/json` is set
    /// only when a body is present.
    #[instrument(skip(self, body))]
    pub async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        self.execute(method, path, body, &[]).await
    }

    /// POST a multipart form
    ///
    /// Never retried: the payload may not be safely re-sent, and the server
    /// may have taken partial effect. The form sets its own content type.
    #[instrument(skip(self, form))]
    pub async fn upload<T: DeserializeOwned>(&self, path: &str, form: Form) -> ApiResult<T> {
        let request_id = Uuid::new_v4().to_string();
        let mut request = self
            .inner
            .post(self.url_for(path))
            .header(X_REQUEST_ID, &request_id)
            .multipart(form);

        if let Some(token) = self.store.token() {
            request = request.bearer_auth(token);
        }

        self.dispatch(path, request).await
    }

    // -------------------------------------------------------------------------
    // Request mechanics
    // -------------------------------------------------------------------------

    /// Execute a request with retry and backoff
    ///
    /// Attempts run strictly sequentially. Retry applies only to timeouts,
    /// transport failures without a status, and 5xx responses; definitive
    /// 4xx failures and session expiry surface immediately.
    async fn execute<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        query: &[(String, String)],
    ) -> ApiResult<T> {
        let retries = self.config.retry.max_retries;
        let request_id = Uuid::new_v4().to_string();
        let url = self.url_for(path);
        let mut last_error: Option<ApiError> = None;

        for attempt in 0..=retries {
            // Wait before re-issuing (never before the first attempt)
            if attempt > 0 {
                let delay = self.config.retry.delay_for_attempt(attempt);
                debug!(
                    request_id = %request_id,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self
                .inner
                .request(method.clone(), &url)
                .header(X_REQUEST_ID, &request_id);

            if !query.is_empty() {
                request = request.query(query);
            }

            // Credential is read fresh on every attempt so a logout (or the
            // 401 handling of a concurrent call) is observed immediately
            if let Some(token) = self.store.token() {
                request = request.bearer_auth(token);
            }

            if let Some(b) = body {
                request = request.json(b);
            }

            match self.dispatch(path, request).await {
                Ok(value) => {
                    debug!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        "Request succeeded"
                    );
                    return Ok(value);
                }
                Err(e) => {
                    if attempt < retries && e.is_retryable() {
                        debug!(
                            request_id = %request_id,
                            attempt = attempt + 1,
                            error = %e,
                            "Request failed, will retry"
                        );
                        last_error = Some(e);
                    } else {
                        debug!(
                            request_id = %request_id,
                            attempt = attempt + 1,
                            error = %e,
                            "Request failed, not retrying"
                        );
                        return Err(e);
                    }
                }
            }
        }

        // The final attempt always returns above; kept as a guard
        Err(last_error
            .unwrap_or_else(|| ApiError::config("request loop exited without an outcome")))
    }

    /// Issue a single attempt and interpret the response
    async fn dispatch<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => return Err(self.classify_transport(e)),
        };
        self.handle_response(path, response).await
    }

    /// Handle an HTTP response: success decode, expiry, or structured error
    async fn handle_response<T: DeserializeOwned>(
        &self,
        path: &str,
        response: Response,
    ) -> ApiResult<T> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            let body = decode_error_body(response).await;
            return Err(self.expire_session(path, body));
        }

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| self.classify_transport(e));
        }

        let body = decode_error_body(response).await;
        Err(ApiError::Api {
            status: status.as_u16(),
            body,
        })
    }

    /// Map a `reqwest` failure to the structured error shape
    fn classify_transport(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout {
                message: self.config.lang.connection_timeout().to_string(),
            }
        } else {
            ApiError::Transport(e)
        }
    }

    /// Clear the stored session and signal expiry to subscribers
    fn expire_session(&self, path: &str, mut body: ErrorBody) -> ApiError {
        if body.text().is_none() {
            body.error = Some(self.config.lang.session_expired().to_string());
        }

        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear stored session");
        }

        let message = body.text().unwrap_or_default().to_string();
        warn!(path, "Session expired, cleared stored credentials");
        let _ = self.expiry.send(SessionExpired {
            path: path.to_string(),
            message,
        });

        ApiError::AuthExpired { body }
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Best-effort decode of an error body; non-JSON bodies yield empty fields
async fn decode_error_body(response: Response) -> ErrorBody {
    match response.bytes().await {
        Ok(raw) => ErrorBody::from_bytes(&raw),
        Err(_) => ErrorBody::default(),
    }
}

/// Drop query entries with absent or empty values before encoding
fn filter_params(params: &[(&str, Option<String>)]) -> Vec<(String, String)> {
    params
        .iter()
        .filter_map(|(k, v)| match v {
            Some(v) if !v.is_empty() => Some(((*k).to_string(), v.clone())),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb_core::session::MemorySessionStore;

    #[test]
    fn test_filter_params_drops_empty() {
        let params = [
            ("city_id", Some("riyadh".to_string())),
            ("q", Some(String::new())),
            ("min_price", None),
            ("page", Some("2".to_string())),
        ];
        let query = filter_params(&params);
        assert_eq!(
            query,
            vec![
                ("city_id".to_string(), "riyadh".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_url_joining() {
        let client = HbnbClient::with_config(
            ClientConfig::default().with_base_url("https://app.hbnb.sa/api/v1/"),
            Arc::new(MemorySessionStore::new()),
        )
        .unwrap();
        assert_eq!(
            client.url_for("/places/42"),
            "https://app.hbnb.sa/api/v1/places/42"
        );
        assert_eq!(
            client.url_for("places/42"),
            "https://app.hbnb.sa/api/v1/places/42"
        );
    }

    #[test]
    fn test_client_creation() {
        let client = HbnbClient::with_config(
            ClientConfig::development(),
            Arc::new(MemorySessionStore::new()),
        );
        assert!(client.is_ok());
    }
}
