//! Behavior tests for the resilient request client against a live socket.
//!
//! # Design
//! Each test starts a scripted HTTP fixture on a random port: every
//! accepted connection consumes the next scripted response (optionally
//! after a delay, to provoke the client timeout) and records what the
//! client actually sent. Tests then assert on attempt counts, headers,
//! and the structured error surfaced to the caller.

use hbnb_api_client::{ApiError, ClientConfig, HbnbClient};
use hbnb_core::i18n::Lang;
use hbnb_core::retry::RetryConfig;
use hbnb_core::session::{MemorySessionStore, Session, SessionStore};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// One canned response the fixture will serve
struct Scripted {
    status: u16,
    body: &'static str,
    /// Sleep before responding; longer than the client timeout simulates a hang
    delay: Option<Duration>,
}

impl Scripted {
    fn ok(body: &'static str) -> Self {
        Self {
            status: 200,
            body,
            delay: None,
        }
    }

    fn status(status: u16, body: &'static str) -> Self {
        Self {
            status,
            body,
            delay: None,
        }
    }

    fn hang() -> Self {
        Self {
            status: 200,
            body: "{}",
            delay: Some(Duration::from_secs(2)),
        }
    }
}

/// What the client sent on one attempt
#[derive(Debug, Clone)]
struct Recorded {
    request_line: String,
    authorization: Option<String>,
    content_type: Option<String>,
    body: String,
}

/// Start the fixture; returns its base URL and the recorded attempts
async fn spawn_fixture(script: Vec<Scripted>) -> (String, Arc<Mutex<Vec<Recorded>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/api/v1", listener.local_addr().unwrap());
    let recorded = Arc::new(Mutex::new(Vec::new()));
    let queue = Arc::new(Mutex::new(VecDeque::from(script)));

    let recorded_in = Arc::clone(&recorded);
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            let next = queue.lock().unwrap().pop_front().unwrap_or(Scripted {
                status: 500,
                body: r#"{"error":"script exhausted"}"#,
                delay: None,
            });
            let recorded = Arc::clone(&recorded_in);
            tokio::spawn(async move {
                handle_connection(stream, next, recorded).await;
            });
        }
    });

    (base_url, recorded)
}

async fn handle_connection(
    mut stream: tokio::net::TcpStream,
    response: Scripted,
    recorded: Arc<Mutex<Vec<Recorded>>>,
) {
    let mut raw = Vec::new();
    let mut buf = [0u8; 4096];

    // Read until the end of headers
    let header_end = loop {
        let Ok(n) = stream.read(&mut buf).await else {
            return;
        };
        if n == 0 {
            return;
        }
        raw.extend_from_slice(&buf[..n]);
        if let Some(pos) = find_header_end(&raw) {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&raw[..header_end]).to_string();
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or_default().to_string();

    let mut authorization = None;
    let mut content_type = None;
    let mut content_length = 0usize;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().to_string();
        match name.to_ascii_lowercase().as_str() {
            "authorization" => authorization = Some(value),
            "content-type" => content_type = Some(value),
            "content-length" => content_length = value.parse().unwrap_or(0),
            _ => {}
        }
    }

    // Read the remainder of the body
    let mut body = raw[header_end + 4..].to_vec();
    while body.len() < content_length {
        let Ok(n) = stream.read(&mut buf).await else {
            break;
        };
        if n == 0 {
            break;
        }
        body.extend_from_slice(&buf[..n]);
    }

    recorded.lock().unwrap().push(Recorded {
        request_line,
        authorization,
        content_type,
        body: String::from_utf8_lossy(&body).to_string(),
    });

    if let Some(delay) = response.delay {
        tokio::time::sleep(delay).await;
    }

    let payload = format!(
        "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        response.body.len(),
        response.body
    );
    // The client may have aborted (timeout tests); a failed write is expected
    let _ = stream.write_all(payload.as_bytes()).await;
    let _ = stream.shutdown().await;
}

fn find_header_end(raw: &[u8]) -> Option<usize> {
    raw.windows(4).position(|w| w == b"\r\n\r\n")
}

fn test_client(base_url: &str, store: Arc<MemorySessionStore>) -> HbnbClient {
    let config = ClientConfig::default()
        .with_base_url(base_url)
        .with_timeout(Duration::from_millis(250))
        .with_retry(RetryConfig {
            max_retries: 1,
            backoff_base: Duration::from_millis(20),
        })
        .with_lang(Lang::En);
    HbnbClient::with_config(config, store).unwrap()
}

// ============================================================================
// Success path
// ============================================================================

#[tokio::test]
async fn first_attempt_success_returns_parsed_body() {
    let (base, recorded) = spawn_fixture(vec![Scripted::ok(r#"{"id":"42","title":"Villa"}"#)]).await;
    let client = test_client(&base, Arc::new(MemorySessionStore::new()));

    let start = Instant::now();
    let value: Value = client.get("/places/42", &[]).await.unwrap();

    assert_eq!(value, json!({"id": "42", "title": "Villa"}));
    assert_eq!(recorded.lock().unwrap().len(), 1);
    // No backoff on the success path
    assert!(start.elapsed() < Duration::from_millis(200));

    let attempt = recorded.lock().unwrap()[0].clone();
    assert!(attempt.request_line.starts_with("GET /api/v1/places/42"));
    assert_eq!(attempt.authorization, None);
}

#[tokio::test]
async fn bearer_token_is_read_from_store() {
    let (base, recorded) = spawn_fixture(vec![Scripted::ok("{}")]).await;
    let store = Arc::new(MemorySessionStore::with_session(Session::new("tok-123")));
    let client = test_client(&base, store);

    let _: Value = client.get("/bookings", &[]).await.unwrap();

    let attempt = recorded.lock().unwrap()[0].clone();
    assert_eq!(attempt.authorization.as_deref(), Some("Bearer tok-123"));
}

#[tokio::test]
async fn empty_query_values_are_dropped() {
    let (base, recorded) = spawn_fixture(vec![Scripted::ok(r#"{"places":[],"total":0,"pages":0,"current_page":1,"has_next":false,"has_prev":false}"#)]).await;
    let client = test_client(&base, Arc::new(MemorySessionStore::new()));

    let _: Value = client
        .get(
            "/places",
            &[
                ("city_id", Some("riyadh".to_string())),
                ("q", Some(String::new())),
                ("min_price", None),
            ],
        )
        .await
        .unwrap();

    let line = recorded.lock().unwrap()[0].request_line.clone();
    assert!(line.contains("city_id=riyadh"));
    assert!(!line.contains("q="));
    assert!(!line.contains("min_price"));
}

#[tokio::test]
async fn json_content_type_only_when_body_present() {
    let (base, recorded) = spawn_fixture(vec![
        Scripted::ok("{}"),
        Scripted::ok("{}"),
    ])
    .await;
    let client = test_client(&base, Arc::new(MemorySessionStore::new()));

    let _: Value = client.post("/bookings", &json!({"place_id": "p1"})).await.unwrap();
    let _: Value = client.delete("/reviews/9").await.unwrap();

    let attempts = recorded.lock().unwrap().clone();
    assert_eq!(
        attempts[0].content_type.as_deref(),
        Some("application/json")
    );
    assert_eq!(attempts[1].content_type, None);
    assert!(attempts[0].body.contains("place_id"));
}

// ============================================================================
// Session expiry (401)
// ============================================================================

#[tokio::test]
async fn unauthorized_clears_store_emits_event_and_never_retries() {
    let (base, recorded) =
        spawn_fixture(vec![Scripted::status(401, r#"{"error":"Invalid credentials"}"#)]).await;
    let store = Arc::new(MemorySessionStore::with_session(Session::new("stale")));
    let client = test_client(&base, Arc::clone(&store));
    let mut expiry = client.subscribe_session_expired();

    let result: Result<Value, _> = client
        .post("/auth/login", &json!({"email": "x@hbnb.sa", "password": "bad"}))
        .await;

    let err = result.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.message(), Some("Invalid credentials"));
    assert!(matches!(err, ApiError::AuthExpired { .. }));

    // Store cleared, single attempt, event carries the server message
    assert_eq!(store.token(), None);
    assert_eq!(store.profile(), None);
    assert_eq!(recorded.lock().unwrap().len(), 1);

    let event = expiry.try_recv().unwrap();
    assert_eq!(event.path, "/auth/login");
    assert_eq!(event.message, "Invalid credentials");
}

#[tokio::test]
async fn unauthorized_with_empty_body_uses_localized_message() {
    let (base, _recorded) = spawn_fixture(vec![Scripted::status(401, "")]).await;
    let store = Arc::new(MemorySessionStore::with_session(Session::new("stale")));
    let client = test_client(&base, Arc::clone(&store));

    let err = client.get::<Value>("/auth/me", &[]).await.unwrap_err();

    assert_eq!(err.message(), Some("Session expired"));
    assert_eq!(store.token(), None);
}

// ============================================================================
// Retry policy
// ============================================================================

#[tokio::test]
async fn server_errors_retry_until_budget_exhausted() {
    let (base, recorded) = spawn_fixture(vec![
        Scripted::status(500, r#"{"error":"boom"}"#),
        Scripted::status(500, r#"{"error":"boom"}"#),
    ])
    .await;
    let client = test_client(&base, Arc::new(MemorySessionStore::new()));

    let start = Instant::now();
    let err = client
        .put::<Value, _>("/users/7", &json!({"bio": "x"}))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.message(), Some("boom"));
    assert!(err.is_server_error());
    assert_eq!(recorded.lock().unwrap().len(), 2);
    // One backoff interval between the two attempts
    assert!(start.elapsed() >= Duration::from_millis(20));
}

#[tokio::test]
async fn server_error_then_success_recovers() {
    let (base, recorded) = spawn_fixture(vec![
        Scripted::status(502, "<html>bad gateway</html>"),
        Scripted::ok(r#"{"ok":true}"#),
    ])
    .await;
    let client = test_client(&base, Arc::new(MemorySessionStore::new()));

    let value: Value = client.get("/cities", &[]).await.unwrap();

    assert_eq!(value, json!({"ok": true}));
    assert_eq!(recorded.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn client_errors_are_definitive() {
    let (base, recorded) =
        spawn_fixture(vec![Scripted::status(404, r#"{"error":"Not found"}"#)]).await;
    let client = test_client(&base, Arc::new(MemorySessionStore::new()));

    let err = client.get::<Value>("/places/nope", &[]).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(err.is_client_error());
    assert_eq!(recorded.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_empty_fields() {
    let (base, _recorded) = spawn_fixture(vec![
        Scripted::status(503, "<html>maintenance</html>"),
        Scripted::status(503, "<html>maintenance</html>"),
    ])
    .await;
    let client = test_client(&base, Arc::new(MemorySessionStore::new()));

    let err = client.get::<Value>("/places", &[]).await.unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert_eq!(err.message(), None);
}

// ============================================================================
// Timeouts
// ============================================================================

#[tokio::test]
async fn timeout_exhausts_budget_then_surfaces_localized_message() {
    let (base, recorded) = spawn_fixture(vec![Scripted::hang(), Scripted::hang()]).await;
    let client = test_client(&base, Arc::new(MemorySessionStore::new()));

    let err = client.delete::<Value>("/reviews/9").await.unwrap_err();

    assert!(matches!(err, ApiError::Timeout { .. }));
    assert_eq!(err.status(), None);
    assert_eq!(err.message(), Some("Connection timed out"));
    assert_eq!(recorded.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn timeout_then_fast_answer_recovers() {
    let (base, recorded) = spawn_fixture(vec![Scripted::hang(), Scripted::ok(r#"{"id":"b1"}"#)]).await;
    let client = test_client(&base, Arc::new(MemorySessionStore::new()));

    let value: Value = client.get("/bookings/b1", &[]).await.unwrap();

    assert_eq!(value["id"], "b1");
    assert_eq!(recorded.lock().unwrap().len(), 2);
}

// ============================================================================
// Uploads
// ============================================================================

#[tokio::test]
async fn uploads_are_never_retried() {
    let (base, recorded) = spawn_fixture(vec![
        Scripted::status(500, r#"{"error":"storage failure"}"#),
        Scripted::ok("{}"),
    ])
    .await;
    let client = test_client(&base, Arc::new(MemorySessionStore::new()));

    let form = reqwest::multipart::Form::new()
        .part(
            "file",
            reqwest::multipart::Part::bytes(vec![0xFF, 0xD8, 0xFF]).file_name("cover.jpg"),
        )
        .text("caption", "front view");

    let err = client
        .upload::<Value>("/places/p1/media", form)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(recorded.lock().unwrap().len(), 1);

    let attempt = recorded.lock().unwrap()[0].clone();
    assert!(attempt.request_line.starts_with("POST /api/v1/places/p1/media"));
    assert!(
        attempt
            .content_type
            .is_some_and(|ct| ct.starts_with("multipart/form-data"))
    );
}

#[tokio::test]
async fn media_upload_decodes_typed_response() {
    let (base, recorded) = spawn_fixture(vec![Scripted::ok(
        r#"{"message":"Uploaded","media":{"id":"m1","url":"https://cdn.hbnb.sa/p1/1.jpg","is_cover":false}}"#,
    )])
    .await;
    let client = test_client(&base, Arc::new(MemorySessionStore::new()));

    let response = client
        .media()
        .upload_photo("p1", "cover.jpg", vec![0xFF, 0xD8], Some("المسبح"))
        .await
        .unwrap();

    assert_eq!(response.media.unwrap().id, "m1");
    let attempt = recorded.lock().unwrap()[0].clone();
    assert!(attempt.body.contains("cover.jpg"));
    assert!(attempt.body.contains("caption"));
}

// ============================================================================
// Dynamic verbs
// ============================================================================

#[tokio::test]
async fn favorite_toggle_picks_verb_from_desired_state() {
    let (base, recorded) = spawn_fixture(vec![
        Scripted::ok(r#"{"message":"Added"}"#),
        Scripted::ok(r#"{"message":"Removed"}"#),
    ])
    .await;
    let store = Arc::new(MemorySessionStore::with_session(Session::new("tok")));
    let client = test_client(&base, store);

    client.places().set_favorite("p1", true).await.unwrap();
    client.places().set_favorite("p1", false).await.unwrap();

    let attempts = recorded.lock().unwrap().clone();
    assert!(attempts[0]
        .request_line
        .starts_with("POST /api/v1/places/p1/favorite"));
    assert!(attempts[1]
        .request_line
        .starts_with("DELETE /api/v1/places/p1/favorite"));
    // No body on either verb
    assert_eq!(attempts[0].content_type, None);
}

// ============================================================================
// Transport failures
// ============================================================================

#[tokio::test]
async fn connection_refused_is_retried_then_surfaced_without_status() {
    // Bind and immediately drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}/api/v1", listener.local_addr().unwrap());
    drop(listener);

    let client = test_client(&base, Arc::new(MemorySessionStore::new()));
    let err = client.get::<Value>("/places", &[]).await.unwrap_err();

    assert_eq!(err.status(), None);
    assert!(matches!(err, ApiError::Transport(_) | ApiError::Timeout { .. }));
}
