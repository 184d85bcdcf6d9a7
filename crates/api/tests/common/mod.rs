#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use seodraft_analysis::AnalysisSettings;
use seodraft_api::auth::jwt::{generate_access_token, JwtConfig};
use seodraft_api::config::ServerConfig;
use seodraft_api::router::build_app_router;
use seodraft_api::state::AppState;
use seodraft_core::analysis::{Analysis, AnalysisError, AnalysisGateway};
use seodraft_core::store::memory::MemoryDraftRepository;
use seodraft_core::store::DraftStore;
use seodraft_core::types::DbId;

const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
        analysis: AnalysisSettings {
            api_key: "unused".to_string(),
            model: "openai/gpt-3.5-turbo".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            temperature: 0.7,
            timeout_secs: 5,
            referer: "http://localhost:3000".to_string(),
            app_title: "SEO Content Tool".to_string(),
        },
    }
}

/// A valid Bearer token for `user_id`.
pub fn token_for(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Stub analysis gateway
// ---------------------------------------------------------------------------

/// Gateway returning a canned result and recording what it was asked.
pub struct StubGateway {
    reply: Result<Analysis, AnalysisError>,
    calls: AtomicUsize,
    last_request: Mutex<Option<(String, String)>>,
}

impl StubGateway {
    pub fn scoring(score: i32, keywords: &[&str], suggestions: &[&str]) -> Self {
        Self::with_reply(Ok(Analysis {
            score,
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        }))
    }

    pub fn failing(err: AnalysisError) -> Self {
        Self::with_reply(Err(err))
    }

    fn with_reply(reply: Result<Analysis, AnalysisError>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(title, content)` of the most recent call.
    pub fn last_request(&self) -> Option<(String, String)> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisGateway for StubGateway {
    async fn analyze(&self, title: &str, content: &str) -> Result<Analysis, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some((title.to_string(), content.to_string()));
        self.reply.clone()
    }
}

// ---------------------------------------------------------------------------
// Test application
// ---------------------------------------------------------------------------

/// The full router over an in-memory repository and a stub gateway.
///
/// Uses [`build_app_router`], so requests go through the same middleware
/// stack (CORS, request ID, timeout, tracing, panic recovery) as `main`.
pub struct TestApp {
    pub router: Router,
    pub gateway: Arc<StubGateway>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_gateway(StubGateway::scoring(
            72,
            &["rust async", "tokio runtime"],
            &["Add a summary", "Use more headings"],
        ))
    }

    pub fn with_gateway(gateway: StubGateway) -> Self {
        let config = test_config();
        let gateway = Arc::new(gateway);
        let state = AppState {
            pool: None,
            config: Arc::new(config.clone()),
            drafts: DraftStore::new(Arc::new(MemoryDraftRepository::new())),
            analyzer: gateway.clone(),
        };

        Self {
            router: build_app_router(state, &config),
            gateway,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn send_as(
        &self,
        method: Method,
        uri: &str,
        user_id: DbId,
        body: Option<serde_json::Value>,
    ) -> Response<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("authorization", format!("Bearer {}", token_for(user_id)));

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn get(&self, uri: &str, user_id: DbId) -> Response<Body> {
        self.send_as(Method::GET, uri, user_id, None).await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        user_id: DbId,
        body: serde_json::Value,
    ) -> Response<Body> {
        self.send_as(Method::POST, uri, user_id, Some(body)).await
    }

    pub async fn put_json(
        &self,
        uri: &str,
        user_id: DbId,
        body: serde_json::Value,
    ) -> Response<Body> {
        self.send_as(Method::PUT, uri, user_id, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, user_id: DbId) -> Response<Body> {
        self.send_as(Method::DELETE, uri, user_id, None).await
    }

    /// Create a draft for `user_id` and return its `data` object.
    pub async fn create_draft(
        &self,
        user_id: DbId,
        title: &str,
        content: &str,
    ) -> serde_json::Value {
        let response = self
            .post_json(
                "/api/v1/drafts",
                user_id,
                serde_json::json!({"title": title, "content": content}),
            )
            .await;
        body_json(response).await["data"].clone()
    }
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A structured editor payload with one block per entry of `blocks`.
pub fn structured(blocks: &[&str]) -> String {
    let blocks: Vec<_> = blocks
        .iter()
        .enumerate()
        .map(|(i, text)| serde_json::json!({"key": format!("b{i}"), "text": text}))
        .collect();
    serde_json::json!({"blocks": blocks, "entityMap": {}}).to_string()
}
