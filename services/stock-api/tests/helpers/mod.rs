//! Shared fixtures for the HTTP-level tests

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
};
use serde_json::Value;
use std::sync::Once;
use tempfile::TempDir;
use tower::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stock_api::{ApiConfig, AppState, create_router, store::{Catalog, Ledger}};

pub const LANDING_HTML: &str = "<html><body>stock api landing</body></html>";
pub const STYLE_CSS: &str = "body { margin: 0; }";

static INIT: Once = Once::new();

/// Initialize tracing once across all tests
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "stock_api=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}

/// Router plus the state and asset directory behind it
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _assets: TempDir,
}

impl TestApp {
    pub fn new(state: AppState) -> Self {
        init_test_env();

        let assets = TempDir::new().unwrap();
        let static_dir = assets.path().join("static");
        let pages_dir = assets.path().join("pages");
        std::fs::create_dir_all(&static_dir).unwrap();
        std::fs::create_dir_all(&pages_dir).unwrap();
        std::fs::write(pages_dir.join("index.html"), LANDING_HTML).unwrap();
        std::fs::write(static_dir.join("style.css"), STYLE_CSS).unwrap();

        let mut config = ApiConfig::default();
        config.assets.static_dir = static_dir;
        config.assets.landing_page = pages_dir.join("index.html");

        Self {
            router: create_router(&config, state.clone()),
            state,
            _assets: assets,
        }
    }

    /// Seeded catalog and seeded ledger
    pub fn seeded() -> Self {
        Self::new(AppState::seeded())
    }

    /// Seeded catalog and an empty ledger
    pub fn empty_ledger() -> Self {
        Self::new(AppState::new(Catalog::seeded(), Ledger::new()))
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::builder().method(Method::GET).uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.post_raw(uri, body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: impl Into<Body>) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        TestResponse::read(response).await
    }
}

/// Fully buffered response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    async fn read(response: axum::response::Response) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}
