//! Integration tests for the Jacobo storefront.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process router tests
//! cargo test -p jacobo-integration-tests
//!
//! # Tests against a running server (STOREFRONT_URL, default http://localhost:3000)
//! cargo test -p jacobo-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `catalog` - Home, listings, product pages
//! - `cart` - Session cart and WhatsApp order hand-off
//! - `forms` - Contact and wholesale leads against a mock form backend
//! - `platform` - Health, fallback, security headers, rate limiting
//! - `live` - Smoke tests against a deployed storefront (ignored by default)

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::Path;

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
    response::Response,
    routing::post,
};
use jacobo_storefront::{
    config::StorefrontConfig, content::ContentStore, middleware::session::SESSION_COOKIE_NAME,
    state::AppState,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower::ServiceExt;
use url::Url;

/// Base URL of a running storefront for the ignored live tests.
#[must_use]
pub fn storefront_url() -> String {
    std::env::var("STOREFRONT_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Full application router with the seeded catalog and no form backend.
#[must_use]
pub fn test_app() -> Router {
    app_with_config(StorefrontConfig::default())
}

/// Full application router posting lead forms to `endpoint`.
#[must_use]
pub fn test_app_with_endpoint(endpoint: Url) -> Router {
    app_with_config(StorefrontConfig {
        form_endpoint: Some(endpoint),
        ..StorefrontConfig::default()
    })
}

fn app_with_config(config: StorefrontConfig) -> Router {
    let content = ContentStore::load(Path::new(jacobo_storefront::CONTENT_DIR)).unwrap();
    let state = AppState::seeded(config, content).unwrap();
    jacobo_storefront::app(state)
}

// =============================================================================
// Requests
// =============================================================================

/// Send one request through a clone of `app`.
pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

/// GET `uri`, optionally with a session cookie.
pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

/// POST an urlencoded form, optionally as an HTMX request.
pub async fn post_form(
    app: &Router,
    uri: &str,
    form: &str,
    cookie: Option<&str>,
    htmx: bool,
) -> Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    if htmx {
        builder = builder.header("hx-request", "true");
    }
    send(app, builder.body(Body::from(form.to_string())).unwrap()).await
}

/// Response body as text.
pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// `name=value` pair of the session cookie set by a response, if any.
#[must_use]
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter(|value| value.starts_with(SESSION_COOKIE_NAME))
        .find_map(|value| value.split(';').next())
        .map(str::to_string)
}

/// `Location` header of a redirect.
#[must_use]
pub fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

// =============================================================================
// Mock Form Backend
// =============================================================================

/// Formspree stand-in listening on a random local port.
///
/// `POST /f/accept` answers `200 {"ok": true}`; `POST /f/reject` answers
/// `422` with an `error` message, the way Formspree reports a bad email.
pub struct MockFormBackend {
    base: Url,
}

impl MockFormBackend {
    /// Bind and serve in a background task.
    pub async fn start() -> Self {
        let router = Router::new()
            .route("/f/accept", post(accept))
            .route("/f/reject", post(reject));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base: Url::parse(&format!("http://{addr}")).unwrap(),
        }
    }

    /// Endpoint that accepts every submission.
    #[must_use]
    pub fn accepting(&self) -> Url {
        self.base.join("/f/accept").unwrap()
    }

    /// Endpoint that rejects every submission.
    #[must_use]
    pub fn rejecting(&self) -> Url {
        self.base.join("/f/reject").unwrap()
    }
}

async fn accept(Json(_body): Json<Value>) -> Json<Value> {
    Json(json!({ "ok": true, "next": "/thanks" }))
}

async fn reject(Json(_body): Json<Value>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": "El correo fue rechazado por el servidor" })),
    )
}
