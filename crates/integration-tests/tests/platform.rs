//! Integration tests for cross-cutting behaviour: health, errors, headers,
//! static files and rate limiting.

#![allow(clippy::unwrap_used)]

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use jacobo_integration_tests::{body_text, get, post_form, send, test_app};

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let response = get(&app, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_unknown_route_renders_error_page() {
    let app = test_app();
    let response = get(&app, "/no-existe", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_text(response).await;
    assert!(body.contains("Página no encontrada"));
}

// =============================================================================
// Headers
// =============================================================================

#[tokio::test]
async fn test_html_pages_carry_security_headers() {
    let app = test_app();
    let response = get(&app, "/", None).await;
    let headers = response.headers();

    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers[header::CACHE_CONTROL], "no-store");
    let csp = headers["content-security-policy"].to_str().unwrap();
    assert!(csp.contains("script-src 'self'"));
    assert!(csp.contains("https://wa.me"));
}

#[tokio::test]
async fn test_request_id_is_generated_and_echoed() {
    let app = test_app();

    let response = get(&app, "/health", None).await;
    assert!(response.headers().contains_key("x-request-id"));

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "edge-1234")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.headers()["x-request-id"], "edge-1234");
}

#[tokio::test]
async fn test_static_stylesheet_is_cacheable() {
    let app = test_app();
    let response = get(&app, "/static/css/main.css", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::CACHE_CONTROL).is_none());
}

// =============================================================================
// Rate Limiting
// =============================================================================

#[tokio::test]
async fn test_contact_form_is_rate_limited() {
    let app = test_app();

    // Burst of five, then the sixth request inside the window is refused
    for _ in 0..5 {
        let response = post_form(&app, "/contacto", "name=Ana", None, false).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
    let response = post_form(&app, "/contacto", "name=Ana", None, false).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(body_text(response).await.contains("Demasiadas solicitudes"));

    // Reading the page is never limited
    let response = get(&app, "/contacto", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}
