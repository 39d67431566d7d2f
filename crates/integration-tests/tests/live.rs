//! Smoke tests against a running storefront.
//!
//! Start the server first, then run with `--ignored`. The target defaults to
//! `http://localhost:3000`; set `STOREFRONT_URL` to point elsewhere.

#![allow(clippy::unwrap_used)]

use jacobo_integration_tests::storefront_url;
use reqwest::{Client, StatusCode, redirect::Policy};

fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .unwrap()
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_live_health() {
    let resp = client()
        .get(format!("{}/health", storefront_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_live_cart_round_trip() {
    let client = client();
    let base = storefront_url();

    let resp = client
        .post(format!("{base}/carrito/agregar"))
        .header("hx-request", "true")
        .form(&[("product_id", "1"), ("size", "M"), ("color", "Blanco")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base}/carrito/pedido"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp.headers()["location"].to_str().unwrap();
    assert!(location.starts_with("https://wa.me/"));
}
