//! Integration tests for the session cart and the WhatsApp order hand-off.
//!
//! Every test drives one router instance so the in-memory session store is
//! shared between requests; the session cookie is carried by hand.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use jacobo_integration_tests::{body_text, get, location, post_form, session_cookie, test_app};

#[tokio::test]
async fn test_add_to_cart_htmx_returns_badge() {
    let app = test_app();
    let response = post_form(
        &app,
        "/carrito/agregar",
        "product_id=1&size=M&color=Blanco&quantity=2",
        None,
        true,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["hx-trigger"], "cart-updated");
    assert!(session_cookie(response.headers()).is_some());
    assert!(body_text(response).await.contains(">2</span>"));
}

#[tokio::test]
async fn test_add_to_cart_without_htmx_redirects() {
    let app = test_app();
    let response = post_form(
        &app,
        "/carrito/agregar",
        "product_id=1&size=M&color=Blanco",
        None,
        false,
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/carrito");
}

#[tokio::test]
async fn test_same_variant_merges_into_one_line() {
    let app = test_app();
    let first = post_form(
        &app,
        "/carrito/agregar",
        "product_id=2&size=L&color=Gris",
        None,
        true,
    )
    .await;
    let cookie = session_cookie(first.headers()).unwrap();

    post_form(
        &app,
        "/carrito/agregar",
        "product_id=2&size=L&color=Gris&quantity=2",
        Some(&cookie),
        true,
    )
    .await;
    post_form(
        &app,
        "/carrito/agregar",
        "product_id=2&size=XL&color=Gris",
        Some(&cookie),
        true,
    )
    .await;

    let count = body_text(get(&app, "/carrito/cantidad", Some(&cookie)).await).await;
    assert!(count.contains(">4</span>"));

    let page = body_text(get(&app, "/carrito", Some(&cookie)).await).await;
    assert_eq!(page.matches("Talle: L").count(), 1);
    assert_eq!(page.matches("Talle: XL").count(), 1);
    assert!(page.contains("$60.000"));
}

#[tokio::test]
async fn test_add_rejects_invalid_variants() {
    let app = test_app();

    let missing_size = post_form(&app, "/carrito/agregar", "product_id=1&color=Blanco", None, true).await;
    assert_eq!(missing_size.status(), StatusCode::BAD_REQUEST);

    let wrong_color = post_form(
        &app,
        "/carrito/agregar",
        "product_id=1&size=M&color=Rojo",
        None,
        true,
    )
    .await;
    assert_eq!(wrong_color.status(), StatusCode::BAD_REQUEST);

    let unknown = post_form(&app, "/carrito/agregar", "product_id=999", None, true).await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_and_remove_lines() {
    let app = test_app();
    let added = post_form(
        &app,
        "/carrito/agregar",
        "product_id=3&size=S&color=Verde",
        None,
        true,
    )
    .await;
    let cookie = session_cookie(added.headers()).unwrap();

    let updated = post_form(
        &app,
        "/carrito/actualizar",
        "product_id=3&size=S&color=Verde&quantity=5",
        Some(&cookie),
        true,
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(updated.headers()["hx-trigger"], "cart-updated");
    assert!(body_text(updated).await.contains("$75.000"));

    let removed = post_form(
        &app,
        "/carrito/eliminar",
        "product_id=3&size=S&color=Verde",
        Some(&cookie),
        true,
    )
    .await;
    assert!(body_text(removed).await.contains("Tu carrito está vacío"));

    let missing = post_form(
        &app,
        "/carrito/eliminar",
        "product_id=3&size=S&color=Verde",
        Some(&cookie),
        true,
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_to_zero_removes_line() {
    let app = test_app();
    let added = post_form(
        &app,
        "/carrito/agregar",
        "product_id=4&size=40&color=Verde",
        None,
        true,
    )
    .await;
    let cookie = session_cookie(added.headers()).unwrap();

    let response = post_form(
        &app,
        "/carrito/actualizar",
        "product_id=4&size=40&color=Verde&quantity=0",
        Some(&cookie),
        false,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let count = body_text(get(&app, "/carrito/cantidad", Some(&cookie)).await).await;
    assert!(!count.contains("cart-badge"));
}

#[tokio::test]
async fn test_clear_cart() {
    let app = test_app();
    let added = post_form(
        &app,
        "/carrito/agregar",
        "product_id=1&size=S&color=Blanco",
        None,
        true,
    )
    .await;
    let cookie = session_cookie(added.headers()).unwrap();

    let cleared = post_form(&app, "/carrito/vaciar", "", Some(&cookie), true).await;
    assert!(body_text(cleared).await.contains("Tu carrito está vacío"));
}

// =============================================================================
// Order
// =============================================================================

#[tokio::test]
async fn test_order_redirects_to_whatsapp() {
    let app = test_app();
    let added = post_form(
        &app,
        "/carrito/agregar",
        "product_id=1&size=M&color=Blanco&quantity=3",
        None,
        true,
    )
    .await;
    let cookie = session_cookie(added.headers()).unwrap();

    let response = get(&app, "/carrito/pedido", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let target = location(&response);
    assert!(target.starts_with("https://wa.me/5493513804567?text="));
    assert!(target.contains("Camisa%20Ombu%20Blanca"));
    assert!(target.contains("Cantidad%3A%203"));
}

#[tokio::test]
async fn test_order_with_empty_cart_returns_to_cart() {
    let app = test_app();
    let response = get(&app, "/carrito/pedido", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/carrito?vacio=1");

    let page = body_text(get(&app, "/carrito?vacio=1", None).await).await;
    assert!(page.contains("Agregá al menos un producto"));
}

#[tokio::test]
async fn test_pages_render_cart_badge_in_header() {
    let app = test_app();
    let empty = body_text(get(&app, "/minorista", None).await).await;
    assert!(!empty.contains("class=\"cart-badge\""));

    let added = post_form(
        &app,
        "/carrito/agregar",
        "product_id=1&size=M&color=Blanco",
        None,
        true,
    )
    .await;
    let cookie = session_cookie(added.headers()).unwrap();

    for uri in ["/", "/minorista", "/contacto", "/mayorista"] {
        let page = body_text(get(&app, uri, Some(&cookie)).await).await;
        assert!(
            page.contains("class=\"cart-badge\">1</span>"),
            "badge missing on {uri}"
        );
    }
}
