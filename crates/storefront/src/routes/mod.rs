//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                   - Home page
//!
//! # Catalog
//! GET  /minorista                          - Retail shop (filters, sort, pagination)
//! GET  /productos/{category}               - Category listing (brand and size filters)
//! GET  /productos/{category}/{id}          - Product detail
//! GET  /productos/{category}/{id}/whatsapp - Redirect to a product inquiry chat
//!
//! # Cart (HTMX fragments)
//! GET  /carrito                            - Cart page
//! POST /carrito/agregar                    - Add to cart (returns count badge, triggers cart-updated)
//! POST /carrito/actualizar                 - Update quantity (returns cart_items fragment)
//! POST /carrito/eliminar                   - Remove line (returns cart_items fragment)
//! POST /carrito/vaciar                     - Clear cart (returns cart_items fragment)
//! GET  /carrito/cantidad                   - Cart count badge (fragment)
//! GET  /carrito/pedido                     - Redirect to a WhatsApp order chat
//!
//! # Leads
//! GET  /contacto                           - Contact page
//! POST /contacto                           - Submit contact form
//! GET  /contacto/whatsapp                  - Redirect to a general inquiry chat
//! GET  /mayorista                          - Wholesale page
//! POST /mayorista                          - Submit wholesale lead
//! GET  /mayorista/whatsapp                 - Redirect to a wholesale inquiry chat
//!
//! # Pages
//! GET  /quienes-somos                      - About page (markdown)
//! GET  /donde-estamos                      - Store locations and hours
//! ```
//!
//! Form submissions and cart mutations are rate limited per client IP.

pub mod cart;
pub mod catalog;
pub mod contact;
pub mod home;
pub mod pages;
pub mod products;
pub mod wholesale;

use axum::{
    Router,
    routing::{get, post},
};

use crate::error::AppError;
use crate::middleware::{cart_rate_limiter, form_rate_limiter};
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/{category}", get(catalog::category))
        .route("/{category}/{id}", get(products::show))
        .route("/{category}/{id}/whatsapp", get(products::whatsapp))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    let mutations = Router::new()
        .route("/agregar", post(cart::add))
        .route("/actualizar", post(cart::update))
        .route("/eliminar", post(cart::remove))
        .route("/vaciar", post(cart::clear))
        .layer(cart_rate_limiter());

    Router::new()
        .route("/", get(cart::show))
        .route("/cantidad", get(cart::count))
        .route("/pedido", get(cart::order))
        .merge(mutations)
}

/// Create the contact and wholesale lead routes.
pub fn lead_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/contacto",
            get(contact::show).merge(post(contact::submit).layer(form_rate_limiter())),
        )
        .route("/contacto/whatsapp", get(contact::whatsapp))
        .route(
            "/mayorista",
            get(wholesale::show).merge(post(wholesale::submit).layer(form_rate_limiter())),
        )
        .route("/mayorista/whatsapp", get(wholesale::whatsapp))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog
        .route("/minorista", get(catalog::retail))
        .nest("/productos", product_routes())
        // Cart
        .nest("/carrito", cart_routes())
        // Leads
        .merge(lead_routes())
        // Content pages
        .route("/quienes-somos", get(pages::about))
        .route("/donde-estamos", get(pages::locations))
        .fallback(not_found)
}

async fn not_found() -> AppError {
    AppError::NotFound("route".to_string())
}
