//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Forms also work without JavaScript: non-HTMX requests are redirected
//! back to a full page. The cart itself lives in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use jacobo_core::{Cart, CartItem, LineKey, ProductId};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::models::{load_cart, save_cart};
use crate::routes::products::product_url;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: i32,
    pub name: String,
    pub url: Option<String>,
    pub image: String,
    pub size: String,
    pub color: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    fn new(cart: &Cart, state: &AppState) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartItemView {
                    product_id: item.product_id.as_i32(),
                    name: item.name.clone(),
                    url: state.catalog().get(item.product_id).map(product_url),
                    image: item.image.clone(),
                    size: item.size.clone().unwrap_or_default(),
                    color: item.color.clone().unwrap_or_default(),
                    quantity: item.quantity,
                    price: item.price.to_string(),
                    line_price: item.line_total().to_string(),
                })
                .collect(),
            subtotal: cart.subtotal().to_string(),
            item_count: cart.item_count(),
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// Identifies one cart line.
#[derive(Debug, Deserialize)]
pub struct LineForm {
    pub product_id: i32,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl LineForm {
    fn key(&self) -> LineKey {
        LineKey::new(
            ProductId::new(self.product_id),
            self.size.clone(),
            self.color.clone(),
        )
    }
}

/// Update cart form data. A quantity of zero removes the line.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i32,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    pub quantity: u32,
}

impl UpdateCartForm {
    fn key(&self) -> LineKey {
        LineKey::new(
            ProductId::new(self.product_id),
            self.size.clone(),
            self.color.clone(),
        )
    }
}

/// Query flags of the cart page.
#[derive(Debug, Default, Deserialize)]
pub struct CartPageQuery {
    /// Set when an order was attempted with an empty cart.
    #[serde(default)]
    pub vacio: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub empty_order_attempt: bool,
    pub cart_count: u32,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers.get("hx-request").is_some_and(|v| v == "true")
}

/// Respond to a cart mutation.
///
/// HTMX requests get the refreshed items fragment plus a trigger so the
/// header badge reloads; plain form posts are sent back to the cart page.
fn cart_changed(headers: &HeaderMap, cart: &Cart, state: &AppState) -> Response {
    if !is_htmx(headers) {
        return Redirect::to("/carrito").into_response();
    }
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::new(cart, state),
        },
    )
        .into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CartPageQuery>,
) -> Result<impl IntoResponse> {
    let cart = load_cart(&session).await?;

    Ok(CartShowTemplate {
        cart: CartView::new(&cart, &state),
        empty_order_attempt: query.vacio.is_some() && cart.is_empty(),
        cart_count: cart.item_count(),
    })
}

/// Add item to cart (HTMX).
///
/// Lines with the same product, size and color are merged. Returns the
/// updated count badge and an HTMX trigger for other cart widgets.
///
/// # Errors
///
/// Returns 404 for an unknown product and 400 when the product has no
/// price, or the size or color is missing or not offered.
#[instrument(skip(state, session, headers))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product_id = ProductId::new(form.product_id);
    let product = state
        .catalog()
        .get(product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    let price = product.price.ok_or_else(|| {
        AppError::BadRequest("Este producto se vende a pedido. Consultanos por WhatsApp.".into())
    })?;

    let size = selected(form.size);
    let color = selected(form.color);
    check_variant(product.size_list(), size.as_deref(), "Elegí un talle")?;
    check_variant(product.color_list(), color.as_deref(), "Elegí un color")?;

    let mut cart = load_cart(&session).await?;
    cart.add(CartItem {
        product_id,
        name: product.name.clone(),
        price,
        image: product.image.clone(),
        size,
        color,
        quantity: form.quantity.unwrap_or(1),
    })?;
    save_cart(&session, &cart).await?;

    let id = product_id.to_string();
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", id.as_str())]));
    tracing::info!(product_id = %product_id, items = cart.item_count(), "Added to cart");

    if !is_htmx(&headers) {
        return Ok(Redirect::to("/carrito").into_response());
    }
    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.item_count(),
        },
    )
        .into_response())
}

fn selected(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A product offered in variants needs one of them; one without needs none.
fn check_variant(offered: &[String], chosen: Option<&str>, missing: &str) -> Result<()> {
    match chosen {
        None if offered.is_empty() => Ok(()),
        None => Err(AppError::BadRequest(missing.to_string())),
        Some(value) if offered.iter().any(|o| o == value) => Ok(()),
        Some(value) => Err(AppError::BadRequest(format!(
            "La opción «{value}» no está disponible para este producto"
        ))),
    }
}

/// Update cart item quantity (HTMX).
///
/// # Errors
///
/// Returns 404 if the line is not in the cart.
#[instrument(skip(state, session, headers))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let mut cart = load_cart(&session).await?;
    cart.update_quantity(&form.key(), form.quantity)?;
    save_cart(&session, &cart).await?;

    Ok(cart_changed(&headers, &cart, &state))
}

/// Remove item from cart (HTMX).
///
/// # Errors
///
/// Returns 404 if the line is not in the cart.
#[instrument(skip(state, session, headers))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<LineForm>,
) -> Result<Response> {
    let mut cart = load_cart(&session).await?;
    cart.remove(&form.key())?;
    save_cart(&session, &cart).await?;

    Ok(cart_changed(&headers, &cart, &state))
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
#[instrument(skip(state, session, headers))]
pub async fn clear(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response> {
    let mut cart = load_cart(&session).await?;
    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(cart_changed(&headers, &cart, &state))
}

/// Get cart count badge (HTMX).
///
/// # Errors
///
/// Returns an error if the session cannot be read.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<impl IntoResponse> {
    let cart = load_cart(&session).await?;
    Ok(CartCountTemplate {
        count: cart.item_count(),
    })
}

/// Redirect to a WhatsApp chat with the whole cart as an order.
///
/// An empty cart goes back to the cart page with a notice.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
#[instrument(skip(state, session))]
pub async fn order(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let cart = load_cart(&session).await?;

    match state.whatsapp().cart_order(&cart) {
        Ok(link) => {
            tracing::info!(lines = cart.items().len(), "WhatsApp cart order");
            Ok(Redirect::to(&link))
        }
        Err(e) => {
            tracing::debug!(error = %e, "Order attempted with empty cart");
            Ok(Redirect::to("/carrito?vacio=1"))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn offered(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_check_variant() {
        let sizes = offered(&["S", "M"]);
        assert!(check_variant(&sizes, Some("M"), "Elegí un talle").is_ok());
        assert!(check_variant(&[], None, "Elegí un talle").is_ok());

        let err = check_variant(&sizes, None, "Elegí un talle").unwrap_err();
        assert_eq!(err.public_message(), "Elegí un talle");
        assert!(matches!(
            check_variant(&sizes, Some("XL"), "Elegí un talle"),
            Err(AppError::BadRequest(_))
        ));
        assert!(check_variant(&[], Some("M"), "Elegí un talle").is_err());
    }

    #[test]
    fn test_selected_trims_blanks() {
        assert_eq!(selected(Some("  ".to_string())), None);
        assert_eq!(selected(Some(" L ".to_string())), Some("L".to_string()));
        assert_eq!(selected(None), None);
    }

    #[test]
    fn test_htmx_detection() {
        let mut headers = HeaderMap::new();
        assert!(!is_htmx(&headers));
        headers.insert("hx-request", "true".parse().unwrap());
        assert!(is_htmx(&headers));
    }
}
