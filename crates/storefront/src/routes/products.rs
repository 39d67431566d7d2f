//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use jacobo_core::{Product, ProductCategory, ProductId};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::models::CartCount;
use crate::state::AppState;

/// Related products shown under the detail view.
const RELATED_LIMIT: usize = 4;

/// Product card data for listings and the home page.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub name: String,
    pub brand: String,
    pub url: String,
    pub image: String,
    pub price: Option<String>,
    pub category: &'static str,
    pub in_stock: bool,
}

/// Product display data for the detail page.
#[derive(Clone)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub brand: String,
    pub url: String,
    pub category_slug: &'static str,
    pub category_name: &'static str,
    pub image: String,
    pub gallery: Vec<String>,
    pub price: Option<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub features: Vec<String>,
    pub in_stock: bool,
}

/// Canonical URL of a product detail page.
#[must_use]
pub fn product_url(product: &Product) -> String {
    format!("/productos/{}/{}", product.category.slug(), product.id)
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            url: product_url(product),
            image: product.image.clone(),
            price: product.price.map(|p| p.to_string()),
            category: product.category.display_name(),
            in_stock: product.in_stock,
        }
    }
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            description: product.description.clone(),
            brand: product.brand.clone(),
            url: product_url(product),
            category_slug: product.category.slug(),
            category_name: product.category.display_name(),
            image: product.gallery_or_primary().to_string(),
            gallery: product.gallery.clone(),
            price: product.price.map(|p| p.to_string()),
            sizes: product.size_list().to_vec(),
            colors: product.color_list().to_vec(),
            features: product.feature_list().to_vec(),
            in_stock: product.in_stock,
        }
    }
}

/// Variant chosen for a WhatsApp inquiry.
#[derive(Debug, Default, Deserialize)]
pub struct VariantQuery {
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
    pub related_products: Vec<ProductCardView>,
    pub cart_count: u32,
}

/// Resolve `/productos/{category}/{id}` to a product.
///
/// The id must exist and the product must belong to the category in the
/// path, so stale or hand-edited URLs 404 instead of showing a product under
/// the wrong section.
pub(crate) fn find_product<'a>(
    state: &'a AppState,
    category: &str,
    id: &str,
) -> Result<&'a Product> {
    let not_found = || AppError::NotFound(format!("product {category}/{id}"));

    let category = category
        .parse::<ProductCategory>()
        .map_err(|_| not_found())?;
    let id = id.parse::<ProductId>().map_err(|_| not_found())?;

    state
        .catalog()
        .get(id)
        .filter(|product| product.category == category)
        .ok_or_else(not_found)
}

/// Display product detail page.
///
/// # Errors
///
/// Returns 404 for an unknown id or a category that does not match.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, String)>,
    CartCount(cart_count): CartCount,
) -> Result<impl IntoResponse> {
    let product = find_product(&state, &category, &id)?;

    let related_products = state
        .catalog()
        .all()
        .iter()
        .filter(|p| p.category == product.category && p.id != product.id)
        .take(RELATED_LIMIT)
        .map(ProductCardView::from)
        .collect();

    Ok(ProductShowTemplate {
        product: ProductView::from(product),
        related_products,
        cart_count,
    })
}

/// Redirect to a WhatsApp chat asking about the product.
///
/// # Errors
///
/// Returns 404 for an unknown id or a category that does not match.
#[instrument(skip(state))]
pub async fn whatsapp(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, String)>,
    Query(variant): Query<VariantQuery>,
) -> Result<Redirect> {
    let product = find_product(&state, &category, &id)?;

    // Ignore variants the product is not offered in
    let size = variant.size.as_deref().filter(|s| product.has_size(s));
    let color = variant.color.as_deref().filter(|c| product.has_color(c));

    tracing::info!(product_id = %product.id, "WhatsApp product inquiry");
    let link = state.whatsapp().product_inquiry(product, size, color);
    Ok(Redirect::to(&link))
}
