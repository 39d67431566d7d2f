//! Catalog listing route handlers.
//!
//! Both listings read their filters from the query string. Keys may repeat
//! (`?size=40&size=42`), so the raw query is parsed by hand instead of
//! through a `Deserialize` struct.

use std::str::FromStr;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, RawQuery, State},
    response::IntoResponse,
};
use jacobo_core::{CurrencyCode, Price, ProductCategory, ProductFilter, SortOrder};
use rust_decimal::Decimal;
use tracing::instrument;
use url::form_urlencoded;

use crate::catalog::{Pagination, ProductPage};
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::CartCount;
use crate::routes::products::ProductCardView;
use crate::state::AppState;

// =============================================================================
// Query Parsing
// =============================================================================

/// Filters, sort order and page requested by a listing URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    pub filter: ProductFilter,
    pub sort: SortOrder,
    pub page: usize,
}

impl ListingQuery {
    /// Parse a raw query string.
    ///
    /// Unknown categories and sort orders, and unparseable numbers, are
    /// ignored rather than rejected.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let mut query = Self {
            page: 1,
            ..Self::default()
        };

        for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "category" => {
                    if let Ok(category) = ProductCategory::from_str(value) {
                        push_unique(&mut query.filter.categories, category);
                    }
                }
                "brand" => push_unique(&mut query.filter.brands, value.to_string()),
                "size" => push_unique(&mut query.filter.sizes, value.to_string()),
                "color" => push_unique(&mut query.filter.colors, value.to_string()),
                "minPrice" => query.filter.min_price = parse_price(value),
                // Zero leaves the range open
                "maxPrice" => {
                    query.filter.max_price = parse_price(value).filter(|p| !p.amount.is_zero());
                }
                "page" => query.page = value.parse().unwrap_or(1),
                "sort" => query.sort = value.parse().unwrap_or_default(),
                _ => {}
            }
        }

        query
    }

    /// Keep only the criteria a category listing honours.
    #[must_use]
    pub fn for_category(self) -> Self {
        Self {
            filter: ProductFilter {
                brands: self.filter.brands,
                sizes: self.filter.sizes,
                ..ProductFilter::default()
            },
            sort: SortOrder::default(),
            page: self.page,
        }
    }

    /// URL of `page` under `path`, keeping every active criterion.
    #[must_use]
    pub fn page_url(&self, path: &str, page: usize) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for category in &self.filter.categories {
            serializer.append_pair("category", category.slug());
        }
        for brand in &self.filter.brands {
            serializer.append_pair("brand", brand);
        }
        for size in &self.filter.sizes {
            serializer.append_pair("size", size);
        }
        for color in &self.filter.colors {
            serializer.append_pair("color", color);
        }
        if let Some(min) = self.filter.min_price {
            serializer.append_pair("minPrice", &min.amount.to_string());
        }
        if let Some(max) = self.filter.max_price {
            serializer.append_pair("maxPrice", &max.amount.to_string());
        }
        if self.sort != SortOrder::default() {
            serializer.append_pair("sort", self.sort.as_str());
        }
        if page > 1 {
            serializer.append_pair("page", &page.to_string());
        }

        let query = serializer.finish();
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{query}")
        }
    }
}

fn push_unique<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if !values.contains(&value) {
        values.push(value);
    }
}

/// Non-negative amount in pesos.
fn parse_price(value: &str) -> Option<Price> {
    Decimal::from_str(value)
        .ok()
        .filter(|amount| !amount.is_sign_negative())
        .map(|amount| Price::new(amount, CurrencyCode::ARS))
}

// =============================================================================
// Views
// =============================================================================

/// One checkbox in a filter panel.
#[derive(Clone)]
pub struct FacetOption {
    pub value: String,
    pub label: String,
    pub checked: bool,
}

/// One entry of the sort selector.
#[derive(Clone)]
pub struct SortOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Numbered pagination link.
#[derive(Clone)]
pub struct PageLink {
    pub number: usize,
    pub url: String,
    pub current: bool,
}

/// Pagination controls, empty when everything fits on one page.
#[derive(Clone, Default)]
pub struct PaginationView {
    pub links: Vec<PageLink>,
    pub previous: Option<String>,
    pub next: Option<String>,
}

impl PaginationView {
    fn new(page: &ProductPage<'_>, query: &ListingQuery, path: &str) -> Self {
        if page.pages <= 1 {
            return Self::default();
        }
        Self {
            links: (1..=page.pages)
                .map(|number| PageLink {
                    number,
                    url: query.page_url(path, number),
                    current: number == page.page,
                })
                .collect(),
            previous: page
                .has_previous()
                .then(|| query.page_url(path, page.page - 1)),
            next: page.has_next().then(|| query.page_url(path, page.page + 1)),
        }
    }
}

fn facet<'a>(values: impl IntoIterator<Item = &'a str>, selected: &[String]) -> Vec<FacetOption> {
    values
        .into_iter()
        .map(|value| FacetOption {
            value: value.to_string(),
            label: value.to_string(),
            checked: selected.iter().any(|s| s == value),
        })
        .collect()
}

/// Listing page template, shared by the retail shop and category pages.
#[derive(Template, WebTemplate)]
#[template(path = "products/listing.html")]
pub struct ListingTemplate {
    pub title: String,
    /// Path the filter form submits to.
    pub action: String,
    /// The retail shop offers every filter and the sort selector.
    pub full_filters: bool,
    pub products: Vec<ProductCardView>,
    pub total: usize,
    pub categories: Vec<FacetOption>,
    pub brands: Vec<FacetOption>,
    pub sizes: Vec<FacetOption>,
    pub colors: Vec<FacetOption>,
    pub min_price: String,
    pub max_price: String,
    pub sort_options: Vec<SortOption>,
    pub pagination: PaginationView,
    pub cart_count: u32,
}

impl ListingTemplate {
    fn build(
        state: &AppState,
        title: String,
        action: String,
        full_filters: bool,
        query: &ListingQuery,
        page: &ProductPage<'_>,
        cart_count: u32,
    ) -> Self {
        let catalog = state.catalog();
        let filter = &query.filter;
        let selected_categories: Vec<String> = filter
            .categories
            .iter()
            .map(|c| c.slug().to_string())
            .collect();

        Self {
            title,
            full_filters,
            products: page.products.iter().map(|p| ProductCardView::from(*p)).collect(),
            total: page.total,
            categories: ProductCategory::ALL
                .into_iter()
                .map(|category| FacetOption {
                    value: category.slug().to_string(),
                    label: category.display_name().to_string(),
                    checked: selected_categories.iter().any(|s| s == category.slug()),
                })
                .collect(),
            brands: facet(catalog.brands(), &filter.brands),
            sizes: facet(catalog.sizes(), &filter.sizes),
            colors: facet(catalog.colors(), &filter.colors),
            min_price: filter
                .min_price
                .map(|p| p.amount.to_string())
                .unwrap_or_default(),
            max_price: filter
                .max_price
                .map(|p| p.amount.to_string())
                .unwrap_or_default(),
            sort_options: SortOrder::ALL
                .into_iter()
                .map(|order| SortOption {
                    value: order.as_str(),
                    label: order.label(),
                    selected: order == query.sort,
                })
                .collect(),
            pagination: PaginationView::new(page, query, &action),
            action,
            cart_count,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the retail shop with every filter.
#[instrument(skip(state))]
pub async fn retail(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
    CartCount(cart_count): CartCount,
) -> impl IntoResponse {
    let query = ListingQuery::parse(raw.as_deref());
    let pagination = Pagination::new(query.page, state.config().page_size);
    let page = state.catalog().query(&query.filter, pagination, query.sort);

    tracing::debug!(total = page.total, page = page.page, "Retail listing");

    ListingTemplate::build(
        &state,
        "TIENDA MINORISTA".to_string(),
        "/minorista".to_string(),
        true,
        &query,
        &page,
        cart_count,
    )
}

/// Display one category, narrowed by brand and size.
///
/// # Errors
///
/// Returns 404 if the category does not exist.
#[instrument(skip(state))]
pub async fn category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RawQuery(raw): RawQuery,
    CartCount(cart_count): CartCount,
) -> Result<impl IntoResponse> {
    let category = slug
        .parse::<ProductCategory>()
        .map_err(|e| AppError::NotFound(e.to_string()))?;

    let query = ListingQuery::parse(raw.as_deref()).for_category();
    let pagination = Pagination::new(query.page, state.config().page_size);
    let page = state
        .catalog()
        .by_category(category, &query.filter, pagination);

    Ok(ListingTemplate::build(
        &state,
        category.display_name().to_string(),
        format!("/productos/{}", category.slug()),
        false,
        &query,
        &page,
        cart_count,
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repeated_keys() {
        let query = ListingQuery::parse(Some(
            "category=trabajo&category=campo&size=40&size=42&size=40&brand=OMBU&sort=price-high&page=2",
        ));

        assert_eq!(
            query.filter.categories,
            vec![ProductCategory::Trabajo, ProductCategory::Campo]
        );
        assert_eq!(query.filter.sizes, vec!["40", "42"]);
        assert_eq!(query.filter.brands, vec!["OMBU"]);
        assert_eq!(query.sort, SortOrder::PriceHigh);
        assert_eq!(query.page, 2);
    }

    #[test]
    fn test_parse_ignores_garbage() {
        let query = ListingQuery::parse(Some(
            "category=ropa&minPrice=abc&maxPrice=-5&page=dos&sort=random&color=",
        ));

        assert!(query.filter.is_empty());
        assert_eq!(query.sort, SortOrder::Newest);
        assert_eq!(query.page, 1);
        assert_eq!(ListingQuery::parse(None).page, 1);
    }

    #[test]
    fn test_parse_price_bounds() {
        let query = ListingQuery::parse(Some("minPrice=10000&maxPrice=20000.50"));
        assert_eq!(query.filter.min_price, Some(Price::ars(10_000)));
        assert_eq!(
            query.filter.max_price.unwrap().amount,
            Decimal::new(2_000_050, 2)
        );
    }

    #[test]
    fn test_zero_max_price_is_no_bound() {
        let query = ListingQuery::parse(Some("minPrice=0&maxPrice=0"));
        assert_eq!(query.filter.min_price, Some(Price::ars(0)));
        assert!(query.filter.max_price.is_none());
    }

    #[test]
    fn test_page_url_keeps_filters() {
        let query = ListingQuery::parse(Some("size=40&color=Azul%20Marino&sort=name-asc"));
        assert_eq!(
            query.page_url("/minorista", 2),
            "/minorista?size=40&color=Azul+Marino&sort=name-asc&page=2"
        );
        assert_eq!(
            ListingQuery::parse(None).page_url("/minorista", 1),
            "/minorista"
        );
    }

    #[test]
    fn test_for_category_drops_other_criteria() {
        let query = ListingQuery::parse(Some("brand=OMBU&size=L&color=Verde&sort=name-desc&page=3"))
            .for_category();

        assert_eq!(query.filter.brands, vec!["OMBU"]);
        assert_eq!(query.filter.sizes, vec!["L"]);
        assert!(query.filter.colors.is_empty());
        assert_eq!(query.sort, SortOrder::Newest);
        assert_eq!(query.page, 3);
    }
}
