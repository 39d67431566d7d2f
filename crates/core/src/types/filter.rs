//! Listing filters and sort orders.
//!
//! A [`ProductFilter`] is a pure predicate: every populated field must match
//! (logical AND), and within a field any listed value may match (logical OR).

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::category::ProductCategory;
use super::price::Price;
use super::product::Product;

/// Criteria for narrowing down the catalog.
///
/// Empty vectors and `None` bounds mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    #[serde(default)]
    pub categories: Vec<ProductCategory>,
    #[serde(default)]
    pub brands: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub min_price: Option<Price>,
    #[serde(default)]
    pub max_price: Option<Price>,
}

impl ProductFilter {
    /// Whether no constraint is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.brands.is_empty()
            && self.sizes.is_empty()
            && self.colors.is_empty()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    /// Whether `product` satisfies every populated criterion.
    ///
    /// Products without sizes (or colors) never match a size (or color)
    /// constraint, and products without a price never match a price bound.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&product.category) {
            return false;
        }

        if !self.brands.is_empty() && !self.brands.iter().any(|b| *b == product.brand) {
            return false;
        }

        if !self.sizes.is_empty() && !product.offers_any_size(&self.sizes) {
            return false;
        }

        if !self.colors.is_empty() && !product.offers_any_color(&self.colors) {
            return false;
        }

        if let Some(min) = self.min_price {
            match product.price {
                Some(price) if price.amount >= min.amount => {}
                _ => return false,
            }
        }

        if let Some(max) = self.max_price {
            match product.price {
                Some(price) if price.amount <= max.amount => {}
                _ => return false,
            }
        }

        true
    }
}

/// Order of products in a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Most recently added first.
    #[default]
    #[serde(rename = "newest")]
    Newest,
    #[serde(rename = "price-low")]
    PriceLow,
    #[serde(rename = "price-high")]
    PriceHigh,
    #[serde(rename = "name-asc")]
    NameAsc,
    #[serde(rename = "name-desc")]
    NameDesc,
}

impl SortOrder {
    /// Every sort order, in the order the selector lists them.
    pub const ALL: [Self; 5] = [
        Self::Newest,
        Self::PriceLow,
        Self::PriceHigh,
        Self::NameAsc,
        Self::NameDesc,
    ];

    /// Query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
        }
    }

    /// Label for the sort selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "Más recientes",
            Self::PriceLow => "Precio: menor a mayor",
            Self::PriceHigh => "Precio: mayor a menor",
            Self::NameAsc => "Nombre: A-Z",
            Self::NameDesc => "Nombre: Z-A",
        }
    }

    /// Compare two products under this order.
    ///
    /// Missing prices compare as zero.
    #[must_use]
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Newest => b.created_at.cmp(&a.created_at),
            Self::PriceLow => price_or_zero(a).cmp(&price_or_zero(b)),
            Self::PriceHigh => price_or_zero(b).cmp(&price_or_zero(a)),
            Self::NameAsc => collate(&a.name, &b.name),
            Self::NameDesc => collate(&b.name, &a.name),
        }
    }

    /// Sort `products` in place. The sort is stable.
    pub fn sort(self, products: &mut [&Product]) {
        products.sort_by(|a, b| self.compare(a, b));
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known sort order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order: {0}")]
pub struct UnknownSortOrder(pub String);

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == s.trim())
            .ok_or_else(|| UnknownSortOrder(s.to_string()))
    }
}

fn price_or_zero(product: &Product) -> rust_decimal::Decimal {
    product.price.map(|p| p.amount).unwrap_or_default()
}

/// Case- and accent-insensitive comparison, falling back to the raw strings
/// so that the order stays total.
fn collate(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}

fn fold(s: &str) -> String {
    s.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}
