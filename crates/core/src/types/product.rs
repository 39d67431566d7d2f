//! Catalog product model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::ProductCategory;
use super::id::ProductId;
use super::price::Price;

/// A product in the static catalog.
///
/// Products are built once at startup and never mutated. Optional lists are
/// `None` when the product does not come in sizes/colors at all, which is
/// different from an empty selection for filtering purposes: a product without
/// sizes never matches a size filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: ProductCategory,
    pub brand: String,
    /// Primary image path, used on cards and in the cart.
    pub image: String,
    /// Additional gallery images for the detail page.
    #[serde(default)]
    pub gallery: Vec<String>,
    /// Products without a price are sold on request only.
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub sizes: Option<Vec<String>>,
    #[serde(default)]
    pub colors: Option<Vec<String>>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    pub in_stock: bool,
    #[serde(default)]
    pub featured: bool,
    pub created_at: NaiveDate,
}

impl Product {
    /// Whether the product is offered in `size`.
    #[must_use]
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes
            .as_deref()
            .is_some_and(|sizes| sizes.iter().any(|s| s == size))
    }

    /// Whether the product is offered in `color`.
    #[must_use]
    pub fn has_color(&self, color: &str) -> bool {
        self.colors
            .as_deref()
            .is_some_and(|colors| colors.iter().any(|c| c == color))
    }

    /// Whether at least one of `wanted` is among the product's sizes.
    #[must_use]
    pub fn offers_any_size(&self, wanted: &[String]) -> bool {
        wanted.iter().any(|size| self.has_size(size))
    }

    /// Whether at least one of `wanted` is among the product's colors.
    #[must_use]
    pub fn offers_any_color(&self, wanted: &[String]) -> bool {
        wanted.iter().any(|color| self.has_color(color))
    }

    /// Sizes offered, or an empty slice.
    #[must_use]
    pub fn size_list(&self) -> &[String] {
        self.sizes.as_deref().unwrap_or_default()
    }

    /// Colors offered, or an empty slice.
    #[must_use]
    pub fn color_list(&self) -> &[String] {
        self.colors.as_deref().unwrap_or_default()
    }

    /// Feature bullet points, or an empty slice.
    #[must_use]
    pub fn feature_list(&self) -> &[String] {
        self.features.as_deref().unwrap_or_default()
    }

    /// Main image for the detail page: the first gallery image if there is
    /// one, else the primary image.
    #[must_use]
    pub fn gallery_or_primary(&self) -> &str {
        self.gallery.first().map_or(self.image.as_str(), String::as_str)
    }
}
