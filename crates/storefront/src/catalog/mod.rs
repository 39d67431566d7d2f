//! In-memory product catalog and listing queries.
//!
//! The catalog is built once at startup from [`seed::products`] and shared
//! read-only through [`crate::state::AppState`]. Queries are a single pass:
//! filter, sort, then slice out the requested page.

pub mod seed;

use std::cmp::Ordering;
use std::collections::HashSet;

use jacobo_core::{Product, ProductCategory, ProductFilter, ProductId, SortOrder};

/// Products per page when a listing does not ask for a size.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Largest page size a listing may request.
pub const MAX_PAGE_SIZE: usize = 48;

/// Errors building a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
}

/// Requested page of a listing, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    limit: usize,
}

impl Pagination {
    /// Clamp `page` to at least 1 and `limit` to `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    #[must_use]
    pub const fn page(self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn limit(self) -> usize {
        self.limit
    }

    fn offset(self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// One page of a listing.
#[derive(Debug, Clone)]
pub struct ProductPage<'a> {
    pub products: Vec<&'a Product>,
    /// Matches across all pages.
    pub total: usize,
    /// `ceil(total / limit)`; zero when nothing matches.
    pub pages: usize,
    pub page: usize,
    pub limit: usize,
}

impl<'a> ProductPage<'a> {
    fn slice(matches: Vec<&'a Product>, pagination: Pagination) -> Self {
        let total = matches.len();
        let products = matches
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.limit())
            .collect();

        Self {
            products,
            total,
            pages: total.div_ceil(pagination.limit()),
            page: pagination.page(),
            limit: pagination.limit(),
        }
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1 && self.page <= self.pages
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

/// The static product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from a product list, keeping its order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two products share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }
        Ok(Self { products })
    }

    /// The catalog of the live site.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed data is inconsistent.
    pub fn seeded() -> Result<Self, CatalogError> {
        Self::new(seed::products())
    }

    /// Every product, in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Filter, sort and paginate the whole catalog.
    #[must_use]
    pub fn query(
        &self,
        filter: &ProductFilter,
        pagination: Pagination,
        sort: SortOrder,
    ) -> ProductPage<'_> {
        let mut matches: Vec<&Product> =
            self.products.iter().filter(|p| filter.matches(p)).collect();
        sort.sort(&mut matches);
        ProductPage::slice(matches, pagination)
    }

    /// Products of one category, narrowed by brand and size only.
    ///
    /// Other fields of `filter` are ignored. Results keep catalog order.
    #[must_use]
    pub fn by_category(
        &self,
        category: ProductCategory,
        filter: &ProductFilter,
        pagination: Pagination,
    ) -> ProductPage<'_> {
        let narrowed = ProductFilter {
            categories: vec![category],
            brands: filter.brands.clone(),
            sizes: filter.sizes.clone(),
            ..ProductFilter::default()
        };
        let matches = self
            .products
            .iter()
            .filter(|p| narrowed.matches(p))
            .collect();
        ProductPage::slice(matches, pagination)
    }

    /// The first `limit` featured products, in catalog order.
    #[must_use]
    pub fn featured(&self, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.featured)
            .take(limit)
            .collect()
    }

    /// Distinct brands, in first-seen order.
    #[must_use]
    pub fn brands(&self) -> Vec<&str> {
        distinct(self.products.iter().map(|p| p.brand.as_str()))
    }

    /// Distinct colors, in first-seen order.
    #[must_use]
    pub fn colors(&self) -> Vec<&str> {
        distinct(
            self.products
                .iter()
                .flat_map(|p| p.color_list().iter().map(String::as_str)),
        )
    }

    /// Distinct sizes: numeric sizes ascending, then the rest alphabetically.
    #[must_use]
    pub fn sizes(&self) -> Vec<&str> {
        let mut sizes = distinct(
            self.products
                .iter()
                .flat_map(|p| p.size_list().iter().map(String::as_str)),
        );
        sizes.sort_by(|a, b| compare_sizes(a, b));
        sizes
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}

fn compare_sizes(a: &str, b: &str) -> Ordering {
    match (a.parse::<u32>(), b.parse::<u32>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::NaiveDate;
    use jacobo_core::Price;

    use super::*;

    fn catalog() -> Catalog {
        Catalog::seeded().unwrap()
    }

    fn ids(page: &ProductPage<'_>) -> Vec<i32> {
        page.products.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_seed_is_consistent() {
        let catalog = catalog();
        assert_eq!(catalog.all().len(), 15);
        assert!(catalog.get(ProductId::new(8)).is_none());
        assert_eq!(
            catalog.get(ProductId::new(1)).unwrap().name,
            "Camisa Ombu Blanca"
        );
        assert!(catalog.all().iter().all(|p| p.price.is_some()));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let mut products = seed::products();
        products.push(products[0].clone());
        assert!(matches!(
            Catalog::new(products),
            Err(CatalogError::DuplicateId(id)) if id == ProductId::new(1)
        ));
    }

    #[test]
    fn test_query_paginates() {
        let catalog = catalog();
        let filter = ProductFilter::default();

        let first = catalog.query(&filter, Pagination::new(1, 12), SortOrder::Newest);
        assert_eq!(first.total, 15);
        assert_eq!(first.pages, 2);
        assert_eq!(first.products.len(), 12);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let second = catalog.query(&filter, Pagination::new(2, 12), SortOrder::Newest);
        assert_eq!(second.products.len(), 3);
        assert!(second.has_previous());

        let past_end = catalog.query(&filter, Pagination::new(9, 12), SortOrder::Newest);
        assert!(past_end.products.is_empty());
        assert_eq!(past_end.total, 15);
        assert_eq!(past_end.pages, 2);
    }

    #[test]
    fn test_pagination_clamps() {
        let p = Pagination::new(0, 0);
        assert_eq!((p.page(), p.limit()), (1, 1));
        assert_eq!(Pagination::new(3, 500).limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_query_filters_by_category_and_size() {
        let catalog = catalog();
        let filter = ProductFilter {
            categories: vec![ProductCategory::Trabajo],
            sizes: vec!["48".to_string()],
            ..ProductFilter::default()
        };
        let page = catalog.query(&filter, Pagination::default(), SortOrder::Newest);
        assert_eq!(ids(&page), vec![4]);
    }

    #[test]
    fn test_query_with_no_matches() {
        let catalog = catalog();
        let filter = ProductFilter {
            brands: vec!["INTI".to_string()],
            ..ProductFilter::default()
        };
        let page = catalog.query(&filter, Pagination::default(), SortOrder::Newest);
        assert_eq!(page.total, 0);
        assert_eq!(page.pages, 0);
        assert!(page.products.is_empty());
    }

    #[test]
    fn test_query_sorts_by_name() {
        let catalog = catalog();
        let filter = ProductFilter {
            categories: vec![ProductCategory::Trabajo],
            ..ProductFilter::default()
        };
        let page = catalog.query(&filter, Pagination::default(), SortOrder::NameAsc);
        let names: Vec<&str> = page.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Camisa de Trabajo sticker Antiolor",
                "Camisa Ombu Blanca",
                "Pantalón Cargo Verde con Bolsillo Porta Celular OMBU",
                "Pantalón Ombu Azulino",
                "Pantalón Ombu Blanco",
            ]
        );
    }

    #[test]
    fn test_newest_puts_recent_products_first() {
        let mut products = seed::products();
        products[3].created_at = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let catalog = Catalog::new(products).unwrap();

        let page = catalog.query(
            &ProductFilter::default(),
            Pagination::new(1, 3),
            SortOrder::Newest,
        );
        assert_eq!(ids(&page), vec![4, 1, 2]);
    }

    #[test]
    fn test_price_sort_with_priceless_product() {
        let mut products = seed::products();
        products[1].price = None;
        products[2].price = Some(Price::ars(30_000));
        let catalog = Catalog::new(products).unwrap();

        let page = catalog.query(
            &ProductFilter::default(),
            Pagination::new(1, 2),
            SortOrder::PriceLow,
        );
        assert_eq!(ids(&page), vec![2, 1]);

        let page = catalog.query(
            &ProductFilter::default(),
            Pagination::new(1, 1),
            SortOrder::PriceHigh,
        );
        assert_eq!(ids(&page), vec![3]);
    }

    #[test]
    fn test_by_category_ignores_color_and_price() {
        let catalog = catalog();
        let filter = ProductFilter {
            sizes: vec!["XXL".to_string()],
            colors: vec!["Fucsia".to_string()],
            max_price: Some(Price::ars(1)),
            ..ProductFilter::default()
        };
        let page = catalog.by_category(ProductCategory::Trabajo, &filter, Pagination::default());
        assert_eq!(ids(&page), vec![1, 2]);

        let empty = catalog.by_category(
            ProductCategory::Seguridad,
            &ProductFilter::default(),
            Pagination::default(),
        );
        assert_eq!(empty.total, 0);
    }

    #[test]
    fn test_featured() {
        let catalog = catalog();
        let featured: Vec<i32> = catalog
            .featured(4)
            .iter()
            .map(|p| p.id.as_i32())
            .collect();
        assert_eq!(featured, vec![1, 2, 3, 4]);
        assert_eq!(catalog.featured(10).len(), 5);
    }

    #[test]
    fn test_facets() {
        let catalog = catalog();
        assert_eq!(catalog.brands(), vec!["OMBU"]);
        assert_eq!(
            catalog.sizes(),
            vec!["38", "40", "42", "44", "46", "48", "50", "L", "M", "S", "XL", "XXL"]
        );
        assert_eq!(
            catalog.colors(),
            vec!["Blanco", "Azul", "Gris", "Verde", "Beige", "Azul Marino"]
        );
    }
}
