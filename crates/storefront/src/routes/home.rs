//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use jacobo_core::ProductCategory;
use tracing::instrument;

use crate::filters;
use crate::models::CartCount;
use crate::routes::pages::{BRANCHES, Branch};
use crate::routes::products::ProductCardView;
use crate::state::AppState;

/// Featured products on the home page.
const FEATURED_LIMIT: usize = 4;

/// A brand we carry, shown as a logo strip.
#[derive(Debug, Clone, Copy)]
pub struct Brand {
    pub name: &'static str,
    pub logo: &'static str,
}

/// Brands in display order.
pub const BRANDS: [Brand; 3] = [
    Brand {
        name: "OMBU",
        logo: "/static/img/marcas/ombu.jpg",
    },
    Brand {
        name: "SANTISTA",
        logo: "/static/img/marcas/santista.jpg",
    },
    Brand {
        name: "INTI",
        logo: "/static/img/marcas/inti.jpg",
    },
];

/// Category tile linking to its listing.
#[derive(Clone)]
pub struct CategoryCard {
    pub name: &'static str,
    pub url: String,
    pub image: String,
}

impl From<ProductCategory> for CategoryCard {
    fn from(category: ProductCategory) -> Self {
        Self {
            name: category.display_name(),
            url: format!("/productos/{}", category.slug()),
            image: format!("/static/img/categorias/{}.jpg", category.slug()),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub categories: Vec<CategoryCard>,
    pub featured: Vec<ProductCardView>,
    pub brands: &'static [Brand],
    pub branches: &'static [Branch],
    pub cart_count: u32,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(
    State(state): State<AppState>,
    CartCount(cart_count): CartCount,
) -> impl IntoResponse {
    HomeTemplate {
        categories: ProductCategory::ALL
            .into_iter()
            .map(CategoryCard::from)
            .collect(),
        featured: state
            .catalog()
            .featured(FEATURED_LIMIT)
            .into_iter()
            .map(ProductCardView::from)
            .collect(),
        brands: &BRANDS,
        branches: &BRANCHES,
        cart_count,
    }
}
