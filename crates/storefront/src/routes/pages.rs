//! Static content page route handlers.
//!
//! The about page is markdown from the content store; store locations are
//! fixed data shared with the home page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::models::CartCount;
use crate::state::AppState;

// =============================================================================
// Store Locations
// =============================================================================

/// Opening hours for a range of days.
#[derive(Debug, Clone, Copy)]
pub struct OpeningHours {
    pub days: &'static str,
    pub hours: &'static str,
}

/// A physical store.
#[derive(Debug, Clone, Copy)]
pub struct Branch {
    pub name: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    /// Google Maps search for the "how to get there" button.
    pub maps_url: &'static str,
    pub hours: &'static [OpeningHours],
}

const STANDARD_HOURS: &[OpeningHours] = &[
    OpeningHours {
        days: "Lunes a Viernes",
        hours: "9:00 - 18:00",
    },
    OpeningHours {
        days: "Sábados",
        hours: "9:00 - 13:00",
    },
    OpeningHours {
        days: "Domingos",
        hours: "Cerrado",
    },
];

/// Both stores, Córdoba first.
pub const BRANCHES: [Branch; 2] = [
    Branch {
        name: "SUCURSAL CORDOBA",
        address: "Corrientes 473, Centro, X5000ANI Córdoba",
        phone: "351-4245041",
        maps_url: "https://www.google.com/maps/search/?api=1&query=Corrientes+473+X5000ANI+C%C3%B3rdoba",
        hours: STANDARD_HOURS,
    },
    Branch {
        name: "SUCURSAL RIO CUARTO",
        address: "Corrientes 473, Centro, X5000ANI",
        phone: "351-4245041",
        maps_url: "https://www.google.com/maps/search/?api=1&query=Corrientes+473+R%C3%ADo+Cuarto",
        hours: STANDARD_HOURS,
    },
];

// =============================================================================
// Templates
// =============================================================================

/// Content page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/content.html")]
pub struct ContentPageTemplate {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub content_html: String,
    pub cart_count: u32,
}

/// Store locations template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/locations.html")]
pub struct LocationsTemplate {
    pub branches: &'static [Branch],
    pub cart_count: u32,
}

/// Serve a content page by slug.
fn serve_content_page(
    state: &AppState,
    slug: &str,
    cart_count: u32,
) -> Result<ContentPageTemplate> {
    let page = state
        .content()
        .get_page(slug)
        .ok_or_else(|| AppError::NotFound(format!("page {slug}")))?;

    Ok(ContentPageTemplate {
        title: page.meta.title.clone(),
        description: page.meta.description.clone().unwrap_or_default(),
        image: page.meta.image.clone(),
        content_html: page.content_html.clone(),
        cart_count,
    })
}

/// Display the about page.
///
/// # Errors
///
/// Returns 404 if the page is missing from the content directory.
#[instrument(skip(state))]
pub async fn about(
    State(state): State<AppState>,
    CartCount(cart_count): CartCount,
) -> Result<impl IntoResponse> {
    serve_content_page(&state, "quienes-somos", cart_count)
}

/// Display store locations and opening hours.
#[instrument]
pub async fn locations(CartCount(cart_count): CartCount) -> impl IntoResponse {
    LocationsTemplate {
        branches: &BRANCHES,
        cart_count,
    }
}
