//! Session-related types.
//!
//! The cart is the only state kept per visitor. It lives in the session
//! store and disappears with it.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use jacobo_core::Cart;
use tower_sessions::Session;

/// Session keys.
pub mod keys {
    /// Key for the visitor's cart.
    pub const CART: &str = "cart";
}

/// Load the visitor's cart, empty if none was stored yet.
///
/// # Errors
///
/// Returns an error if the session store fails or the stored value no
/// longer deserializes.
pub async fn load_cart(session: &Session) -> Result<Cart, tower_sessions::session::Error> {
    Ok(session.get::<Cart>(keys::CART).await?.unwrap_or_default())
}

/// Store the visitor's cart.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART, cart).await
}

/// Item count of the visitor's cart, for the header badge.
///
/// Pages render the badge themselves so it shows without JavaScript. A
/// missing or unreadable session counts as an empty cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartCount(pub u32);

impl<S: Send + Sync> FromRequestParts<S> for CartCount {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(session) = Session::from_request_parts(parts, state).await else {
            return Ok(Self::default());
        };
        match load_cart(&session).await {
            Ok(cart) => Ok(Self(cart.item_count())),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read cart for badge");
                Ok(Self::default())
            }
        }
    }
}
