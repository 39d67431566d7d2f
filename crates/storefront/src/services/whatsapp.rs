//! WhatsApp click-to-chat links.
//!
//! Every "contact us" action on the site ends in a `https://wa.me/{number}`
//! link with a prefilled message. Numbers are kept as digits only.

use std::fmt::Write as _;

use jacobo_core::{Cart, Product};
use thiserror::Error;

use crate::config::WhatsAppNumbers;

const BASE_URL: &str = "https://wa.me";

const GENERAL_INQUIRY: &str = "Hola, tengo una consulta sobre sus productos.";
const WHOLESALE_INQUIRY: &str = "Hola, me gustaría obtener información sobre compras mayoristas.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WhatsAppError {
    #[error("cannot send an order for an empty cart")]
    EmptyCart,
}

/// Builds prefilled WhatsApp links for the configured numbers.
#[derive(Debug, Clone)]
pub struct WhatsAppLinks {
    sales: String,
    contact: String,
}

impl WhatsAppLinks {
    #[must_use]
    pub fn new(numbers: &WhatsAppNumbers) -> Self {
        Self {
            sales: digits_only(&numbers.sales),
            contact: digits_only(&numbers.contact),
        }
    }

    /// Inquiry about a single product, with the shopper's chosen variant.
    #[must_use]
    pub fn product_inquiry(
        &self,
        product: &Product,
        size: Option<&str>,
        color: Option<&str>,
    ) -> String {
        let mut message = format!("Hola, estoy interesado en el producto: {}", product.name);
        if let Some(price) = product.price {
            let _ = write!(message, "\nPrecio: {price}");
        }
        if let Some(size) = non_blank(size) {
            let _ = write!(message, "\nTalle seleccionado: {size}");
        }
        if let Some(color) = non_blank(color) {
            let _ = write!(message, "\nColor seleccionado: {color}");
        }
        let _ = write!(message, "\nReferencia: {}", product.id);

        link(&self.sales, &message)
    }

    /// The whole cart as an order, one numbered line per cart line.
    ///
    /// # Errors
    ///
    /// Returns [`WhatsAppError::EmptyCart`] if there is nothing to order.
    pub fn cart_order(&self, cart: &Cart) -> Result<String, WhatsAppError> {
        if cart.is_empty() {
            return Err(WhatsAppError::EmptyCart);
        }

        let mut message = String::from("Hola, quiero hacer el siguiente pedido:");
        for (i, item) in cart.items().iter().enumerate() {
            let _ = write!(message, "\n{}. {}", i + 1, item.name);
            if let Some(size) = &item.size {
                let _ = write!(message, " - Talle: {size}");
            }
            if let Some(color) = &item.color {
                let _ = write!(message, " - Color: {color}");
            }
            let _ = write!(message, " - Cantidad: {}", item.quantity);
        }

        Ok(link(&self.sales, &message))
    }

    /// General question from the contact page.
    #[must_use]
    pub fn general_inquiry(&self) -> String {
        link(&self.contact, GENERAL_INQUIRY)
    }

    /// First contact from a prospective wholesale customer.
    #[must_use]
    pub fn wholesale_inquiry(&self) -> String {
        link(&self.sales, WHOLESALE_INQUIRY)
    }
}

fn link(number: &str, message: &str) -> String {
    format!("{BASE_URL}/{number}?text={}", urlencoding::encode(message))
}

fn digits_only(number: &str) -> String {
    number.chars().filter(char::is_ascii_digit).collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
