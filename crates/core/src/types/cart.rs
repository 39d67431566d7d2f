//! Shopping cart.
//!
//! The cart is a keyed collection of lines. A line's identity is the tuple
//! `(product id, size, color)`: adding an item whose key already exists bumps
//! that line's quantity instead of appending a duplicate.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Errors raised by cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("quantity must be at least 1")]
    InvalidQuantity,
    #[error("cart line not found")]
    LineNotFound,
}

/// Identity of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl LineKey {
    /// Build a key, treating blank size/color values as absent.
    #[must_use]
    pub fn new(product_id: ProductId, size: Option<String>, color: Option<String>) -> Self {
        Self {
            product_id,
            size: non_blank(size),
            color: non_blank(color),
        }
    }
}

/// A product snapshot with a chosen variant and quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: u32,
}

impl CartItem {
    /// The key this line merges on.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id,
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }

    fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.size == key.size && self.color == key.color
    }

    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// The cart stored in the visitor's session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item, merging with an existing line of the same key.
    ///
    /// Blank size/color values are normalised to `None` first.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if `item.quantity` is zero.
    pub fn add(&mut self, mut item: CartItem) -> Result<(), CartError> {
        if item.quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        item.size = non_blank(item.size);
        item.color = non_blank(item.color);

        let key = item.key();
        if let Some(line) = self.items.iter_mut().find(|line| line.matches(&key)) {
            line.quantity = line.quantity.saturating_add(item.quantity);
        } else {
            self.items.push(item);
        }
        Ok(())
    }

    /// Set the quantity of a line. Zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line has this key.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove(key);
        }
        let line = self
            .items
            .iter_mut()
            .find(|line| line.matches(key))
            .ok_or(CartError::LineNotFound)?;
        line.quantity = quantity;
        Ok(())
    }

    /// Remove a single line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line has this key.
    pub fn remove(&mut self, key: &LineKey) -> Result<(), CartError> {
        let before = self.items.len();
        self.items.retain(|line| !line.matches(key));
        if self.items.len() == before {
            return Err(CartError::LineNotFound);
        }
        Ok(())
    }

    /// Remove every line of a product, whatever its variant.
    ///
    /// Returns the number of lines removed.
    pub fn remove_product(&mut self, product_id: ProductId) -> usize {
        let before = self.items.len();
        self.items.retain(|line| line.product_id != product_id);
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Sum of every line total.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items
            .iter()
            .map(CartItem::line_total)
            .fold(Price::zero(), |acc, line| acc + line)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: i32, size: Option<&str>, color: Option<&str>, quantity: u32) -> CartItem {
        CartItem {
            product_id: ProductId::new(id),
            name: format!("Producto {id}"),
            price: Price::ars(15000),
            image: String::new(),
            size: size.map(str::to_string),
            color: color.map(str::to_string),
            quantity,
        }
    }

    #[test]
    fn test_add_merges_same_variant() {
        let mut cart = Cart::new();
        cart.add(item(1, Some("M"), Some("Azul"), 1)).unwrap();
        cart.add(item(1, Some("M"), Some("Azul"), 2)).unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn test_add_keeps_distinct_variants_apart() {
        let mut cart = Cart::new();
        cart.add(item(1, Some("M"), Some("Azul"), 1)).unwrap();
        cart.add(item(1, Some("L"), Some("Azul"), 1)).unwrap();
        cart.add(item(1, Some("M"), None, 1)).unwrap();
        cart.add(item(2, Some("M"), Some("Azul"), 1)).unwrap();

        assert_eq!(cart.items().len(), 4);
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn test_blank_variant_equals_none() {
        let mut cart = Cart::new();
        cart.add(item(1, Some(""), Some("  "), 1)).unwrap();
        cart.add(item(1, None, None, 1)).unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert!(cart.items()[0].size.is_none());
    }

    #[test]
    fn test_add_rejects_zero_quantity() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.add(item(1, None, None, 0)),
            Err(CartError::InvalidQuantity)
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_saturates() {
        let mut cart = Cart::new();
        cart.add(item(1, None, None, u32::MAX)).unwrap();
        cart.add(item(1, None, None, 5)).unwrap();
        assert_eq!(cart.items()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add(item(1, Some("M"), None, 1)).unwrap();
        let key = LineKey::new(ProductId::new(1), Some("M".to_string()), None);

        cart.update_quantity(&key, 5).unwrap();
        assert_eq!(cart.item_count(), 5);

        cart.update_quantity(&key, 0).unwrap();
        assert!(cart.is_empty());

        assert_eq!(
            cart.update_quantity(&key, 2),
            Err(CartError::LineNotFound)
        );
    }

    #[test]
    fn test_remove_line_and_product() {
        let mut cart = Cart::new();
        cart.add(item(1, Some("M"), None, 1)).unwrap();
        cart.add(item(1, Some("L"), None, 1)).unwrap();
        cart.add(item(2, None, None, 1)).unwrap();

        let key = LineKey::new(ProductId::new(1), Some("L".to_string()), None);
        cart.remove(&key).unwrap();
        assert_eq!(cart.remove(&key), Err(CartError::LineNotFound));
        assert_eq!(cart.items().len(), 2);

        cart.add(item(1, Some("XL"), None, 1)).unwrap();
        assert_eq!(cart.remove_product(ProductId::new(1)), 2);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].product_id, ProductId::new(2));
    }

    #[test]
    fn test_subtotal_and_clear() {
        let mut cart = Cart::new();
        assert_eq!(cart.subtotal(), Price::zero());

        cart.add(item(1, None, None, 2)).unwrap();
        cart.add(item(2, None, None, 1)).unwrap();
        assert_eq!(cart.subtotal(), Price::ars(45000));

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_serde_round_trip_through_session_value() {
        let mut cart = Cart::new();
        cart.add(item(3, Some("42"), Some("Negro"), 2)).unwrap();

        let value = serde_json::to_value(&cart).unwrap();
        let restored: Cart = serde_json::from_value(value).unwrap();
        assert_eq!(restored, cart);
    }
}
