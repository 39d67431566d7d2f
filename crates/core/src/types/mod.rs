//! Core types for the Jacobo storefront.
//!
//! This module provides type-safe wrappers for the catalog and cart domain.

pub mod cart;
pub mod category;
pub mod email;
pub mod filter;
pub mod id;
pub mod phone;
pub mod price;
pub mod product;

pub use cart::{Cart, CartError, CartItem, LineKey};
pub use category::{ProductCategory, UnknownCategory};
pub use email::{Email, EmailError};
pub use filter::{ProductFilter, SortOrder, UnknownSortOrder};
pub use id::*;
pub use phone::{Phone, PhoneError};
pub use price::{CurrencyCode, Price};
pub use product::Product;
