//! Jacobo Core - Domain types for the storefront.
//!
//! This crate provides the types shared by the storefront binary and its
//! integration tests:
//! - products, categories and prices of the catalog
//! - the filter and sort order used by listing pages
//! - the session cart and its line-merging rules
//! - validated contact details (email, phone)
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP, no
//! session handling. The static product data and the query engine live in
//! the storefront crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers and domain models

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
