//! Session-held data of a visitor.

pub mod session;

pub use session::{CartCount, keys as session_keys, load_cart, save_cart};
