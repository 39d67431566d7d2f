//! Outbound contact channels.
//!
//! - `forms` - Lead forms posted to a Formspree-compatible backend
//! - `whatsapp` - Prefilled `wa.me` links for orders and inquiries

pub mod forms;
pub mod whatsapp;

pub use forms::{ContactSubmission, FieldErrors, FormsClient, FormsError, WholesaleSubmission};
pub use whatsapp::{WhatsAppError, WhatsAppLinks};
