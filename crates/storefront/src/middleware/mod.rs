//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (CSP, frame and referrer policies)
//! 5. Session layer (tower-sessions with in-memory store, holds the cart)
//! 6. Rate limit page (429 responses rendered as HTML)
//! 7. Rate limiting (governor, per route group)

pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use rate_limit::{cart_rate_limiter, form_rate_limiter, rate_limited_page};
pub use request_id::{request_id_middleware, request_span};
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
