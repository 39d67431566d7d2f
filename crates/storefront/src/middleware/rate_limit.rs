//! Rate limiting middleware using governor and `tower_governor`.
//!
//! Two limiters, both keyed by client IP:
//! - `form_rate_limiter`: lead form submissions (~10/min)
//! - `cart_rate_limiter`: cart mutations (~60/min with bursts)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode, header::RETRY_AFTER};
use axum::response::{IntoResponse, Response};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{GovernorError, GovernorLayer, governor::GovernorConfigBuilder};

use crate::error::AppError;

// =============================================================================
// Client IP Key Extractor
// =============================================================================

/// Proxy headers checked for the real client IP, most trusted first.
const CLIENT_IP_HEADERS: [&str; 3] = ["cf-connecting-ip", "x-real-ip", "x-forwarded-for"];

/// Key extractor that prefers proxy headers, then the socket peer address.
///
/// Requests with neither (in-process tests) share the `0.0.0.0` bucket.
#[derive(Clone, Copy)]
pub struct ClientIpKeyExtractor;

impl ClientIpKeyExtractor {
    fn from_headers<T>(req: &Request<T>) -> Option<IpAddr> {
        CLIENT_IP_HEADERS.iter().find_map(|name| {
            req.headers()
                .get(*name)
                .and_then(|v| v.to_str().ok())
                // X-Forwarded-For is a chain; the first entry is the client
                .and_then(|s| s.split(',').next())
                .and_then(|s| s.trim().parse::<IpAddr>().ok())
        })
    }
}

impl tower_governor::key_extractor::KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        let ip = Self::from_headers(req)
            .or_else(|| {
                req.extensions()
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip())
            })
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        Ok(ip)
    }
}

// =============================================================================
// Rate Limiter Configuration
// =============================================================================

/// Rate limiter layer type for Axum.
pub type RateLimiterLayer =
    GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Build a limiter that replenishes one token every `seconds`.
///
/// # Panics
///
/// Panics if `seconds` or `burst` is zero; callers pass constants.
fn limiter(seconds: u64, burst: u32) -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(ClientIpKeyExtractor)
        .per_second(seconds)
        .burst_size(burst)
        .finish()
        .expect("rate limiter periods and bursts are non-zero constants");
    GovernorLayer::new(Arc::new(config))
}

/// Lead forms: one token every 6 seconds, burst of 5.
#[must_use]
pub fn form_rate_limiter() -> RateLimiterLayer {
    limiter(6, 5)
}

/// Cart mutations: one token per second, burst of 30.
#[must_use]
pub fn cart_rate_limiter() -> RateLimiterLayer {
    limiter(1, 30)
}

/// Render a refused request as the regular error page.
///
/// The limiter answers with a bare text body; this keeps its `Retry-After`
/// header and swaps in the 429 page.
pub async fn rate_limited_page(response: Response) -> Response {
    if response.status() != StatusCode::TOO_MANY_REQUESTS {
        return response;
    }

    tracing::warn!("Rate limit exceeded");
    let retry_after = response.headers().get(RETRY_AFTER).cloned();
    let mut page = AppError::RateLimited.into_response();
    if let Some(value) = retry_after {
        page.headers_mut().insert(RETRY_AFTER, value);
    }
    page
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tower_governor::key_extractor::KeyExtractor;

    use super::*;

    fn request(headers: &[(&str, &str)]) -> Request<()> {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap()
    }

    #[test]
    fn test_prefers_cloudflare_header() {
        let req = request(&[
            ("x-forwarded-for", "10.0.0.1"),
            ("cf-connecting-ip", "200.45.1.9"),
        ]);
        let ip = ClientIpKeyExtractor.extract(&req).unwrap();
        assert_eq!(ip, "200.45.1.9".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_forwarded_for_uses_first_hop() {
        let req = request(&[("x-forwarded-for", "181.1.2.3, 10.0.0.1")]);
        let ip = ClientIpKeyExtractor.extract(&req).unwrap();
        assert_eq!(ip, "181.1.2.3".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_falls_back_to_peer_then_unspecified() {
        let mut req = request(&[]);
        assert_eq!(
            ClientIpKeyExtractor.extract(&req).unwrap(),
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        );

        let peer: SocketAddr = "190.2.3.4:5555".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(peer));
        assert_eq!(ClientIpKeyExtractor.extract(&req).unwrap(), peer.ip());
    }

    #[tokio::test]
    async fn test_rate_limited_page_keeps_retry_after() {
        let refused = (
            StatusCode::TOO_MANY_REQUESTS,
            [(RETRY_AFTER, "4")],
            "Too Many Requests! Wait for 4s",
        )
            .into_response();
        let page = rate_limited_page(refused).await;
        assert_eq!(page.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(page.headers()[RETRY_AFTER], "4");

        let ok = rate_limited_page("ok".into_response()).await;
        assert_eq!(ok.status(), StatusCode::OK);
    }
}
