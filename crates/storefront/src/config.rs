//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: `http://localhost:3000`)
//! - `CONTACT_FORM_ENDPOINT` - Formspree-compatible endpoint for lead forms
//! - `WHATSAPP_SALES_NUMBER` - Number for orders and product inquiries
//! - `WHATSAPP_CONTACT_NUMBER` - Number for general inquiries
//! - `CATALOG_PAGE_SIZE` - Products per listing page (default: 12)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0 to 1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use url::Url;

use crate::catalog::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

const DEFAULT_SALES_NUMBER: &str = "5493513804567";
const DEFAULT_CONTACT_NUMBER: &str = "543514245041";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront, without trailing slash
    pub base_url: String,
    /// Lead form backend; `None` disables form submissions
    pub form_endpoint: Option<Url>,
    pub whatsapp: WhatsAppNumbers,
    /// Default products per listing page
    pub page_size: usize,
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

/// WhatsApp numbers, digits only, international format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppNumbers {
    /// Orders, product inquiries and wholesale leads.
    pub sales: String,
    /// General questions from the contact page.
    pub contact: String,
}

impl Default for WhatsAppNumbers {
    fn default() -> Self {
        Self {
            sales: DEFAULT_SALES_NUMBER.to_string(),
            contact: DEFAULT_CONTACT_NUMBER.to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let host = env
            .or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| invalid("STOREFRONT_HOST", e))?;
        let port = env
            .or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| invalid("STOREFRONT_PORT", e))?;
        let base_url = env.or_default("STOREFRONT_BASE_URL", "http://localhost:3000");
        Url::parse(&base_url).map_err(|e| invalid("STOREFRONT_BASE_URL", e))?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let form_endpoint = env
            .optional("CONTACT_FORM_ENDPOINT")
            .map(|raw| parse_form_endpoint(&raw))
            .transpose()?;

        let whatsapp = WhatsAppNumbers {
            sales: parse_whatsapp_number(
                "WHATSAPP_SALES_NUMBER",
                &env.or_default("WHATSAPP_SALES_NUMBER", DEFAULT_SALES_NUMBER),
            )?,
            contact: parse_whatsapp_number(
                "WHATSAPP_CONTACT_NUMBER",
                &env.or_default("WHATSAPP_CONTACT_NUMBER", DEFAULT_CONTACT_NUMBER),
            )?,
        };

        let page_size = env
            .or_default("CATALOG_PAGE_SIZE", &DEFAULT_PAGE_SIZE.to_string())
            .parse::<usize>()
            .map_err(|e| invalid("CATALOG_PAGE_SIZE", e))?;
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(invalid(
                "CATALOG_PAGE_SIZE",
                format!("must be between 1 and {MAX_PAGE_SIZE}"),
            ));
        }

        Ok(Self {
            host,
            port,
            base_url,
            form_endpoint,
            whatsapp,
            page_size,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_rate(&env, "SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_rate(&env, "SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies should carry the `Secure` flag.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl Default for StorefrontConfig {
    /// Local development defaults, used by tests.
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            form_endpoint: None,
            whatsapp: WhatsAppNumbers::default(),
            page_size: DEFAULT_PAGE_SIZE,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<'a, F: Fn(&str) -> Option<String>>(&'a F);

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

fn invalid(key: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), reason.to_string())
}

fn parse_form_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| invalid("CONTACT_FORM_ENDPOINT", e))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("CONTACT_FORM_ENDPOINT", "must be an http(s) URL"));
    }
    Ok(url)
}

/// Keep digits only; `+54 9 351 380-4567` becomes `5493513804567`.
fn parse_whatsapp_number(key: &str, raw: &str) -> Result<String, ConfigError> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < 8 {
        return Err(invalid(key, "must contain at least 8 digits"));
    }
    Ok(digits)
}

fn parse_rate<F: Fn(&str) -> Option<String>>(
    env: &Env<'_, F>,
    key: &str,
    default: &str,
) -> Result<f32, ConfigError> {
    let rate = env
        .or_default(key, default)
        .parse::<f32>()
        .map_err(|e| invalid(key, e))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(invalid(key, "must be between 0.0 and 1.0"));
    }
    Ok(rate)
}
