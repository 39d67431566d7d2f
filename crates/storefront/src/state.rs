//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::{Catalog, CatalogError};
use crate::config::StorefrontConfig;
use crate::content::ContentStore;
use crate::services::{FormsClient, FormsError, WhatsAppLinks};

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("forms client error: {0}")]
    Forms(#[from] FormsError),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Everything inside is read-only after startup;
/// per-visitor data (the cart) lives in the session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    content: ContentStore,
    forms: FormsClient,
    whatsapp: WhatsAppLinks,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the form client cannot be built.
    pub fn new(
        config: StorefrontConfig,
        catalog: Catalog,
        content: ContentStore,
    ) -> Result<Self, StateError> {
        let forms = FormsClient::new(config.form_endpoint.clone())?;
        let whatsapp = WhatsAppLinks::new(&config.whatsapp);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                content,
                forms,
                whatsapp,
            }),
        })
    }

    /// State with the seeded catalog, for the binary and tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed data or form client is invalid.
    pub fn seeded(config: StorefrontConfig, content: ContentStore) -> Result<Self, StateError> {
        Self::new(config, Catalog::seeded()?, content)
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    #[must_use]
    pub fn forms(&self) -> &FormsClient {
        &self.inner.forms
    }

    #[must_use]
    pub fn whatsapp(&self) -> &WhatsAppLinks {
        &self.inner.whatsapp
    }
}
