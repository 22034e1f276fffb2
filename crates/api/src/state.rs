//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::db::DocumentStore;
use crate::media::MediaHost;
use crate::services::{CredentialGate, ProductService, ReviewService, SettingsService, UploadGateway};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The store handle and media
/// host are injected once at start-up and live for the whole process.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    store: Arc<dyn DocumentStore>,
    gate: CredentialGate,
    products: ProductService,
    reviews: ReviewService,
    settings: SettingsService,
    uploads: UploadGateway,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - API configuration
    /// * `store` - Document store shared by all services
    /// * `media` - Image host behind the upload gateway
    #[must_use]
    pub fn new(config: ApiConfig, store: Arc<dyn DocumentStore>, media: Arc<dyn MediaHost>) -> Self {
        let gate = CredentialGate::new(&config.admin);

        Self {
            inner: Arc::new(AppStateInner {
                gate,
                products: ProductService::new(store.clone()),
                reviews: ReviewService::new(store.clone()),
                settings: SettingsService::new(store.clone()),
                uploads: UploadGateway::new(media),
                store,
                config,
            }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the document store.
    #[must_use]
    pub fn store(&self) -> &dyn DocumentStore {
        self.inner.store.as_ref()
    }

    /// Get a reference to the credential gate.
    #[must_use]
    pub fn gate(&self) -> &CredentialGate {
        &self.inner.gate
    }

    /// Get a reference to the product service.
    #[must_use]
    pub fn products(&self) -> &ProductService {
        &self.inner.products
    }

    /// Get a reference to the review service.
    #[must_use]
    pub fn reviews(&self) -> &ReviewService {
        &self.inner.reviews
    }

    /// Get a reference to the settings service.
    #[must_use]
    pub fn settings(&self) -> &SettingsService {
        &self.inner.settings
    }

    /// Get a reference to the upload gateway.
    #[must_use]
    pub fn uploads(&self) -> &UploadGateway {
        &self.inner.uploads
    }
}
