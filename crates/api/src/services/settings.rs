//! Singleton settings: site settings, carousel and feature cards.
//!
//! Each kind is one document keyed by its discriminator. Reads fall back to a
//! default when nothing was stored; writes replace the whole document.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, instrument};

use showcase_core::{AdminIdentity, SettingsKind};

use super::ServiceError;
use crate::db::{DocumentStore, RepositoryError, to_document};
use crate::models::{
    CarouselSlide, CarouselUpdate, FeatureCard, FeatureCardsUpdate, SiteSettings, Validate,
    default_feature_cards,
};

/// Document key holding the discriminator.
const TYPE_FIELD: &str = "type";

/// Read/replace access to the settings singletons.
pub struct SettingsService {
    store: Arc<dyn DocumentStore>,
}

impl std::fmt::Debug for SettingsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsService").finish_non_exhaustive()
    }
}

impl SettingsService {
    /// Create a service over a shared store handle.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Site settings, with every field empty when none are stored.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    #[instrument(skip(self))]
    pub async fn site_settings(&self) -> Result<SiteSettings, ServiceError> {
        Ok(self
            .read(SettingsKind::SiteSettings)
            .await?
            .unwrap_or_default())
    }

    /// Replace the site settings.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    #[instrument(skip(self, settings, admin), fields(admin = %admin))]
    pub async fn put_site_settings(
        &self,
        settings: SiteSettings,
        admin: &AdminIdentity,
    ) -> Result<SiteSettings, ServiceError> {
        self.write(SettingsKind::SiteSettings, &settings).await?;
        Ok(settings)
    }

    /// Carousel slides, empty when none are stored.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    #[instrument(skip(self))]
    pub async fn carousel(&self) -> Result<Vec<CarouselSlide>, ServiceError> {
        Ok(self
            .read::<CarouselUpdate>(SettingsKind::Carousel)
            .await?
            .map(|carousel| carousel.slides)
            .unwrap_or_default())
    }

    /// Replace the carousel slides.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for a slide without an image.
    #[instrument(skip(self, update, admin), fields(admin = %admin, slides = update.slides.len()))]
    pub async fn put_carousel(
        &self,
        update: CarouselUpdate,
        admin: &AdminIdentity,
    ) -> Result<Vec<CarouselSlide>, ServiceError> {
        let update = update.validate()?;
        self.write(SettingsKind::Carousel, &update).await?;
        Ok(update.slides)
    }

    /// Feature cards, or the built-in six when none are stored.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    #[instrument(skip(self))]
    pub async fn feature_cards(&self) -> Result<Vec<FeatureCard>, ServiceError> {
        Ok(self
            .read::<FeatureCardsUpdate>(SettingsKind::Features)
            .await?
            .map_or_else(default_feature_cards, |features| features.cards))
    }

    /// Replace the feature cards.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for a card with a blank title or
    /// description.
    #[instrument(skip(self, update, admin), fields(admin = %admin, cards = update.cards.len()))]
    pub async fn put_feature_cards(
        &self,
        update: FeatureCardsUpdate,
        admin: &AdminIdentity,
    ) -> Result<Vec<FeatureCard>, ServiceError> {
        let update = update.validate()?;
        self.write(SettingsKind::Features, &update).await?;
        Ok(update.cards)
    }

    // =========================================================================
    // Helper Functions
    // =========================================================================

    async fn read<T: DeserializeOwned>(&self, kind: SettingsKind) -> Result<Option<T>, ServiceError> {
        let Some(mut document) = self.store.find_singleton(kind).await? else {
            return Ok(None);
        };
        document.remove(TYPE_FIELD);

        serde_json::from_value(Value::Object(document))
            .map(Some)
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("{kind} settings are malformed: {e}"))
                    .into()
            })
    }

    async fn write<T: Serialize + Sync>(&self, kind: SettingsKind, value: &T) -> Result<(), ServiceError> {
        let mut document = to_document(value)?;
        document.insert(TYPE_FIELD.to_owned(), Value::String(kind.as_str().to_owned()));

        self.store.upsert_singleton(kind, document).await?;
        info!(%kind, "Settings replaced");

        Ok(())
    }
}
