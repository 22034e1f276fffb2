//! API data shapes.
//!
//! Each resource has three shapes: the stored/returned representation, the
//! create input, and the partial-update input. Inputs are deserialized
//! leniently and then checked with [`Validate`] before anything is written.

pub mod product;
pub mod review;
pub mod settings;
pub mod timestamp;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use showcase_core::{PriceError, RatingError, TextError};

use crate::db::Collection;

pub use product::{NewProduct, Product, ProductPatch};
pub use review::{NewReview, Review, ReviewPatch};
pub use settings::{
    CarouselSlide, CarouselUpdate, FeatureCard, FeatureCardsUpdate, SiteSettings,
    default_feature_cards,
};

/// An input violated a field constraint.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(transparent)]
    Text(#[from] TextError),

    #[error(transparent)]
    Price(#[from] PriceError),

    #[error(transparent)]
    Rating(#[from] RatingError),
}

/// Field-level checks run on request bodies before they reach the store.
pub trait Validate: Sized {
    /// Check every field the value carries.
    ///
    /// # Errors
    ///
    /// Returns the first constraint that fails.
    fn validate(self) -> Result<Self, ValidationError>;
}

/// A resource family stored one document per entity.
pub trait Resource: DeserializeOwned + Serialize + Send + Sync + 'static {
    /// Collection holding this resource.
    const COLLECTION: Collection;

    /// Human name used in error messages ("Product", "Review").
    const LABEL: &'static str;

    /// Create input.
    type Create: Validate + Serialize + Send + Sync;

    /// Partial-update input. Serializes to exactly the keys to overwrite.
    type Update: Validate + Serialize + Send + Sync;
}
