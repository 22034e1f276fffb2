//! Customer review shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use showcase_core::{CustomerName, Patch, Rating, ResourceId, ReviewText};

use super::{Resource, Validate, ValidationError, timestamp};
use crate::db::Collection;

/// A review as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: ResourceId,
    pub customer_name: String,
    #[serde(default)]
    pub customer_image: Option<String>,
    pub rating: Rating,
    pub review_text: String,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Resource for Review {
    const COLLECTION: Collection = Collection::Reviews;
    const LABEL: &'static str = "Review";

    type Create = NewReview;
    type Update = ReviewPatch;
}

/// Body of `POST /reviews`.
///
/// `rating` is taken as a plain integer so an out-of-range value is reported
/// as a validation failure with the offending number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReview {
    pub customer_name: String,
    #[serde(default)]
    pub customer_image: Option<String>,
    pub rating: i64,
    pub review_text: String,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
}

impl Validate for NewReview {
    fn validate(self) -> Result<Self, ValidationError> {
        Rating::new(self.rating)?;
        CustomerName::parse(&self.customer_name)?;
        ReviewText::parse(&self.review_text)?;
        Ok(self)
    }
}

/// Body of `PUT /reviews/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub customer_image: Patch<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub product_name: Patch<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

impl Validate for ReviewPatch {
    fn validate(self) -> Result<Self, ValidationError> {
        if let Some(rating) = self.rating {
            Rating::new(rating)?;
        }
        if let Some(name) = &self.customer_name {
            CustomerName::parse(name)?;
        }
        if let Some(text) = &self.review_text {
            ReviewText::parse(text)?;
        }
        Ok(self)
    }
}
