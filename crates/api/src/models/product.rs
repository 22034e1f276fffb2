//! Product shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use showcase_core::{Patch, Price, ProductName, ResourceId};

use super::{Resource, Validate, ValidationError, timestamp};
use crate::db::Collection;

/// A product as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub materials: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_new: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Resource for Product {
    const COLLECTION: Collection = Collection::Products;
    const LABEL: &'static str = "Product";

    type Create = NewProduct;
    type Update = ProductPatch;
}

/// Body of `POST /products`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub materials: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_new: bool,
}

impl Validate for NewProduct {
    fn validate(self) -> Result<Self, ValidationError> {
        ProductName::parse(&self.name)?;
        let price = self.price.map(Price::validate).transpose()?;
        Ok(Self { price, ..self })
    }
}

/// Body of `PUT /products/{id}`.
///
/// Absent keys are kept. `null` clears the optional text fields and the
/// price; `null` on `name`, `images` or the flags is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub description: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub price: Patch<Price>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub category: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub dimensions: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub materials: Patch<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
}

impl Validate for ProductPatch {
    fn validate(self) -> Result<Self, ValidationError> {
        if let Some(name) = &self.name {
            ProductName::parse(name)?;
        }
        let price = self.price.try_map(Price::validate)?;
        Ok(Self { price, ..self })
    }
}
