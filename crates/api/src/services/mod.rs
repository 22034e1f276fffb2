//! Business logic services.
//!
//! Services sit between the HTTP handlers and the document store. Handlers
//! pass in an [`AdminIdentity`](showcase_core::AdminIdentity) for every write,
//! so a write cannot be expressed without a prior successful authentication.

pub mod auth;
pub mod resources;
pub mod settings;
pub mod upload;

use thiserror::Error;

use crate::db::RepositoryError;
use crate::models::ValidationError;

pub use auth::{AuthError, CredentialGate};
pub use resources::{ProductService, ResourceService, ReviewService};
pub use settings::SettingsService;
pub use upload::{UploadError, UploadGateway};

/// Errors from the resource and settings services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The identifier in the path is not well-formed.
    #[error("Invalid {} ID", .label.to_lowercase())]
    InvalidIdentifier { label: &'static str },

    /// The identifier is well-formed but nothing matches it.
    #[error("{label} not found")]
    NotFound { label: &'static str },

    /// The input violates a field constraint.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store failed.
    #[error("store error: {0}")]
    Repository(#[from] RepositoryError),
}
