//! External media host.
//!
//! Image bytes are never stored by this service. They are forwarded to a
//! media host, which returns a public URL and an identifier that can later be
//! used to delete the image.

pub mod cloudinary;

pub use cloudinary::CloudinaryClient;

use async_trait::async_trait;
use axum::body::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by a media host.
#[derive(Debug, Error)]
pub enum MediaHostError {
    /// No host credentials were configured.
    #[error("media host is not configured")]
    NotConfigured,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The host answered with an error.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The host's answer could not be understood.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A stored image as reported back to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub url: String,
    pub public_id: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Upload/delete capability of an image host.
#[async_trait]
pub trait MediaHost: Send + Sync {
    /// Store an image and return where it can be fetched.
    async fn upload(&self, bytes: Bytes, content_type: &str) -> Result<UploadedImage, MediaHostError>;

    /// Delete a stored image. Returns the host's outcome (`"ok"` on success).
    async fn destroy(&self, public_id: &str) -> Result<String, MediaHostError>;
}

/// Host used when no media credentials are configured. Every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredMediaHost;

#[async_trait]
impl MediaHost for UnconfiguredMediaHost {
    async fn upload(&self, _bytes: Bytes, _content_type: &str) -> Result<UploadedImage, MediaHostError> {
        Err(MediaHostError::NotConfigured)
    }

    async fn destroy(&self, _public_id: &str) -> Result<String, MediaHostError> {
        Err(MediaHostError::NotConfigured)
    }
}
