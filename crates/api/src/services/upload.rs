//! Upload gateway.
//!
//! Checks an image against the type allow-list and the size ceiling, then
//! hands it to the media host. Nothing reaches the host unless both checks
//! pass.

use std::sync::Arc;

use axum::body::Bytes;
use thiserror::Error;
use tracing::{info, instrument, warn};

use showcase_core::AdminIdentity;

use crate::media::{MediaHost, MediaHostError, UploadedImage};

/// Accepted declared content types.
pub const ALLOWED_CONTENT_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/webp", "image/gif"];

/// Largest accepted image, in bytes (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Host outcome that means a delete succeeded.
const DESTROY_OK: &str = "ok";

/// Errors from the upload gateway.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Invalid file type. Allowed: JPEG, PNG, WebP, GIF")]
    UnsupportedMediaType,

    #[error("File too large. Maximum size is 5MB")]
    PayloadTooLarge,

    /// The host failed; its message is passed through.
    #[error("Failed to {operation} image: {source}")]
    UpstreamFailure {
        operation: &'static str,
        #[source]
        source: MediaHostError,
    },

    /// The host answered a delete with something other than `"ok"`.
    #[error("Failed to delete image")]
    OperationFailed { outcome: String },
}

/// Validates images and forwards them to the media host.
#[derive(Clone)]
pub struct UploadGateway {
    host: Arc<dyn MediaHost>,
}

impl std::fmt::Debug for UploadGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadGateway").finish_non_exhaustive()
    }
}

/// Reject content types outside the allow-list.
///
/// # Errors
///
/// Returns `UploadError::UnsupportedMediaType`.
pub fn check_content_type(content_type: &str) -> Result<(), UploadError> {
    if ALLOWED_CONTENT_TYPES.contains(&content_type) {
        Ok(())
    } else {
        Err(UploadError::UnsupportedMediaType)
    }
}

/// Reject payloads over [`MAX_UPLOAD_BYTES`].
///
/// # Errors
///
/// Returns `UploadError::PayloadTooLarge`.
pub const fn check_size(len: usize) -> Result<(), UploadError> {
    if len > MAX_UPLOAD_BYTES {
        Err(UploadError::PayloadTooLarge)
    } else {
        Ok(())
    }
}

impl UploadGateway {
    /// Create a gateway in front of `host`.
    #[must_use]
    pub fn new(host: Arc<dyn MediaHost>) -> Self {
        Self { host }
    }

    /// Validate and forward an image.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedMediaType` or `PayloadTooLarge` without calling
    /// the host, or `UpstreamFailure` if the host fails.
    #[instrument(skip(self, bytes, admin), fields(admin = %admin, size = bytes.len()))]
    pub async fn upload(
        &self,
        bytes: Bytes,
        content_type: &str,
        admin: &AdminIdentity,
    ) -> Result<UploadedImage, UploadError> {
        check_content_type(content_type)?;
        check_size(bytes.len())?;

        let image = self
            .host
            .upload(bytes, content_type)
            .await
            .map_err(|source| {
                warn!(error = %source, "Image upload failed");
                UploadError::UpstreamFailure {
                    operation: "upload",
                    source,
                }
            })?;

        info!(public_id = %image.public_id, "Image uploaded");
        Ok(image)
    }

    /// Delete an image from the host.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamFailure` if the host fails and `OperationFailed` if
    /// it reports an outcome other than `"ok"`.
    #[instrument(skip(self, admin), fields(admin = %admin))]
    pub async fn delete(&self, public_id: &str, admin: &AdminIdentity) -> Result<(), UploadError> {
        let outcome = self.host.destroy(public_id).await.map_err(|source| {
            warn!(error = %source, "Image delete failed");
            UploadError::UpstreamFailure {
                operation: "delete",
                source,
            }
        })?;

        if outcome != DESTROY_OK {
            warn!(%outcome, "Media host refused delete");
            return Err(UploadError::OperationFailed { outcome });
        }

        info!("Image deleted");
        Ok(())
    }
}
