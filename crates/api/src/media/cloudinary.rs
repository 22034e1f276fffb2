//! Cloudinary upload API client.
//!
//! # API Reference
//!
//! - Upload: `POST https://api.cloudinary.com/v1_1/{cloud}/image/upload`
//! - Delete: `POST https://api.cloudinary.com/v1_1/{cloud}/image/destroy`
//! - Authentication: signed parameters. The signature is the SHA-256 hex
//!   digest of the sorted `key=value` pairs joined by `&`, followed by the API
//!   secret. The product environment must be set to SHA-256 signatures.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

use super::{MediaHost, MediaHostError, UploadedImage};
use crate::config::CloudinaryConfig;

/// Cloudinary API base URL.
const BASE_URL: &str = "https://api.cloudinary.com/v1_1";

/// Folder all uploads are placed in.
const UPLOAD_FOLDER: &str = "showcase";

/// Incoming transformation: fit within 1200x1200, automatic good quality.
const UPLOAD_TRANSFORMATION: &str = "c_limit,h_1200,w_1200/q_auto:good";

/// Cloudinary API client.
#[derive(Clone)]
pub struct CloudinaryClient {
    inner: Arc<CloudinaryClientInner>,
}

struct CloudinaryClientInner {
    client: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: SecretString,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl CloudinaryClient {
    /// Create a new Cloudinary client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &CloudinaryConfig) -> Result<Self, MediaHostError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            inner: Arc::new(CloudinaryClientInner {
                client,
                cloud_name: config.cloud_name.clone(),
                api_key: config.api_key.clone(),
                api_secret: config.api_secret.clone(),
            }),
        })
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{BASE_URL}/{}/image/{action}", self.inner.cloud_name)
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, MediaHostError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| MediaHostError::Parse(format!("Failed to parse response: {e}")));
        }

        let status = status.as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map_or(body, |e| e.error.message);

        Err(MediaHostError::Api { status, message })
    }
}

/// Sign request parameters.
///
/// `params` may be in any order; they are sorted by key before signing.
fn sign(params: &[(&str, &str)], secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_unstable_by_key(|(key, _)| *key);

    let to_sign = sorted
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

fn unix_timestamp() -> String {
    chrono::Utc::now().timestamp().to_string()
}

#[async_trait]
impl MediaHost for CloudinaryClient {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn upload(&self, bytes: Bytes, content_type: &str) -> Result<UploadedImage, MediaHostError> {
        let timestamp = unix_timestamp();
        let signature = sign(
            &[
                ("folder", UPLOAD_FOLDER),
                ("timestamp", &timestamp),
                ("transformation", UPLOAD_TRANSFORMATION),
            ],
            self.inner.api_secret.expose_secret(),
        );

        let length = bytes.len() as u64;
        let file = Part::stream_with_length(bytes, length)
            .file_name("upload")
            .mime_str(content_type)?;
        let form = Form::new()
            .part("file", file)
            .text("api_key", self.inner.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", UPLOAD_FOLDER)
            .text("transformation", UPLOAD_TRANSFORMATION)
            .text("signature", signature);

        let response = self
            .inner
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;
        let uploaded: UploadResponse = Self::handle_response(response).await?;

        debug!(public_id = %uploaded.public_id, "Image uploaded");

        Ok(UploadedImage {
            url: uploaded.secure_url,
            public_id: uploaded.public_id,
            width: uploaded.width,
            height: uploaded.height,
        })
    }

    #[instrument(skip(self))]
    async fn destroy(&self, public_id: &str) -> Result<String, MediaHostError> {
        let timestamp = unix_timestamp();
        let signature = sign(
            &[("public_id", public_id), ("timestamp", &timestamp)],
            self.inner.api_secret.expose_secret(),
        );

        let params = [
            ("public_id", public_id),
            ("timestamp", timestamp.as_str()),
            ("api_key", self.inner.api_key.as_str()),
            ("signature", signature.as_str()),
        ];

        let response = self
            .inner
            .client
            .post(self.endpoint("destroy"))
            .form(&params)
            .send()
            .await?;
        let destroyed: DestroyResponse = Self::handle_response(response).await?;

        debug!(result = %destroyed.result, "Image destroy answered");

        Ok(destroyed.result)
    }
}

impl std::fmt::Debug for CloudinaryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryClient")
            .field("cloud_name", &self.inner.cloud_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_upload_params() {
        let signature = sign(
            &[
                ("transformation", UPLOAD_TRANSFORMATION),
                ("timestamp", "1700000000"),
                ("folder", UPLOAD_FOLDER),
            ],
            "test-secret",
        );
        assert_eq!(
            signature,
            "36914e283076517c5be004b7aa8e7c73d5718710a4b39f44d5a22b2a13049695"
        );
    }

    #[test]
    fn test_sign_destroy_params() {
        let signature = sign(
            &[("timestamp", "1700000000"), ("public_id", "showcase/abc123")],
            "test-secret",
        );
        assert_eq!(
            signature,
            "ce54e0b0c3ff795fb98572c410f217ebd4a3c414059ef1642db9c86bb2802483"
        );
    }

    #[test]
    fn test_endpoint() {
        let client = CloudinaryClient::new(&CloudinaryConfig {
            cloud_name: "demo".to_owned(),
            api_key: "key".to_owned(),
            api_secret: SecretString::from("secret"),
        })
        .unwrap();

        assert_eq!(
            client.endpoint("upload"),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
        assert!(!format!("{client:?}").contains("secret"));
    }
}
