//! End-to-end tests for the showcase API.
//!
//! Each test spawns the real router on an ephemeral port, backed by the
//! in-memory document store and a media host that records calls instead of
//! talking to Cloudinary. No database or network credentials are needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p showcase-integration-tests
//! ```

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::{Client, RequestBuilder};
use secrecy::SecretString;

use showcase_api::config::AdminCredentials;
use showcase_api::db::{DocumentStore, MemoryStore};
use showcase_api::media::{MediaHost, MediaHostError, UploadedImage};
use showcase_api::{ApiConfig, AppState, routes};

/// Admin username configured for every test server.
pub const ADMIN_USERNAME: &str = "admin";

/// Admin password configured for every test server.
pub const ADMIN_PASSWORD: &str = "integration-secret";

/// Media host that counts calls and answers with a fixed image.
#[derive(Debug, Default)]
pub struct RecordingMediaHost {
    uploads: AtomicUsize,
    deletions: AtomicUsize,
}

impl RecordingMediaHost {
    /// Number of upload calls received.
    pub fn uploads(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    /// Number of delete calls received.
    pub fn deletions(&self) -> usize {
        self.deletions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaHost for RecordingMediaHost {
    async fn upload(&self, bytes: Bytes, _content_type: &str) -> Result<UploadedImage, MediaHostError> {
        let n = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(UploadedImage {
            url: format!("https://media.test/showcase/image-{n}.jpg"),
            public_id: format!("showcase/image-{n}"),
            width: Some(u32::try_from(bytes.len()).unwrap_or(u32::MAX)),
            height: Some(1),
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<String, MediaHostError> {
        self.deletions.fetch_add(1, Ordering::SeqCst);
        if public_id.ends_with("missing") {
            Ok("not found".to_string())
        } else {
            Ok("ok".to_string())
        }
    }
}

/// A running API server plus handles on its collaborators.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<MemoryStore>,
    pub media: Arc<RecordingMediaHost>,
}

impl TestApp {
    /// Start a server on `127.0.0.1:0`.
    pub async fn spawn() -> Self {
        let store = Arc::new(MemoryStore::new());
        let media = Arc::new(RecordingMediaHost::default());

        let dyn_store: Arc<dyn DocumentStore> = store.clone();
        let dyn_media: Arc<dyn MediaHost> = media.clone();
        let state = AppState::new(test_config(), dyn_store, dyn_media);

        let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        tokio::spawn(async move {
            axum::serve(listener, routes::app(state))
                .await
                .expect("Test server error");
        });

        Self {
            addr,
            client: Client::new(),
            store,
            media,
        }
    }

    /// Absolute URL for `path`.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    /// Request carrying the configured admin credentials.
    pub fn admin(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .basic_auth(ADMIN_USERNAME, Some(ADMIN_PASSWORD))
    }
}

/// Configuration with the test admin and no media or Sentry settings.
pub fn test_config() -> ApiConfig {
    ApiConfig {
        database_url: SecretString::from("postgres://unused"),
        host: Ipv4Addr::LOCALHOST.into(),
        port: 0,
        admin: AdminCredentials {
            username: ADMIN_USERNAME.to_string(),
            password: SecretString::from(ADMIN_PASSWORD),
        },
        allowed_origins: vec!["http://localhost:3000".to_string()],
        request_timeout: Duration::from_secs(30),
        cloudinary: None,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}
