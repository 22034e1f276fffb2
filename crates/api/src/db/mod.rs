//! Resource store adapter.
//!
//! A thin façade over the document store. Every operation is a single atomic
//! store call; nothing here spans more than one document.
//!
//! # Collections
//!
//! - `products` - one JSONB document per product
//! - `reviews` - one JSONB document per review
//! - `settings` - at most one document per [`SettingsKind`]
//!
//! # Implementations
//!
//! - [`PgDocumentStore`] - `PostgreSQL` with JSONB documents (production)
//! - [`MemoryStore`] - process-local maps (tests and local demos)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p showcase-cli -- migrate
//! ```

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use showcase_core::{ResourceId, SettingsKind};

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

/// A stored document body: a JSON object keyed by field name.
pub type Document = Map<String, Value>;

/// Key under which a document's identifier is surfaced to callers.
pub const ID_FIELD: &str = "_id";

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the store does not have the expected shape.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Per-resource collections addressed by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Reviews,
}

impl Collection {
    /// Collection (table) name in the store.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Reviews => "reviews",
        }
    }
}

/// Sort direction for [`FindQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Parameters of a `find_all` call.
///
/// `filter` is matched by containment: a document matches when every
/// top-level key of the filter is present with an equal value.
#[derive(Debug, Clone)]
pub struct FindQuery {
    pub filter: Option<Document>,
    pub sort_key: &'static str,
    pub sort_direction: SortDirection,
    pub limit: usize,
}

impl FindQuery {
    /// Most recently created first, capped at `limit`.
    #[must_use]
    pub const fn newest(limit: usize) -> Self {
        Self {
            filter: None,
            sort_key: "created_at",
            sort_direction: SortDirection::Descending,
            limit,
        }
    }

    /// Restrict to documents where `key` equals `value`.
    #[must_use]
    pub fn matching(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.filter
            .get_or_insert_with(Document::new)
            .insert(key.to_owned(), value.into());
        self
    }
}

/// A document together with its store-assigned identifier.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: ResourceId,
    pub document: Document,
}

impl StoredDocument {
    /// Decode into an API type, surfacing the identifier as [`ID_FIELD`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the document does not
    /// match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, RepositoryError> {
        let mut document = self.document;
        document.insert(ID_FIELD.to_owned(), Value::String(self.id.to_string()));
        serde_json::from_value(Value::Object(document)).map_err(|e| {
            RepositoryError::DataCorruption(format!("document {} is malformed: {e}", self.id))
        })
    }
}

/// Encode a value as a document body.
///
/// # Errors
///
/// Returns `RepositoryError::DataCorruption` if `value` does not serialize to
/// a JSON object.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, RepositoryError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(other) => Err(RepositoryError::DataCorruption(format!(
            "expected an object, got {other}"
        ))),
        Err(e) => Err(RepositoryError::DataCorruption(e.to_string())),
    }
}

/// Document store operations.
///
/// Implementations must be safe for concurrent use; the application holds no
/// locks of its own around these calls.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Documents matching `query.filter`, ordered and capped as requested.
    async fn find_all(
        &self,
        collection: Collection,
        query: &FindQuery,
    ) -> Result<Vec<StoredDocument>, RepositoryError>;

    /// A single document by identifier.
    async fn find_one(
        &self,
        collection: Collection,
        id: ResourceId,
    ) -> Result<Option<StoredDocument>, RepositoryError>;

    /// Insert a new document and return its freshly assigned identifier.
    async fn insert(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<ResourceId, RepositoryError>;

    /// Merge `patch` into the stored document at top level.
    ///
    /// Every key in `patch` overwrites the stored key; keys not in `patch`
    /// are untouched. Returns the number of matched documents (0 or 1).
    async fn update(
        &self,
        collection: Collection,
        id: ResourceId,
        patch: Document,
    ) -> Result<u64, RepositoryError>;

    /// Delete by identifier. Returns the number of deleted documents (0 or 1).
    async fn delete(&self, collection: Collection, id: ResourceId) -> Result<u64, RepositoryError>;

    /// Delete every document in a collection. Returns the number deleted.
    async fn clear(&self, collection: Collection) -> Result<u64, RepositoryError>;

    /// The singleton settings document for `kind`, if one was ever written.
    async fn find_singleton(&self, kind: SettingsKind) -> Result<Option<Document>, RepositoryError>;

    /// Create or wholly replace the singleton settings document for `kind`.
    async fn upsert_singleton(
        &self,
        kind: SettingsKind,
        document: Document,
    ) -> Result<(), RepositoryError>;

    /// Delete every settings document. Returns the number deleted.
    async fn clear_settings(&self) -> Result<u64, RepositoryError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
