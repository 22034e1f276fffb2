//! `PostgreSQL` document store.
//!
//! Each collection is a table of `(id UUID, document JSONB)` rows. Filters use
//! JSONB containment (`@>`), partial updates use JSONB concatenation (`||`),
//! and settings singletons are upserted on their discriminator.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use showcase_core::{ResourceId, SettingsKind};

use super::{
    Collection, Document, DocumentStore, FindQuery, RepositoryError, SortDirection,
    StoredDocument,
};

/// Document store backed by a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Wrap an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: ResourceId,
    document: Json<Document>,
}

impl From<DocumentRow> for StoredDocument {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: row.id,
            document: row.document.0,
        }
    }
}

fn limit_param(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_all(
        &self,
        collection: Collection,
        query: &FindQuery,
    ) -> Result<Vec<StoredDocument>, RepositoryError> {
        // Timestamps are fixed-width RFC 3339 strings, so byte order under
        // the C collation is chronological order.
        let direction = match query.sort_direction {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        };
        let sql = format!(
            r#"
            SELECT id, document FROM {table}
            WHERE document @> $1
            ORDER BY (document ->> $2) COLLATE "C" {direction}, id {direction}
            LIMIT $3
            "#,
            table = collection.name(),
        );

        let filter = Value::Object(query.filter.clone().unwrap_or_default());
        let rows: Vec<DocumentRow> = sqlx::query_as(&sql)
            .bind(Json(filter))
            .bind(query.sort_key)
            .bind(limit_param(query.limit))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(StoredDocument::from).collect())
    }

    async fn find_one(
        &self,
        collection: Collection,
        id: ResourceId,
    ) -> Result<Option<StoredDocument>, RepositoryError> {
        let sql = format!(
            "SELECT id, document FROM {} WHERE id = $1",
            collection.name()
        );
        let row: Option<DocumentRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(StoredDocument::from))
    }

    async fn insert(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<ResourceId, RepositoryError> {
        let sql = format!(
            "INSERT INTO {} (id, document) VALUES ($1, $2) RETURNING id",
            collection.name()
        );
        let id: Uuid = sqlx::query_scalar(&sql)
            .bind(ResourceId::generate())
            .bind(Json(document))
            .fetch_one(&self.pool)
            .await?;

        Ok(ResourceId::from_uuid(id))
    }

    async fn update(
        &self,
        collection: Collection,
        id: ResourceId,
        patch: Document,
    ) -> Result<u64, RepositoryError> {
        let sql = format!(
            "UPDATE {} SET document = document || $2 WHERE id = $1",
            collection.name()
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(Json(patch))
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, collection: Collection, id: ResourceId) -> Result<u64, RepositoryError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", collection.name());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        Ok(result.rows_affected())
    }

    async fn clear(&self, collection: Collection) -> Result<u64, RepositoryError> {
        let sql = format!("DELETE FROM {}", collection.name());
        let result = sqlx::query(&sql).execute(&self.pool).await?;

        Ok(result.rows_affected())
    }

    async fn find_singleton(&self, kind: SettingsKind) -> Result<Option<Document>, RepositoryError> {
        let document: Option<Json<Document>> =
            sqlx::query_scalar("SELECT document FROM settings WHERE kind = $1")
                .bind(kind.as_str())
                .fetch_optional(&self.pool)
                .await?;

        Ok(document.map(|d| d.0))
    }

    async fn upsert_singleton(
        &self,
        kind: SettingsKind,
        document: Document,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO settings (kind, document, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (kind) DO UPDATE SET document = $2, updated_at = NOW()
            ",
        )
        .bind(kind.as_str())
        .bind(Json(document))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn clear_settings(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM settings")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
