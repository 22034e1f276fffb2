//! In-memory document store.
//!
//! Mirrors the semantics of [`PgDocumentStore`](super::PgDocumentStore) on
//! process-local maps. Used by tests and handy for running the API without a
//! database.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use showcase_core::{ResourceId, SettingsKind};

use super::{
    Collection, Document, DocumentStore, FindQuery, RepositoryError, SortDirection,
    StoredDocument,
};

#[derive(Debug, Default)]
struct Collections {
    documents: HashMap<Collection, HashMap<ResourceId, Document>>,
    settings: HashMap<SettingsKind, Document>,
}

/// Document store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently in `collection`.
    pub async fn count(&self, collection: Collection) -> usize {
        self.inner
            .read()
            .await
            .documents
            .get(&collection)
            .map_or(0, HashMap::len)
    }
}

fn matches(document: &Document, filter: Option<&Document>) -> bool {
    filter.is_none_or(|filter| {
        filter
            .iter()
            .all(|(key, expected)| document.get(key) == Some(expected))
    })
}

fn sort_value<'a>(document: &'a Document, key: &str) -> Option<&'a str> {
    document.get(key).and_then(Value::as_str)
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_all(
        &self,
        collection: Collection,
        query: &FindQuery,
    ) -> Result<Vec<StoredDocument>, RepositoryError> {
        let guard = self.inner.read().await;
        let Some(documents) = guard.documents.get(&collection) else {
            return Ok(Vec::new());
        };

        let mut found: Vec<StoredDocument> = documents
            .iter()
            .filter(|(_, document)| matches(document, query.filter.as_ref()))
            .map(|(id, document)| StoredDocument {
                id: *id,
                document: document.clone(),
            })
            .collect();

        found.sort_by(|a, b| {
            let ordering: Ordering = sort_value(&a.document, query.sort_key)
                .cmp(&sort_value(&b.document, query.sort_key))
                .then_with(|| a.id.cmp(&b.id));
            match query.sort_direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        found.truncate(query.limit);

        Ok(found)
    }

    async fn find_one(
        &self,
        collection: Collection,
        id: ResourceId,
    ) -> Result<Option<StoredDocument>, RepositoryError> {
        let guard = self.inner.read().await;
        Ok(guard
            .documents
            .get(&collection)
            .and_then(|documents| documents.get(&id))
            .map(|document| StoredDocument {
                id,
                document: document.clone(),
            }))
    }

    async fn insert(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<ResourceId, RepositoryError> {
        let id = ResourceId::generate();
        self.inner
            .write()
            .await
            .documents
            .entry(collection)
            .or_default()
            .insert(id, document);
        Ok(id)
    }

    async fn update(
        &self,
        collection: Collection,
        id: ResourceId,
        patch: Document,
    ) -> Result<u64, RepositoryError> {
        let mut guard = self.inner.write().await;
        let Some(document) = guard
            .documents
            .get_mut(&collection)
            .and_then(|documents| documents.get_mut(&id))
        else {
            return Ok(0);
        };

        document.extend(patch);
        Ok(1)
    }

    async fn delete(&self, collection: Collection, id: ResourceId) -> Result<u64, RepositoryError> {
        let mut guard = self.inner.write().await;
        let removed = guard
            .documents
            .get_mut(&collection)
            .and_then(|documents| documents.remove(&id));
        Ok(u64::from(removed.is_some()))
    }

    async fn clear(&self, collection: Collection) -> Result<u64, RepositoryError> {
        let mut guard = self.inner.write().await;
        let removed = guard
            .documents
            .remove(&collection)
            .map_or(0, |documents| documents.len());
        Ok(removed as u64)
    }

    async fn find_singleton(&self, kind: SettingsKind) -> Result<Option<Document>, RepositoryError> {
        Ok(self.inner.read().await.settings.get(&kind).cloned())
    }

    async fn upsert_singleton(
        &self,
        kind: SettingsKind,
        document: Document,
    ) -> Result<(), RepositoryError> {
        self.inner.write().await.settings.insert(kind, document);
        Ok(())
    }

    async fn clear_settings(&self) -> Result<u64, RepositoryError> {
        let mut guard = self.inner.write().await;
        let removed = guard.settings.len();
        guard.settings.clear();
        Ok(removed as u64)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::db::to_document;

    fn doc(value: &Value) -> Document {
        to_document(value).unwrap()
    }

    #[tokio::test]
    async fn test_find_all_orders_newest_first_and_limits() {
        let store = MemoryStore::new();
        for (i, featured) in [(1, true), (2, false), (3, true)] {
            store
                .insert(
                    Collection::Products,
                    doc(&json!({
                        "name": format!("p{i}"),
                        "is_featured": featured,
                        "created_at": format!("2025-01-0{i}T00:00:00.000000Z"),
                    })),
                )
                .await
                .unwrap();
        }

        let all = store
            .find_all(Collection::Products, &FindQuery::newest(2))
            .await
            .unwrap();
        let names: Vec<_> = all
            .iter()
            .map(|d| d.document["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["p3", "p2"]);

        let featured = store
            .find_all(
                Collection::Products,
                &FindQuery::newest(10).matching("is_featured", true),
            )
            .await
            .unwrap();
        assert_eq!(featured.len(), 2);
        assert!(featured.iter().all(|d| d.document["is_featured"] == true));
    }

    #[tokio::test]
    async fn test_update_merges_top_level_keys() {
        let store = MemoryStore::new();
        let id = store
            .insert(Collection::Reviews, doc(&json!({"a": 1, "b": 2})))
            .await
            .unwrap();

        let matched = store
            .update(Collection::Reviews, id, doc(&json!({"b": 3, "c": null})))
            .await
            .unwrap();
        assert_eq!(matched, 1);

        let stored = store
            .find_one(Collection::Reviews, id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(Value::Object(stored.document), json!({"a": 1, "b": 3, "c": null}));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_report_zero() {
        let store = MemoryStore::new();
        let id = ResourceId::generate();

        assert_eq!(
            store
                .update(Collection::Products, id, Document::new())
                .await
                .unwrap(),
            0
        );
        assert_eq!(store.delete(Collection::Products, id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let store = MemoryStore::new();
        let id = store
            .insert(Collection::Products, doc(&json!({"name": "x"})))
            .await
            .unwrap();

        assert_eq!(store.delete(Collection::Products, id).await.unwrap(), 1);
        assert_eq!(store.delete(Collection::Products, id).await.unwrap(), 0);
        assert_eq!(store.count(Collection::Products).await, 0);
    }

    #[tokio::test]
    async fn test_singletons_replace_wholesale() {
        let store = MemoryStore::new();
        let kind = SettingsKind::Carousel;

        assert!(store.find_singleton(kind).await.unwrap().is_none());

        store
            .upsert_singleton(kind, doc(&json!({"slides": [1, 2]})))
            .await
            .unwrap();
        store
            .upsert_singleton(kind, doc(&json!({"other": true})))
            .await
            .unwrap();

        let stored = store.find_singleton(kind).await.unwrap().unwrap();
        assert_eq!(Value::Object(stored), json!({"other": true}));
        assert_eq!(store.clear_settings().await.unwrap(), 1);
    }
}
