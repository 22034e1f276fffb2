//! Product and review services.
//!
//! Both resource families follow the same contract, so one generic service
//! carries it: public reads, admin-only writes, server-stamped timestamps and
//! identifier checks before the store is touched.

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{info, instrument};

use showcase_core::{AdminIdentity, ResourceId};

use super::ServiceError;
use crate::db::{DocumentStore, FindQuery, StoredDocument, to_document};
use crate::models::{Product, Resource, Review, Validate, timestamp};

/// Cap on `list` results.
pub const LIST_LIMIT: usize = 100;

/// Cap on `list_featured` results.
pub const FEATURED_LIMIT: usize = 10;

/// CRUD service for one resource family.
pub struct ResourceService<R> {
    store: Arc<dyn DocumentStore>,
    _resource: PhantomData<fn() -> R>,
}

/// Service for products.
pub type ProductService = ResourceService<Product>;

/// Service for reviews.
pub type ReviewService = ResourceService<Review>;

impl<R> std::fmt::Debug for ResourceService<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceService").finish_non_exhaustive()
    }
}

impl<R: Resource> ResourceService<R> {
    /// Create a service over a shared store handle.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _resource: PhantomData,
        }
    }

    /// Up to 100 entities, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    #[instrument(skip(self), fields(resource = R::LABEL))]
    pub async fn list(&self) -> Result<Vec<R>, ServiceError> {
        self.find(&FindQuery::newest(LIST_LIMIT)).await
    }

    /// Up to 10 featured entities, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    #[instrument(skip(self), fields(resource = R::LABEL))]
    pub async fn list_featured(&self) -> Result<Vec<R>, ServiceError> {
        self.find(&FindQuery::newest(FEATURED_LIMIT).matching("is_featured", true))
            .await
    }

    /// A single entity.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidIdentifier` for a malformed id and
    /// `ServiceError::NotFound` when nothing matches.
    #[instrument(skip(self), fields(resource = R::LABEL))]
    pub async fn get_by_id(&self, id: &str) -> Result<R, ServiceError> {
        let id = Self::parse_id(id)?;
        self.fetch(id).await
    }

    /// Validate, stamp and store a new entity.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` if the input breaks a field
    /// constraint.
    #[instrument(skip(self, input, admin), fields(resource = R::LABEL, admin = %admin))]
    pub async fn create(&self, input: R::Create, admin: &AdminIdentity) -> Result<R, ServiceError> {
        let input = input.validate()?;

        let mut document = to_document(&input)?;
        let stamp = Value::String(timestamp::format(&timestamp::now()));
        document.insert("created_at".to_owned(), stamp.clone());
        document.insert("updated_at".to_owned(), stamp);

        let id = self.store.insert(R::COLLECTION, document.clone()).await?;
        info!(%id, "Created {}", R::LABEL);

        Ok(StoredDocument { id, document }.decode()?)
    }

    /// Merge the supplied fields into an entity and return the result.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidIdentifier`, `ServiceError::Validation`
    /// or `ServiceError::NotFound`.
    #[instrument(skip(self, patch, admin), fields(resource = R::LABEL, admin = %admin))]
    pub async fn update(
        &self,
        id: &str,
        patch: R::Update,
        admin: &AdminIdentity,
    ) -> Result<R, ServiceError> {
        let id = Self::parse_id(id)?;
        let patch = patch.validate()?;

        let current = self
            .store
            .find_one(R::COLLECTION, id)
            .await?
            .ok_or_else(Self::not_found)?;

        let mut changes = to_document(&patch)?;
        let stamp = next_stamp(stored_timestamp(&current, "updated_at"));
        changes.insert(
            "updated_at".to_owned(),
            Value::String(timestamp::format(&stamp)),
        );

        if self.store.update(R::COLLECTION, id, changes).await? == 0 {
            return Err(Self::not_found());
        }
        info!(%id, "Updated {}", R::LABEL);

        self.fetch(id).await
    }

    /// Delete an entity.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidIdentifier` or `ServiceError::NotFound`.
    #[instrument(skip(self, admin), fields(resource = R::LABEL, admin = %admin))]
    pub async fn delete(&self, id: &str, admin: &AdminIdentity) -> Result<(), ServiceError> {
        let id = Self::parse_id(id)?;

        if self.store.delete(R::COLLECTION, id).await? == 0 {
            return Err(Self::not_found());
        }
        info!(%id, "Deleted {}", R::LABEL);

        Ok(())
    }

    // =========================================================================
    // Helper Functions
    // =========================================================================

    fn parse_id(id: &str) -> Result<ResourceId, ServiceError> {
        ResourceId::parse(id).map_err(|_| ServiceError::InvalidIdentifier { label: R::LABEL })
    }

    const fn not_found() -> ServiceError {
        ServiceError::NotFound { label: R::LABEL }
    }

    async fn find(&self, query: &FindQuery) -> Result<Vec<R>, ServiceError> {
        let documents = self.store.find_all(R::COLLECTION, query).await?;
        documents
            .into_iter()
            .map(|document| document.decode().map_err(ServiceError::from))
            .collect()
    }

    async fn fetch(&self, id: ResourceId) -> Result<R, ServiceError> {
        let document = self
            .store
            .find_one(R::COLLECTION, id)
            .await?
            .ok_or_else(Self::not_found)?;
        Ok(document.decode()?)
    }
}

fn stored_timestamp(document: &StoredDocument, key: &str) -> Option<DateTime<Utc>> {
    document
        .document
        .get(key)
        .and_then(Value::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Current time, nudged past `previous` so `updated_at` strictly increases.
fn next_stamp(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = timestamp::now();
    match previous {
        Some(previous) if previous >= now => previous + chrono::Duration::microseconds(1),
        _ => now,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;
    use crate::db::{Collection, MemoryStore};
    use crate::models::{NewProduct, NewReview, ProductPatch};

    fn admin() -> AdminIdentity {
        AdminIdentity::verified("admin")
    }

    fn products() -> (Arc<MemoryStore>, ProductService) {
        let store = Arc::new(MemoryStore::new());
        let service = ProductService::new(store.clone());
        (store, service)
    }

    fn new_product(value: serde_json::Value) -> NewProduct {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (_, service) = products();
        let created = service
            .create(
                new_product(json!({"name": "Test Coaster", "price": 100})),
                &admin(),
            )
            .await
            .unwrap();

        assert_eq!(created.created_at, created.updated_at);

        let fetched = service.get_by_id(&created.id.to_string()).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Test Coaster");
        assert!(!fetched.is_featured);
        assert!(!fetched.is_new);
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let (_, service) = products();
        let a = service
            .create(new_product(json!({"name": "A"})), &admin())
            .await
            .unwrap();
        let b = service
            .create(new_product(json!({"name": "B"})), &admin())
            .await
            .unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let (_, service) = products();
        let created = service
            .create(
                new_product(json!({"name": "Tray", "price": 100, "category": "Home"})),
                &admin(),
            )
            .await
            .unwrap();
        let id = created.id.to_string();

        let patch: ProductPatch = serde_json::from_value(json!({"price": 150})).unwrap();
        let updated = service.update(&id, patch, &admin()).await.unwrap();

        assert_eq!(updated.name, "Tray");
        assert_eq!(updated.category.as_deref(), Some("Home"));
        assert_eq!(updated.price.unwrap().amount(), Decimal::new(150, 0));
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);

        let patch: ProductPatch = serde_json::from_value(json!({"category": null})).unwrap();
        let cleared = service.update(&id, patch, &admin()).await.unwrap();
        assert_eq!(cleared.category, None);
        assert!(cleared.updated_at > updated.updated_at);
    }

    #[tokio::test]
    async fn test_malformed_id_never_reaches_store() {
        let (_, service) = products();
        let result = service.get_by_id("not-an-id").await;
        assert!(matches!(
            result,
            Err(ServiceError::InvalidIdentifier { label: "Product" })
        ));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Invalid product ID"
        );
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let (_, service) = products();
        let id = ResourceId::generate().to_string();

        let err = service.get_by_id(&id).await.unwrap_err();
        assert_eq!(err.to_string(), "Product not found");

        let patch = ProductPatch::default();
        assert!(matches!(
            service.update(&id, patch, &admin()).await,
            Err(ServiceError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let (store, service) = products();
        let created = service
            .create(new_product(json!({"name": "Clock"})), &admin())
            .await
            .unwrap();
        let id = created.id.to_string();

        service.delete(&id, &admin()).await.unwrap();
        assert!(matches!(
            service.delete(&id, &admin()).await,
            Err(ServiceError::NotFound { .. })
        ));
        assert_eq!(store.count(Collection::Products).await, 0);
    }

    #[tokio::test]
    async fn test_validation_failure_writes_nothing() {
        let (store, service) = products();
        let result = service
            .create(new_product(json!({"name": ""})), &admin())
            .await;

        assert!(matches!(result, Err(ServiceError::Validation(_))));
        assert_eq!(store.count(Collection::Products).await, 0);
    }

    #[tokio::test]
    async fn test_featured_filter_and_order() {
        let (_, service) = products();
        for (name, featured) in [("one", true), ("two", false), ("three", true)] {
            service
                .create(
                    new_product(json!({"name": name, "is_featured": featured})),
                    &admin(),
                )
                .await
                .unwrap();
        }

        let all = service.list().await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        let featured = service.list_featured().await.unwrap();
        assert_eq!(featured.len(), 2);
        assert!(featured.iter().all(|p| p.is_featured));
    }

    #[tokio::test]
    async fn test_review_rating_rejected() {
        let store = Arc::new(MemoryStore::new());
        let service = ReviewService::new(store.clone());
        let input: NewReview = serde_json::from_value(json!({
            "customer_name": "Ravi",
            "rating": 0,
            "review_text": "Great",
        }))
        .unwrap();

        assert!(matches!(
            service.create(input, &admin()).await,
            Err(ServiceError::Validation(_))
        ));
        assert_eq!(store.count(Collection::Reviews).await, 0);
    }

    #[test]
    fn test_next_stamp_strictly_increases() {
        let future = timestamp::now() + chrono::Duration::seconds(60);
        assert!(next_stamp(Some(future)) > future);
        assert!(next_stamp(None) <= timestamp::now());
    }
}
