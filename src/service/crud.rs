//! Product CRUD orchestration on top of any [`ProductStore`].

use super::RequestValidator;
use crate::error::AppError;
use crate::product::{Product, ProductFields};
use crate::store::ProductStore;
use serde_json::{Map, Value};

const NOT_FOUND: &str = "product not found";

pub struct CrudService;

impl CrudService {
    pub async fn list(store: &dyn ProductStore) -> Result<Vec<Product>, AppError> {
        Ok(store.list_all().await?)
    }

    pub async fn read(store: &dyn ProductStore, id: i64) -> Result<Product, AppError> {
        store
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
    }

    /// Validate a full payload and insert it.
    pub async fn create(store: &dyn ProductStore, payload: &Map<String, Value>) -> Result<Product, AppError> {
        ensure_valid(RequestValidator::validate(payload, true, false))?;
        let product = store.create(ProductFields::from_payload(payload)).await?;
        tracing::info!(id = product.id, "product created");
        Ok(product)
    }

    /// PUT passes `require_all_fields = true`; PATCH only checks what is present.
    /// Absent fields keep their current values.
    pub async fn update(
        store: &dyn ProductStore,
        id: i64,
        payload: &Map<String, Value>,
        require_all_fields: bool,
    ) -> Result<Product, AppError> {
        let existing = Self::read(store, id).await?;
        ensure_valid(RequestValidator::validate(payload, false, require_all_fields))?;
        let fields = ProductFields::merge(&existing, payload);
        // The row can vanish between the read above and this write.
        let product = store
            .update(id, fields)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
        tracing::info!(id, "product updated");
        Ok(product)
    }

    /// Returns the removed product. A product that existed but could not be
    /// removed is a conflict.
    pub async fn delete(store: &dyn ProductStore, id: i64) -> Result<Product, AppError> {
        Self::read(store, id).await?;
        let removed = store
            .delete(id)
            .await?
            .ok_or_else(|| AppError::Conflict("product could not be deleted".into()))?;
        tracing::info!(id, "product deleted");
        Ok(removed)
    }
}

fn ensure_valid(errors: Vec<String>) -> Result<(), AppError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::JsonFileStore;
    use async_trait::async_trait;
    use serde_json::json;

    /// Finds every id on read but can no longer write it, as when a concurrent
    /// request removes the row between the read and the write.
    struct VanishingStore;

    #[async_trait]
    impl ProductStore for VanishingStore {
        async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
            Ok(Vec::new())
        }

        async fn get_by_id(&self, id: i64) -> Result<Option<Product>, StoreError> {
            Ok(Some(
                ProductFields {
                    name: "Laptop".into(),
                    price: 1200.0,
                    stock: 3.0,
                }
                .into_product(id),
            ))
        }

        async fn create(&self, fields: ProductFields) -> Result<Product, StoreError> {
            Ok(fields.into_product(1))
        }

        async fn update(&self, _id: i64, _fields: ProductFields) -> Result<Option<Product>, StoreError> {
            Ok(None)
        }

        async fn delete(&self, _id: i64) -> Result<Option<Product>, StoreError> {
            Ok(None)
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }

        fn backend_name(&self) -> &'static str {
            "vanishing"
        }
    }

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    #[tokio::test]
    async fn created_product_reads_back_with_payload_values() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("p.json"));
        let created = CrudService::create(&store, &obj(json!({"name": " Desk ", "price": 150, "stock": "2"})))
            .await
            .unwrap();
        let read = CrudService::read(&store, created.id).await.unwrap();
        assert_eq!(read, created);
        assert_eq!(read.id, 3);
        assert_eq!(read.name, "Desk");
        assert_eq!(read.price, 150.0);
        assert_eq!(read.stock, 2.0);
    }

    #[tokio::test]
    async fn invalid_create_persists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("p.json"));
        let err = CrudService::create(&store, &Map::new()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref e) if e.len() == 3));
        assert_eq!(CrudService::list(&store).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn partial_update_preserves_untouched_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("p.json"));
        let before = CrudService::read(&store, 1).await.unwrap();
        let after = CrudService::update(&store, 1, &obj(json!({"price": 999})), false).await.unwrap();
        assert_eq!(after.price, 999.0);
        assert_eq!(after.name, before.name);
        assert_eq!(after.stock, before.stock);
        assert_eq!(CrudService::read(&store, 1).await.unwrap(), after);
    }

    #[tokio::test]
    async fn full_replace_requires_all_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("p.json"));
        let err = CrudService::update(&store, 1, &obj(json!({"price": 999})), true).await.unwrap_err();
        match err {
            AppError::Validation(errors) => assert_eq!(errors, vec!["name is required", "stock is required"]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_of_missing_product_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("p.json"));
        let err = CrudService::update(&store, 50, &obj(json!({"price": 1})), false).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn second_delete_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("p.json"));
        let removed = CrudService::delete(&store, 2).await.unwrap();
        assert_eq!(removed.name, "Mouse");
        let err = CrudService::delete(&store, 2).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_that_removes_nothing_is_a_conflict() {
        let err = CrudService::delete(&VanishingStore, 1).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == "product could not be deleted"));
        assert_eq!(err.status(), axum::http::StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn update_of_row_that_vanished_is_not_found() {
        let err = CrudService::update(&VanishingStore, 1, &obj(json!({"stock": 4})), false)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "product not found"));
    }
}
