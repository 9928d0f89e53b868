//! Product persistence. Two interchangeable backends share the [`ProductStore`] contract.
//!
//! Neither backend serializes concurrent writers: the last write wins.

mod file;
mod postgres;

pub use file::JsonFileStore;
pub use postgres::{ensure_database_exists, ensure_products_table, PgProductStore};

use crate::error::StoreError;
use crate::product::{Product, ProductFields};
use async_trait::async_trait;

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products. File order for the JSON file, descending id for SQL.
    async fn list_all(&self) -> Result<Vec<Product>, StoreError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Product>, StoreError>;

    /// Persist a new product and return it with its assigned id.
    async fn create(&self, fields: ProductFields) -> Result<Product, StoreError>;

    /// Replace the mutable fields of `id`. `None` when no such product.
    async fn update(&self, id: i64, fields: ProductFields) -> Result<Option<Product>, StoreError>;

    /// Remove `id` and return what was removed. `None` when nothing was removed.
    async fn delete(&self, id: i64) -> Result<Option<Product>, StoreError>;

    /// Cheap readiness check used by `/ready`.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Short label reported by `/version`.
    fn backend_name(&self) -> &'static str;
}
