//! JSON file backend: every call reads the whole collection, mutations rewrite it.
//!
//! No lock is held between the read and the write, so two concurrent writers
//! can both read the same snapshot and the later write wins.

use super::ProductStore;
use crate::error::StoreError;
use crate::product::{Product, ProductFields};
use async_trait::async_trait;
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records written when the file does not exist yet.
    pub fn seed() -> Vec<Product> {
        vec![
            ProductFields {
                name: "Laptop".into(),
                price: 1200.0,
                stock: 3.0,
            }
            .into_product(1),
            ProductFields {
                name: "Mouse".into(),
                price: 25.0,
                stock: 15.0,
            }
            .into_product(2),
        ]
    }

    async fn load(&self) -> Result<Vec<Product>, StoreError> {
        if !tokio::fs::try_exists(&self.path).await? {
            let seed = Self::seed();
            tracing::info!(path = %self.path.display(), "seeding product storage");
            self.save(&seed).await?;
            return Ok(seed);
        }
        let content = tokio::fs::read_to_string(&self.path).await?;
        tracing::debug!(path = %self.path.display(), bytes = content.len(), "read products");
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str::<Value>(&content)? {
            Value::Array(items) => Ok(items
                .iter()
                .filter_map(|item| {
                    let product = Product::from_stored(item);
                    if product.is_none() {
                        tracing::warn!(path = %self.path.display(), record = %item, "skipping non-object record");
                    }
                    product
                })
                .collect()),
            _ => Ok(Vec::new()),
        }
    }

    // Each write goes to its own temp file in the target directory and is
    // renamed over the target, so concurrent writers never share a temp file
    // and readers see either the old or the new collection.
    async fn save(&self, products: &[Product]) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(products)?;
        let path = self.path.clone();
        let dir = self.dir().to_path_buf();
        tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
            let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
            tmp.write_all(body.as_bytes())?;
            tmp.persist(&path).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))??;
        tracing::debug!(path = %self.path.display(), count = products.len(), "wrote products");
        self.make_world_writable().await;
        Ok(())
    }

    fn dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }

    #[cfg(unix)]
    async fn make_world_writable(&self) {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o666);
        if let Err(e) = tokio::fs::set_permissions(&self.path, perms).await {
            tracing::debug!(path = %self.path.display(), error = %e, "chmod failed");
        }
    }

    #[cfg(not(unix))]
    async fn make_world_writable(&self) {}
}

fn next_id(products: &[Product]) -> i64 {
    products.iter().map(|p| p.id).max().unwrap_or(0) + 1
}

#[async_trait]
impl ProductStore for JsonFileStore {
    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        self.load().await
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Product>, StoreError> {
        Ok(self.load().await?.into_iter().find(|p| p.id == id))
    }

    async fn create(&self, fields: ProductFields) -> Result<Product, StoreError> {
        let mut products = self.load().await?;
        let product = fields.into_product(next_id(&products));
        products.push(product.clone());
        self.save(&products).await?;
        Ok(product)
    }

    async fn update(&self, id: i64, fields: ProductFields) -> Result<Option<Product>, StoreError> {
        let mut products = self.load().await?;
        let Some(current) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        current.name = fields.name;
        current.price = fields.price;
        current.stock = fields.stock;
        let updated = current.clone();
        self.save(&products).await?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let mut products = self.load().await?;
        let Some(index) = products.iter().position(|p| p.id == id) else {
            return Ok(None);
        };
        let removed = products.remove(index);
        self.save(&products).await?;
        Ok(Some(removed))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.load().await.map(|_| ())
    }

    fn backend_name(&self) -> &'static str {
        "json-file"
    }
}
