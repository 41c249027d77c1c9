//! Product store: the single owner and writer of the product collection.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, RwLockWriteGuard};

use crate::models::Product;

use super::StoreError;

/// On-disk shape: `{"productos": [...]}`.
#[derive(Debug, Deserialize)]
struct ProductsFile {
    productos: Vec<Product>,
}

/// Borrowed shape for rewrites, so persisting never clones the collection.
#[derive(Debug, Serialize)]
struct ProductsFileRef<'a> {
    productos: &'a [Product],
}

/// In-memory product collection backed by a JSON file.
///
/// Catalog reads take a cloned snapshot and run in parallel; checkout takes
/// the write lock via [`ProductStore::write`] and holds it across
/// validate, decrement, and persist, which serializes stock mutation.
#[derive(Debug)]
pub struct ProductStore {
    path: PathBuf,
    products: RwLock<Vec<Product>>,
}

impl ProductStore {
    /// Load the collection from an existing file.
    ///
    /// The products file is not created on demand: a store without a
    /// catalog is a deployment error, and a file with the wrong shape is
    /// [`StoreError::Corrupt`]. Callers must treat either as fatal at
    /// startup.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be read and
    /// [`StoreError::Corrupt`] if it does not decode to `{"productos": [...]}`.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let file: ProductsFile = super::read_collection(&path).await?;

        Ok(Self {
            path,
            products: RwLock::new(file.productos),
        })
    }

    /// Create the collection file from scratch (seeding).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be written.
    pub async fn create(
        path: impl Into<PathBuf>,
        products: &[Product],
    ) -> Result<Self, StoreError> {
        let path = path.into();
        super::write_collection(&path, &ProductsFileRef { productos: products }).await?;

        Ok(Self {
            path,
            products: RwLock::new(products.to_vec()),
        })
    }

    /// Cloned snapshot of the collection for read-only work.
    pub async fn snapshot(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    /// Number of products in the collection.
    pub async fn count(&self) -> usize {
        self.products.read().await.len()
    }

    /// Case-insensitive SKU lookup.
    pub async fn get(&self, sku: &str) -> Option<Product> {
        let needle = sku.trim();
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.sku.matches(needle))
            .cloned()
    }

    /// Take the collection write lock.
    ///
    /// The guard must stay held through any persist that follows the
    /// mutation; [`Self::persist_locked`] borrows the store immutably, so
    /// holding both is fine.
    pub async fn write(&self) -> RwLockWriteGuard<'_, Vec<Product>> {
        self.products.write().await
    }

    /// Rewrite the collection file from the locked contents.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be written.
    pub async fn persist_locked(&self, products: &[Product]) -> Result<(), StoreError> {
        super::write_collection(&self.path, &ProductsFileRef { productos: products }).await
    }

    /// Replace the locked contents with what is on disk.
    ///
    /// Used to roll the in-memory collection back when a persist fails
    /// after an in-place mutation: memory must never run ahead of the file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] / [`StoreError::Corrupt`] if the file
    /// cannot be re-read.
    pub async fn reload_locked(&self, products: &mut Vec<Product>) -> Result<(), StoreError> {
        let file: ProductsFile = super::read_collection(&self.path).await?;
        *products = file.productos;
        Ok(())
    }
}
