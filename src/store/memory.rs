use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{ProductStore, StoreError};
use crate::models::product::{NewProduct, Product, ProductChanges};

/// In-process store. Every operation holds the lock for its whole body, which gives the
/// same check-then-mutate atomicity the Postgres store gets from single statements.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    inner: Mutex<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    last_id: i64,
    products: BTreeMap<i64, Product>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn create(&self, product: NewProduct) -> Result<Product, StoreError> {
        let mut tables = self.inner.lock().await;
        tables.last_id += 1;

        let product = Product {
            id: tables.last_id,
            name: product.name,
            description: product.description,
            price: product.price,
            quantity: product.quantity,
        };
        tables.products.insert(product.id, product.clone());

        Ok(product)
    }

    async fn get_by_id(&self, id: i64) -> Result<Product, StoreError> {
        let tables = self.inner.lock().await;
        tables.products.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn get_all(&self) -> Result<Vec<Product>, StoreError> {
        let tables = self.inner.lock().await;
        Ok(tables.products.values().cloned().collect())
    }

    async fn update(&self, id: i64, changes: ProductChanges) -> Result<Product, StoreError> {
        let mut tables = self.inner.lock().await;
        let product = tables.products.get_mut(&id).ok_or(StoreError::NotFound)?;

        changes.apply_to(product);

        Ok(product.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.inner.lock().await;
        tables
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
