//! Product persistence.
//!
//! [`ProductStore`] is the only owner of persisted product state. Handlers get
//! request-scoped copies back from it and never touch rows directly.

mod memory;
mod postgres;

pub use memory::MemoryProductStore;
pub use postgres::{create_pool, PgProductStore};

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::models::product::{NewProduct, Product, ProductChanges};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("product not found")]
    NotFound,

    #[error("storage error")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        if matches!(error, sqlx::Error::RowNotFound) {
            return Self::NotFound;
        }
        Self::Database(error)
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Persists a new product and returns it with its assigned id.
    async fn create(&self, product: NewProduct) -> Result<Product, StoreError>;

    async fn get_by_id(&self, id: i64) -> Result<Product, StoreError>;

    /// Every stored product, materialized in one go.
    async fn get_all(&self) -> Result<Vec<Product>, StoreError>;

    /// Applies the supplied fields to an existing product. Fails with
    /// [`StoreError::NotFound`] without writing anything if `id` is unknown.
    async fn update(&self, id: i64, changes: ProductChanges) -> Result<Product, StoreError>;

    /// Removes the product permanently.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}
