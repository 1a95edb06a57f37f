use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool, Postgres};

use super::{ProductStore, StoreError};
use crate::models::product::{NewProduct, Product, ProductChanges};

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn create(&self, product: NewProduct) -> Result<Product, StoreError> {
        let product = sqlx::query_as::<Postgres, Product>(
            "INSERT INTO products (name, description, price, quantity)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, description, price, quantity",
        )
        .bind(product.name)
        .bind(product.description)
        .bind(product.price)
        .bind(product.quantity)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    async fn get_by_id(&self, id: i64) -> Result<Product, StoreError> {
        sqlx::query_as::<Postgres, Product>(
            "SELECT id, name, description, price, quantity FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn get_all(&self) -> Result<Vec<Product>, StoreError> {
        let products = sqlx::query_as::<Postgres, Product>(
            "SELECT id, name, description, price, quantity FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    // Existence check and write happen in one statement, so a concurrent delete
    // shows up as NotFound rather than a half-applied update.
    async fn update(&self, id: i64, changes: ProductChanges) -> Result<Product, StoreError> {
        sqlx::query_as::<Postgres, Product>(
            "UPDATE products SET
             name = COALESCE($2, name),
             description = COALESCE($3, description),
             price = COALESCE($4, price),
             quantity = COALESCE($5, quantity)
             WHERE id = $1
             RETURNING id, name, description, price, quantity",
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.description)
        .bind(changes.price)
        .bind(changes.quantity)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
