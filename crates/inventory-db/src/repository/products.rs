//! Product operations
//!
//! Each operation is one parameterized statement. Absent rows come back as
//! `None`; translating that into a user-facing error is the caller's job.

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{NewProduct, Product};
use crate::repository::Database;

const PRODUCT_COLUMNS: &str =
    "id, name, type, sku, image_url, description, quantity, price, created_at";

impl Database {
    // ==================== Product Operations ====================

    /// Insert a new product and return the stored row
    pub async fn insert_product(&self, product: NewProduct) -> Result<Product, DbError> {
        let now = Utc::now();
        let sql = format!(
            r#"
            INSERT INTO products (name, type, sku, image_url, description, quantity, price, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {PRODUCT_COLUMNS}
            "#
        );
        let row = sqlx::query(&sql)
            .bind(&product.name)
            .bind(&product.product_type)
            .bind(&product.sku)
            .bind(&product.image_url)
            .bind(&product.description)
            .bind(product.quantity)
            .bind(product.price)
            .bind(now.to_rfc3339())
            .fetch_one(&self.pool)
            .await?;

        Ok(Product::try_from(&row)?)
    }

    /// List all products in insertion order
    pub async fn list_products(&self) -> Result<Vec<Product>, DbError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| Product::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// Get a product by ID
    pub async fn get_product(&self, id: i64) -> Result<Option<Product>, DbError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?");
        let result = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        result.map(|row| Product::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// Replace a product's quantity, returning the updated row
    pub async fn update_product_quantity(
        &self,
        id: i64,
        quantity: i64,
    ) -> Result<Option<Product>, DbError> {
        let sql = format!("UPDATE products SET quantity = ? WHERE id = ? RETURNING {PRODUCT_COLUMNS}");
        let result = sqlx::query(&sql)
            .bind(quantity)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        result.map(|row| Product::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// Delete a product, returning the removed row
    pub async fn delete_product(&self, id: i64) -> Result<Option<Product>, DbError> {
        let sql = format!("DELETE FROM products WHERE id = ? RETURNING {PRODUCT_COLUMNS}");
        let result = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        result.map(|row| Product::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// Count stored products
    pub async fn count_products(&self) -> Result<i64, DbError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("count"))
    }
}
