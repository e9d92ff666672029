//! Database models

use crate::utils::parse_datetime_or_now;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;

/// Product model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Free-form category
    #[serde(rename = "type")]
    pub product_type: String,
    pub sku: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub quantity: i64,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

/// New product (for insertion)
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub product_type: String,
    pub sku: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub quantity: i64,
    pub price: f64,
}

/// One row of the "most added" ranking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MostAddedProduct {
    pub id: i64,
    pub name: String,
    pub times_added: i64,
}

// ==================== TryFrom Implementations ====================

impl TryFrom<&sqlx::sqlite::SqliteRow> for Product {
    type Error = sqlx::Error;

    fn try_from(row: &sqlx::sqlite::SqliteRow) -> Result<Self, Self::Error> {
        Ok(Product {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            product_type: row.try_get("type")?,
            sku: row.try_get("sku")?,
            image_url: row.try_get("image_url")?,
            description: row.try_get("description")?,
            quantity: row.try_get("quantity")?,
            price: row.try_get("price")?,
            created_at: parse_datetime_or_now(&row.try_get::<String, _>("created_at")?),
        })
    }
}

impl TryFrom<&sqlx::sqlite::SqliteRow> for MostAddedProduct {
    type Error = sqlx::Error;

    fn try_from(row: &sqlx::sqlite::SqliteRow) -> Result<Self, Self::Error> {
        Ok(MostAddedProduct {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            times_added: row.try_get("times_added")?,
        })
    }
}
