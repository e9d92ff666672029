//! Request/Response DTOs for the product API
//!
//! Responses reuse the `inventory_db` models directly; their JSON shape is
//! the one the UI consumes.

use serde::Deserialize;

/// Create product request
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub sku: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub quantity: i64,
    pub price: f64,
}

/// Update quantity request
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

/// Query parameters for the most-added ranking
#[derive(Debug, Deserialize)]
pub struct MostAddedQuery {
    pub limit: Option<i64>,
}
