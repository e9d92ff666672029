//! Product routes

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::{get, put},
};
use inventory_db::{NewProduct, Product};
use tracing::{debug, info};

use crate::error::{ApiError, FieldError};
use crate::state::AppState;

use super::types::{CreateProductRequest, UpdateQuantityRequest};

// ==================== Input Validation ====================

fn require_text(errors: &mut Vec<FieldError>, param: &str, label: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(param, format!("{} is required", label)));
    }
}

fn check_quantity(errors: &mut Vec<FieldError>, quantity: i64) {
    if quantity < 0 {
        errors.push(FieldError::new("quantity", "Quantity must be a non-negative integer"));
    }
}

/// Validate a create request, collecting every failing field
fn validate_create(request: &CreateProductRequest) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    require_text(&mut errors, "name", "Name", &request.name);
    require_text(&mut errors, "type", "Type", &request.product_type);
    require_text(&mut errors, "sku", "SKU", &request.sku);
    check_quantity(&mut errors, request.quantity);
    if !request.price.is_finite() || request.price < 0.0 {
        errors.push(FieldError::new("price", "Price must be a non-negative number"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

// ==================== Product Routes ====================

/// GET /products
async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.db.list_products().await?;
    debug!("Listing {} products", products.len());
    Ok(Json(products))
}

/// POST /products
async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let request = json_body(body)?;
    validate_create(&request)?;

    debug!("Creating product: {} ({})", request.name, request.sku);

    let product = state
        .db
        .insert_product(NewProduct {
            name: request.name,
            product_type: request.product_type,
            sku: request.sku,
            image_url: request.image_url,
            description: request.description,
            quantity: request.quantity,
            price: request.price,
        })
        .await?;

    metrics::counter!("inventory_products_created_total").increment(1);
    info!("Created product {}: {}", product.id, product.name);

    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /products/{id}
async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Product>, ApiError> {
    let id = path_id(id)?;
    let product = state
        .db
        .get_product(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Product: {}", id)))?;

    Ok(Json(product))
}

/// PUT /products/{id}/quantity
async fn update_quantity(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateQuantityRequest>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let id = path_id(id)?;
    let request = json_body(body)?;

    let mut errors = Vec::new();
    check_quantity(&mut errors, request.quantity);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    debug!("Updating quantity of product {} to {}", id, request.quantity);

    let product = state
        .db
        .update_product_quantity(id, request.quantity)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Product: {}", id)))?;

    metrics::counter!("inventory_quantity_updates_total").increment(1);
    info!("Product {} quantity set to {}", product.id, product.quantity);

    Ok(Json(product))
}

/// DELETE /products/{id}
async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Product>, ApiError> {
    let id = path_id(id)?;
    debug!("Deleting product: {}", id);

    let product = state
        .db
        .delete_product(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Product: {}", id)))?;

    metrics::counter!("inventory_products_deleted_total").increment(1);
    info!("Deleted product {}: {}", product.id, product.name);

    Ok(Json(product))
}

/// Create product routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/{id}", get(get_product).delete(delete_product))
        .route("/products/{id}/quantity", put(update_quantity))
}
