//! Inventory REST API
//!
//! This crate provides the Axum-based HTTP API for the inventory service:
//! product CRUD, the quantity-edit endpoint, analytics and health checks.

pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, FieldError};
pub use routes::create_router;
pub use state::{AppState, MetricsHandle};
