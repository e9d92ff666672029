//! Inventory Database Layer
//!
//! This crate provides the persistence layer for the inventory service:
//! the product model, the `Database` handle with its product repository
//! operations, and the bootstrap runner that applies the SQL schema.

pub mod analytics;
pub mod bootstrap;
pub mod error;
pub mod models;
pub mod repository;
pub mod utils;

pub use analytics::{AnalyticsSource, NoAnalytics, SqlViewAnalytics};
pub use bootstrap::{DEFAULT_SCHEMA, apply_schema, apply_schema_file};
pub use error::DbError;
pub use models::*;
pub use repository::Database;

/// Re-export sqlx types for convenience
pub use sqlx::SqlitePool;
