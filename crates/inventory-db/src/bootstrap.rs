//! Schema bootstrap
//!
//! Applies a SQL script inside a single transaction. Either every statement
//! lands or none does.

use std::path::Path;

use tracing::{info, warn};

use crate::error::DbError;
use crate::repository::Database;

/// Schema shipped with the service (`db/schema.sql`)
pub const DEFAULT_SCHEMA: &str = include_str!("../../../db/schema.sql");

/// Apply a schema script to the database in one transaction
///
/// The script is handed to SQLite as a whole, so quoted semicolons,
/// comments and trigger bodies are parsed by the engine itself. A script
/// with no statements commits an empty transaction. On any failure the
/// transaction is dropped without commit, which rolls it back.
pub async fn apply_schema(db: &Database, sql: &str) -> Result<(), DbError> {
    let mut tx = db.pool().begin().await?;

    if let Err(e) = sqlx::raw_sql(sql).execute(&mut *tx).await {
        warn!("Schema statement failed, rolling back: {}", e);
        return Err(e.into());
    }

    tx.commit().await?;

    info!("Database schema applied");
    Ok(())
}

/// Read a schema file and apply it with [`apply_schema`]
pub async fn apply_schema_file(db: &Database, path: impl AsRef<Path>) -> Result<(), DbError> {
    let path = path.as_ref();
    info!("Applying schema from {}", path.display());

    let sql = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| DbError::Schema(format!("Failed to read {}: {}", path.display(), e)))?;

    apply_schema(db, &sql).await
}
