//! Database repository implementation

use sqlx::Row;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;

use crate::error::DbError;

// Submodules
mod products;

/// Database connection and operations
///
/// A cheap-to-clone handle around the connection pool. Construct one per
/// process and pass it to whatever needs database access.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, DbError> {
        info!("Connecting to database: {}", database_url);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the underlying pool for advanced usage
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check whether a table or view with the given name exists
    pub async fn has_table(&self, name: &str) -> Result<bool, DbError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) as count
            FROM sqlite_master
            WHERE type IN ('table', 'view') AND name = ?
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        let count: i64 = row.get("count");
        Ok(count > 0)
    }

    /// Close all pooled connections
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connections closed");
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;

    #[tokio::test]
    async fn test_has_table() {
        let db = empty_database().await;
        assert!(!db.has_table("products").await.unwrap());

        let db = test_database().await;
        assert!(db.has_table("products").await.unwrap());
        assert!(!db.has_table("orders").await.unwrap());
    }
}
