//! "Most added" analytics
//!
//! The ranking is maintained outside this service. We only read it.

use async_trait::async_trait;

use crate::error::DbError;
use crate::models::MostAddedProduct;
use crate::repository::Database;
use crate::utils::is_plain_identifier;

/// Source of the "most added products" ranking
#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    /// Whether the source is backed by real data
    fn is_enabled(&self) -> bool {
        true
    }

    /// Top `limit` products by number of times added, highest first
    async fn most_added(&self, limit: i64) -> Result<Vec<MostAddedProduct>, DbError>;
}

/// Reads the ranking from an externally maintained table or view
///
/// The relation must expose `id`, `name` and `times_added` columns.
pub struct SqlViewAnalytics {
    db: Database,
    query: String,
}

impl SqlViewAnalytics {
    pub fn new(db: Database, relation: &str) -> Result<Self, DbError> {
        if !is_plain_identifier(relation) {
            return Err(DbError::InvalidIdentifier(relation.to_string()));
        }

        // Identifiers cannot be bound, so the relation is validated above
        let query = format!(
            "SELECT id, name, times_added FROM {} ORDER BY times_added DESC, id LIMIT ?",
            relation
        );
        Ok(Self { db, query })
    }
}

#[async_trait]
impl AnalyticsSource for SqlViewAnalytics {
    async fn most_added(&self, limit: i64) -> Result<Vec<MostAddedProduct>, DbError> {
        let rows = sqlx::query(&self.query)
            .bind(limit)
            .fetch_all(self.db.pool())
            .await?;

        rows.iter()
            .map(|row| MostAddedProduct::try_from(row).map_err(DbError::from))
            .collect()
    }
}

/// Placeholder when no analytics relation is configured
pub struct NoAnalytics;

#[async_trait]
impl AnalyticsSource for NoAnalytics {
    fn is_enabled(&self) -> bool {
        false
    }

    async fn most_added(&self, _limit: i64) -> Result<Vec<MostAddedProduct>, DbError> {
        Ok(Vec::new())
    }
}
