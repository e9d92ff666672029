//! Analytics routes

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use inventory_db::MostAddedProduct;

use crate::error::ApiError;
use crate::state::AppState;

use super::types::MostAddedQuery;

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

/// GET /products/analytics/most-added
async fn most_added(
    State(state): State<AppState>,
    query: Result<Query<MostAddedQuery>, QueryRejection>,
) -> Result<Json<Vec<MostAddedProduct>>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    if !state.analytics.is_enabled() {
        return Err(ApiError::ServiceUnavailable(
            "Analytics source is not configured".to_string(),
        ));
    }

    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let ranking = state.analytics.most_added(limit).await?;

    Ok(Json(ranking))
}

/// Create analytics routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/products/analytics/most-added", get(most_added))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use inventory_db::SqlViewAnalytics;
    use serde_json::json;
    use std::sync::Arc;

    use crate::routes::create_router;
    use crate::routes::test_support::{send, test_app, test_state};

    #[tokio::test]
    async fn test_unconfigured_source_is_unavailable() {
        let app = test_app().await;
        let (status, body) = send(&app, "GET", "/products/analytics/most-added", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_ranking_from_view() {
        let mut state = test_state().await;
        run_sql(&state.db, "CREATE TABLE ranking (id INTEGER, name TEXT, times_added INTEGER)").await;
        run_sql(&state.db, "INSERT INTO ranking VALUES (1, 'Widget', 4), (2, 'Gadget', 7), (3, 'Gizmo', 1)").await;
        state.analytics = Arc::new(SqlViewAnalytics::new(state.db.clone(), "ranking").unwrap());
        let app = create_router(state, None);

        let (status, body) = send(&app, "GET", "/products/analytics/most-added?limit=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                { "id": 2, "name": "Gadget", "times_added": 7 },
                { "id": 1, "name": "Widget", "times_added": 4 }
            ])
        );

        // Out-of-range limits are clamped rather than rejected
        let (status, body) = send(&app, "GET", "/products/analytics/most-added?limit=0", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, body) = send(&app, "GET", "/products/analytics/most-added?limit=x", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    async fn run_sql(db: &inventory_db::Database, sql: &str) {
        inventory_db::apply_schema(db, sql).await.unwrap();
    }
}
