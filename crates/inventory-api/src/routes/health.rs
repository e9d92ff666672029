//! Health check endpoints

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

/// Health status response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<i64>,
}

/// Health check handler
///
/// Reports unhealthy when the product table cannot be queried.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    metrics::counter!("inventory_health_checks_total").increment(1);

    let version = env!("CARGO_PKG_VERSION").to_string();
    match state.db.count_products().await {
        Ok(count) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                version,
                products: Some(count),
            }),
        ),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    version,
                    products: None,
                }),
            )
        }
    }
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use inventory_db::{Database, NoAnalytics};
    use std::sync::Arc;

    use crate::routes::create_router;
    use crate::routes::test_support::{send, test_app};
    use crate::state::AppState;

    #[tokio::test]
    async fn test_healthy() {
        let app = test_app().await;
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["products"], 0);
    }

    #[tokio::test]
    async fn test_unhealthy_without_schema() {
        let db = Database::connect("sqlite::memory:", 1).await.unwrap();
        let app = create_router(AppState::new(db, Arc::new(NoAnalytics)), None);

        let (status, body) = send(&app, "GET", "/healthz", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "unhealthy");
    }
}
