//! API routes

mod analytics;
mod health;
pub mod metrics;
mod products;
pub mod types;

use axum::Router;
use std::sync::Arc;

use crate::state::{AppState, MetricsHandle};

/// Create the main router
pub fn create_router(state: AppState, metrics_handle: Option<Arc<MetricsHandle>>) -> Router {
    let mut router = Router::new()
        // Health check
        .merge(health::routes())
        // Product CRUD
        .merge(products::routes())
        // Most-added ranking
        .merge(analytics::routes())
        .with_state(state);

    // Add metrics endpoint if handle is provided
    if let Some(handle) = metrics_handle {
        router = router.merge(metrics::routes(handle));
    }

    router
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use inventory_db::{DEFAULT_SCHEMA, Database, NoAnalytics, apply_schema};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::state::AppState;

    pub async fn test_state() -> AppState {
        let db = Database::connect("sqlite::memory:", 1).await.unwrap();
        apply_schema(&db, DEFAULT_SCHEMA).await.unwrap();
        AppState::new(db, Arc::new(NoAnalytics))
    }

    pub async fn test_app() -> Router {
        super::create_router(test_state().await, None)
    }

    /// Send a request and decode the JSON response body (Null when empty)
    pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }
}
