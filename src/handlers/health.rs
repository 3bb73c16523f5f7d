use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use sea_orm::{ConnectionTrait, Statement};
use serde_json::json;

use crate::AppState;

/// Liveness probe; only confirms the process is up.
async fn liveness_check() -> impl IntoResponse {
    Json(json!({
        "status": "up",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Readiness probe; verifies the database answers a trivial query.
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let backend = state.db.get_database_backend();
    let probe = state
        .db
        .execute(Statement::from_string(backend, "SELECT 1".to_string()))
        .await;

    match probe {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "ready", "database": "up" })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "not_ready", "database": e.to_string() })),
        ),
    }
}

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(liveness_check))
        .route("/ready", get(readiness_check))
}
