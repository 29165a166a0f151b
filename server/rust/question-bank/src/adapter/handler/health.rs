use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use super::AppState;

/// GET /healthz
pub async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// GET /readyz
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let (db_ok, db_status) = match state.db_pool {
        Some(ref pool) => match sqlx::query("SELECT 1").execute(pool).await {
            Ok(_) => (true, "ok"),
            Err(e) => {
                tracing::warn!(error = %e, "readiness check: database unreachable");
                (false, "error")
            }
        },
        None => (true, "not_configured"),
    };

    let (code, status) = if db_ok {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    };

    (
        code,
        Json(serde_json::json!({
            "status": status,
            "checks": {
                "database": db_status
            }
        })),
    )
}

/// GET /metrics
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = state.metrics.gather_metrics();
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
}
