use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use crate::adapter::handler::AppState;

/// track_http_metrics は HTTP リクエスト数とレイテンシを記録する。
/// パスラベルにはルート定義（例: `/api/v1/jobs/{id}`）を使い、カーディナリティを抑える。
pub async fn track_http_metrics(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().to_string();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |p| p.as_str().to_string());
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    state.metrics.record_http_request(&method, &path, &status);
    state
        .metrics
        .record_http_duration(&method, &path, start.elapsed().as_secs_f64());
    response
}
