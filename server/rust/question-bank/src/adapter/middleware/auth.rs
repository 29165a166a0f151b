use axum::{
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapter::handler::error::AppError;
use crate::adapter::handler::AppState;

/// Authorization ヘッダーから Bearer トークンを取り出すヘルパー。
/// ヘッダーがない・形式が違う・トークンが空の場合は None を返す。
pub fn extract_bearer_token<B>(req: &Request<B>) -> Option<String> {
    let auth_header = req.headers().get(axum::http::header::AUTHORIZATION)?;
    let auth_str = auth_header.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?;
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// auth_middleware は Bearer トークンを検証し、Request extension に TokenClaims を格納する。
/// トークンが存在しないか無効な場合は 401 Unauthorized を返す。
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer_token(&req) else {
        return AppError::unauthorized(
            "QB_AUTH_MISSING_TOKEN",
            "Authorization header with Bearer token is required",
        )
        .into_response();
    };

    match state.token_issuer.verify(&token) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "bearer token rejected");
            AppError::unauthorized("QB_AUTH_TOKEN_INVALID", "Token validation failed")
                .into_response()
        }
    }
}
