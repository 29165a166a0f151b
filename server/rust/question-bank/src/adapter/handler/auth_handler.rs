use axum::{extract::State, http::StatusCode, Json};

use super::AppState;
use crate::adapter::handler::error::AppError;
use crate::adapter::presenter::response::AuthResponse;
use crate::usecase::signin::SigninInput;
use crate::usecase::signup::SignupInput;

/// POST /api/v1/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupInput>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let out = state.signup_uc.execute(input).await?;
    Ok((StatusCode::CREATED, Json(out.into())))
}

/// POST /api/v1/auth/signin
pub async fn signin(
    State(state): State<AppState>,
    Json(input): Json<SigninInput>,
) -> Result<Json<AuthResponse>, AppError> {
    let out = state.signin_uc.execute(input).await?;
    Ok(Json(out.into()))
}
