use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::AppState;
use crate::adapter::handler::error::AppError;
use crate::adapter::presenter::response::ApiResponse;
use crate::domain::entity::job::Job;
use crate::usecase::create_job::CreateJobInput;
use crate::usecase::update_job::UpdateJobInput;

/// POST /api/v1/jobs
pub async fn create_job(
    State(state): State<AppState>,
    Json(input): Json<CreateJobInput>,
) -> Result<(StatusCode, Json<ApiResponse<Job>>), AppError> {
    let job = state.create_job_uc.execute(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Job created successfully", job)),
    ))
}

/// GET /api/v1/jobs
pub async fn list_jobs(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Job>>>, AppError> {
    let jobs = state.list_jobs_uc.execute().await?;
    Ok(Json(ApiResponse::new(jobs)))
}

/// GET /api/v1/jobs/{id}
pub async fn get_job_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Job>>, AppError> {
    let job = state.get_job_uc.by_id(id).await?;
    Ok(Json(ApiResponse::new(job)))
}

/// GET /api/v1/jobs/code/{code}
pub async fn get_job_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<Job>>, AppError> {
    let job = state.get_job_uc.by_code(&code).await?;
    Ok(Json(ApiResponse::new(job)))
}

/// PUT /api/v1/jobs/code/{code}
pub async fn update_job(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(input): Json<UpdateJobInput>,
) -> Result<Json<ApiResponse<Job>>, AppError> {
    let job = state.update_job_uc.execute(&code, input).await?;
    Ok(Json(ApiResponse::with_message("Job updated successfully", job)))
}
