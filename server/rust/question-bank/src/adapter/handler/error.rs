use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapter::presenter::response::{ErrorDetail, ErrorResponse};
use crate::usecase::create_job::CreateJobError;
use crate::usecase::get_job::GetJobError;
use crate::usecase::list_jobs::ListJobsError;
use crate::usecase::list_questions::ListQuestionsError;
use crate::usecase::signin::SigninError;
use crate::usecase::signup::SignupError;
use crate::usecase::update_job::UpdateJobError;

/// AppError は HTTP エラーレスポンスに変換されるハンドラー共通のエラー。
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl AppError {
    pub fn new(status: StatusCode, code: &str, message: &str) -> Self {
        Self {
            status,
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    pub fn not_found(code: &str, message: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message)
    }

    pub fn bad_request(code: &str, message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn conflict(code: &str, message: &str) -> Self {
        Self::new(StatusCode::CONFLICT, code, message)
    }

    pub fn unauthorized(code: &str, message: &str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, code, message)
    }

    pub fn internal(code: &str, message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, code, message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = %self.code, message = %self.message, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
                request_id: uuid::Uuid::new_v4().to_string(),
                details: self.details,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

const INTERNAL_ERROR: &str = "QB_INTERNAL_ERROR";
const INTERNAL_MESSAGE: &str = "An unexpected error occurred";

fn internal(detail: &str) -> AppError {
    tracing::error!(error = %detail, "internal error");
    AppError::internal(INTERNAL_ERROR, INTERNAL_MESSAGE)
}

impl From<CreateJobError> for AppError {
    fn from(err: CreateJobError) -> Self {
        match err {
            CreateJobError::Validation(msg) => Self::bad_request("QB_JOB_VALIDATION_FAILED", &msg),
            CreateJobError::Conflict(msg) => Self::conflict("QB_JOB_ALREADY_EXISTS", &msg),
            CreateJobError::Internal(msg) => internal(&msg),
        }
    }
}

impl From<GetJobError> for AppError {
    fn from(err: GetJobError) -> Self {
        match err {
            GetJobError::NotFound(key) => {
                Self::not_found("QB_JOB_NOT_FOUND", &format!("Job not found: {key}"))
            }
            GetJobError::Internal(msg) => internal(&msg),
        }
    }
}

impl From<ListJobsError> for AppError {
    fn from(err: ListJobsError) -> Self {
        match err {
            ListJobsError::Internal(msg) => internal(&msg),
        }
    }
}

impl From<UpdateJobError> for AppError {
    fn from(err: UpdateJobError) -> Self {
        match err {
            UpdateJobError::Validation(msg) => Self::bad_request("QB_JOB_VALIDATION_FAILED", &msg),
            e @ UpdateJobError::NotFound(_) => Self::not_found("QB_JOB_NOT_FOUND", &e.to_string()),
            UpdateJobError::Internal(msg) => internal(&msg),
        }
    }
}

impl From<ListQuestionsError> for AppError {
    fn from(err: ListQuestionsError) -> Self {
        match err {
            ListQuestionsError::Internal(msg) => internal(&msg),
        }
    }
}

impl From<SignupError> for AppError {
    fn from(err: SignupError) -> Self {
        match err {
            SignupError::Validation(msg) => Self::bad_request("QB_AUTH_VALIDATION_FAILED", &msg),
            SignupError::Conflict(msg) => Self::conflict("QB_AUTH_ALREADY_EXISTS", &msg),
            SignupError::Internal(msg) => internal(&msg),
        }
    }
}

impl From<SigninError> for AppError {
    fn from(err: SigninError) -> Self {
        match err {
            SigninError::Validation(msg) => Self::bad_request("QB_AUTH_VALIDATION_FAILED", &msg),
            e @ SigninError::InvalidCredentials => {
                Self::unauthorized("QB_AUTH_INVALID_CREDENTIALS", &e.to_string())
            }
            SigninError::Internal(msg) => internal(&msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn response_to_json(resp: Response) -> (StatusCode, serde_json::Value) {
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn test_get_job_not_found_response() {
        let resp = AppError::from(GetJobError::NotFound("QA".to_string())).into_response();
        let (status, json) = response_to_json(resp).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "QB_JOB_NOT_FOUND");
        assert!(!json["error"]["request_id"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_job_conflict_response() {
        let err = CreateJobError::Conflict("Job with code 'QA' already exists".to_string());
        let (status, json) = response_to_json(AppError::from(err).into_response()).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["error"]["code"], "QB_JOB_ALREADY_EXISTS");
        assert_eq!(json["error"]["message"], "Job with code 'QA' already exists");
    }

    #[tokio::test]
    async fn test_update_job_not_found_message() {
        let err = UpdateJobError::NotFound("GONE".to_string());
        let (status, json) = response_to_json(AppError::from(err).into_response()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["message"], "Job with code 'GONE' does not exist");
    }

    #[tokio::test]
    async fn test_signin_invalid_credentials_response() {
        let resp = AppError::from(SigninError::InvalidCredentials).into_response();
        let (status, json) = response_to_json(resp).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"]["code"], "QB_AUTH_INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let err = ListJobsError::Internal("password authentication failed for user app".to_string());
        let (status, json) = response_to_json(AppError::from(err).into_response()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"]["code"], "QB_INTERNAL_ERROR");
        assert!(!json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("password"));
    }

    #[tokio::test]
    async fn test_details_are_serialized() {
        let resp = AppError::bad_request("QB_IMPORT_NO_RECORDS_INSERTED", "nothing")
            .with_details(serde_json::json!({"failed": 2}))
            .into_response();
        let (_, json) = response_to_json(resp).await;
        assert_eq!(json["error"]["details"]["failed"], 2);
    }
}
