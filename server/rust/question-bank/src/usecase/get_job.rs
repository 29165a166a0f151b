use std::sync::Arc;

use crate::domain::entity::job::Job;
use crate::domain::repository::JobRepository;

/// GetJobError は職種取得に関するエラー。
#[derive(Debug, thiserror::Error)]
pub enum GetJobError {
    #[error("job not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// GetJobUseCase は職種を職種コードまたは ID で取得するユースケース。
pub struct GetJobUseCase {
    job_repo: Arc<dyn JobRepository>,
}

impl GetJobUseCase {
    pub fn new(job_repo: Arc<dyn JobRepository>) -> Self {
        Self { job_repo }
    }

    pub async fn by_code(&self, code: &str) -> Result<Job, GetJobError> {
        self.job_repo
            .find_by_code(code)
            .await
            .map_err(|e| GetJobError::Internal(e.to_string()))?
            .ok_or_else(|| GetJobError::NotFound(code.to_string()))
    }

    pub async fn by_id(&self, id: i64) -> Result<Job, GetJobError> {
        self.job_repo
            .find_by_id(id)
            .await
            .map_err(|e| GetJobError::Internal(e.to_string()))?
            .ok_or_else(|| GetJobError::NotFound(id.to_string()))
    }
}
