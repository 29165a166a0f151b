use std::sync::Arc;

use crate::domain::entity::job::Job;
use crate::domain::repository::JobRepository;

/// ListJobsError は職種一覧取得に関するエラー。
#[derive(Debug, thiserror::Error)]
pub enum ListJobsError {
    #[error("internal error: {0}")]
    Internal(String),
}

/// ListJobsUseCase は職種一覧取得ユースケース。
pub struct ListJobsUseCase {
    job_repo: Arc<dyn JobRepository>,
}

impl ListJobsUseCase {
    pub fn new(job_repo: Arc<dyn JobRepository>) -> Self {
        Self { job_repo }
    }

    pub async fn execute(&self) -> Result<Vec<Job>, ListJobsError> {
        self.job_repo
            .find_all()
            .await
            .map_err(|e| ListJobsError::Internal(e.to_string()))
    }
}
