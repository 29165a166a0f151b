use std::sync::Arc;

use serde::Deserialize;
use validator::Validate;

use crate::domain::entity::job::Job;
use crate::domain::repository::JobRepository;
use crate::usecase::describe_validation_errors;

/// UpdateJobError は職種更新に関するエラー。
#[derive(Debug, thiserror::Error)]
pub enum UpdateJobError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("Job with code '{0}' does not exist")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// UpdateJobInput は職種更新リクエスト。職種コードは変更できない。
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateJobInput {
    #[serde(default)]
    #[validate(length(
        min = 2,
        max = 255,
        message = "Job name must be between 2 and 255 characters"
    ))]
    pub name: Option<String>,
}

impl UpdateJobInput {
    pub fn has_updates(&self) -> bool {
        self.name.is_some()
    }
}

/// UpdateJobUseCase は職種コード指定で職種を更新するユースケース。
pub struct UpdateJobUseCase {
    job_repo: Arc<dyn JobRepository>,
}

impl UpdateJobUseCase {
    pub fn new(job_repo: Arc<dyn JobRepository>) -> Self {
        Self { job_repo }
    }

    pub async fn execute(&self, code: &str, input: UpdateJobInput) -> Result<Job, UpdateJobError> {
        if !input.has_updates() {
            return Err(UpdateJobError::Validation("No updates provided".to_string()));
        }
        input
            .validate()
            .map_err(|e| UpdateJobError::Validation(describe_validation_errors(&e)))?;

        let Some(name) = input.name else {
            return Err(UpdateJobError::Validation("No updates provided".to_string()));
        };

        self.job_repo
            .update_name(code, &name)
            .await
            .map_err(|e| UpdateJobError::Internal(e.to_string()))?
            .ok_or_else(|| UpdateJobError::NotFound(code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::job_repository::MockJobRepository;
    use chrono::Utc;

    #[tokio::test]
    async fn test_update_job_success() {
        let mut mock = MockJobRepository::new();
        mock.expect_update_name()
            .withf(|code, name| code == "QA" && name == "Quality Assurance")
            .returning(|code, name| {
                Ok(Some(Job {
                    id: 3,
                    name: name.to_string(),
                    code: code.to_string(),
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                }))
            });

        let uc = UpdateJobUseCase::new(Arc::new(mock));
        let job = uc
            .execute(
                "QA",
                UpdateJobInput {
                    name: Some("Quality Assurance".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(job.name, "Quality Assurance");
    }

    #[tokio::test]
    async fn test_update_job_no_updates() {
        let mut mock = MockJobRepository::new();
        mock.expect_update_name().never();

        let uc = UpdateJobUseCase::new(Arc::new(mock));
        match uc.execute("QA", UpdateJobInput::default()).await.unwrap_err() {
            UpdateJobError::Validation(msg) => assert_eq!(msg, "No updates provided"),
            e => unreachable!("unexpected error in test: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_update_job_not_found() {
        let mut mock = MockJobRepository::new();
        mock.expect_update_name().returning(|_, _| Ok(None));

        let uc = UpdateJobUseCase::new(Arc::new(mock));
        let err = uc
            .execute(
                "GONE",
                UpdateJobInput {
                    name: Some("Anything".to_string()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, UpdateJobError::NotFound(code) if code == "GONE"));
    }
}
