use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Deserialize;
use validator::Validate;

use crate::domain::entity::job::{Job, NewJob};
use crate::domain::repository::JobRepository;
use crate::usecase::describe_validation_errors;

/// 職種コードに使用できる文字（英大文字・数字・アンダースコア・ハイフン）。
static JOB_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9_-]+$").expect("valid job code pattern"));

/// CreateJobError は職種作成に関するエラー。
#[derive(Debug, thiserror::Error)]
pub enum CreateJobError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// CreateJobInput は職種作成リクエスト。
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJobInput {
    #[validate(length(
        min = 2,
        max = 255,
        message = "Job name must be between 2 and 255 characters"
    ))]
    pub name: String,

    #[validate(
        length(min = 2, max = 50, message = "Job code must be between 2 and 50 characters"),
        regex(
            path = *JOB_CODE_PATTERN,
            message = "Job code must contain only uppercase letters, numbers, underscores, and hyphens"
        )
    )]
    pub code: String,
}

/// CreateJobUseCase は職種作成ユースケース。
pub struct CreateJobUseCase {
    job_repo: Arc<dyn JobRepository>,
}

impl CreateJobUseCase {
    pub fn new(job_repo: Arc<dyn JobRepository>) -> Self {
        Self { job_repo }
    }

    pub async fn execute(&self, input: CreateJobInput) -> Result<Job, CreateJobError> {
        input
            .validate()
            .map_err(|e| CreateJobError::Validation(describe_validation_errors(&e)))?;

        let exists = self
            .job_repo
            .exists_by_code(&input.code)
            .await
            .map_err(|e| CreateJobError::Internal(e.to_string()))?;
        if exists {
            return Err(CreateJobError::Conflict(format!(
                "Job with code '{}' already exists",
                input.code
            )));
        }

        let job = self
            .job_repo
            .create(&NewJob {
                name: input.name,
                code: input.code,
            })
            .await
            .map_err(|e| CreateJobError::Internal(e.to_string()))?;

        tracing::info!(job_id = job.id, code = %job.code, "job created");
        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::job_repository::MockJobRepository;
    use chrono::Utc;

    fn input(name: &str, code: &str) -> CreateJobInput {
        CreateJobInput {
            name: name.to_string(),
            code: code.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_job_success() {
        let mut mock = MockJobRepository::new();
        mock.expect_exists_by_code().returning(|_| Ok(false));
        mock.expect_create().returning(|new_job| {
            Ok(Job {
                id: 42,
                name: new_job.name.clone(),
                code: new_job.code.clone(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        });

        let uc = CreateJobUseCase::new(Arc::new(mock));
        let job = uc.execute(input("Data Analyst", "DATA_01")).await.unwrap();
        assert_eq!(job.id, 42);
        assert_eq!(job.code, "DATA_01");
    }

    #[tokio::test]
    async fn test_create_job_duplicate_code() {
        let mut mock = MockJobRepository::new();
        mock.expect_exists_by_code()
            .withf(|code| code == "DATA_01")
            .returning(|_| Ok(true));
        mock.expect_create().never();

        let uc = CreateJobUseCase::new(Arc::new(mock));
        match uc.execute(input("Data Analyst", "DATA_01")).await.unwrap_err() {
            CreateJobError::Conflict(msg) => {
                assert_eq!(msg, "Job with code 'DATA_01' already exists");
            }
            e => unreachable!("unexpected error in test: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_create_job_rejects_lowercase_code() {
        let uc = CreateJobUseCase::new(Arc::new(MockJobRepository::new()));
        match uc.execute(input("Data Analyst", "data-01")).await.unwrap_err() {
            CreateJobError::Validation(msg) => assert!(msg.contains("uppercase")),
            e => unreachable!("unexpected error in test: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_create_job_rejects_short_name() {
        let uc = CreateJobUseCase::new(Arc::new(MockJobRepository::new()));
        match uc.execute(input("A", "AB")).await.unwrap_err() {
            CreateJobError::Validation(msg) => assert!(msg.contains("Job name")),
            e => unreachable!("unexpected error in test: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_create_job_repository_error() {
        let mut mock = MockJobRepository::new();
        mock.expect_exists_by_code()
            .returning(|_| Err(anyhow::anyhow!("connection refused")));

        let uc = CreateJobUseCase::new(Arc::new(mock));
        assert!(matches!(
            uc.execute(input("Data Analyst", "DATA_01")).await.unwrap_err(),
            CreateJobError::Internal(_)
        ));
    }
}
