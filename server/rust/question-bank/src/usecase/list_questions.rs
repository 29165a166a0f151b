use std::sync::Arc;

use crate::domain::entity::question::Question;
use crate::domain::repository::QuestionRepository;

/// ListQuestionsError は問題一覧取得に関するエラー。
#[derive(Debug, thiserror::Error)]
pub enum ListQuestionsError {
    #[error("internal error: {0}")]
    Internal(String),
}

/// ListQuestionsUseCase は職種ごとの問題一覧・件数を取得するユースケース。
pub struct ListQuestionsUseCase {
    question_repo: Arc<dyn QuestionRepository>,
}

impl ListQuestionsUseCase {
    pub fn new(question_repo: Arc<dyn QuestionRepository>) -> Self {
        Self { question_repo }
    }

    pub async fn by_job(&self, job_id: i64) -> Result<Vec<Question>, ListQuestionsError> {
        self.question_repo
            .find_by_job_id(job_id)
            .await
            .map_err(|e| ListQuestionsError::Internal(e.to_string()))
    }

    pub async fn count_by_job(&self, job_id: i64) -> Result<i64, ListQuestionsError> {
        self.question_repo
            .count_by_job_id(job_id)
            .await
            .map_err(|e| ListQuestionsError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::question::McqOption;
    use crate::domain::repository::question_repository::MockQuestionRepository;
    use chrono::Utc;

    #[tokio::test]
    async fn test_by_job() {
        let mut mock = MockQuestionRepository::new();
        mock.expect_find_by_job_id()
            .withf(|job_id| *job_id == 5)
            .returning(|job_id| {
                Ok(vec![Question {
                    id: 1,
                    question_text: "Which keyword declares a constant?".to_string(),
                    difficulty: 2,
                    job_id,
                    mcqs: vec![McqOption::new("const", true), McqOption::new("let", false)],
                    created_at: Utc::now(),
                }])
            });

        let uc = ListQuestionsUseCase::new(Arc::new(mock));
        let questions = uc.by_job(5).await.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].job_id, 5);
    }

    #[tokio::test]
    async fn test_count_by_job() {
        let mut mock = MockQuestionRepository::new();
        mock.expect_count_by_job_id().returning(|_| Ok(12));

        let uc = ListQuestionsUseCase::new(Arc::new(mock));
        assert_eq!(uc.count_by_job(5).await.unwrap(), 12);
    }

    #[tokio::test]
    async fn test_count_by_job_internal_error() {
        let mut mock = MockQuestionRepository::new();
        mock.expect_count_by_job_id()
            .returning(|_| Err(anyhow::anyhow!("db down")));

        let uc = ListQuestionsUseCase::new(Arc::new(mock));
        assert!(matches!(
            uc.count_by_job(5).await.unwrap_err(),
            ListQuestionsError::Internal(_)
        ));
    }
}
