use async_trait::async_trait;

use crate::domain::entity::question::{NewQuestion, Question};

/// QuestionRepository は問題の永続化を担うリポジトリトレイト。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// 問題を一括登録し、実際に登録された問題を返す。
    /// 返却件数は永続化層の制約により入力件数より少ない場合がある。
    async fn save_all(&self, questions: &[NewQuestion]) -> anyhow::Result<Vec<Question>>;

    async fn find_by_job_id(&self, job_id: i64) -> anyhow::Result<Vec<Question>>;

    async fn count_by_job_id(&self, job_id: i64) -> anyhow::Result<i64>;
}
