use async_trait::async_trait;

use crate::domain::entity::job::{Job, NewJob};

/// JobRepository は職種の永続化を担うリポジトリトレイト。
/// CSV 取り込みでは `find_by_code` が職種コード解決の参照先になる。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn find_all(&self) -> anyhow::Result<Vec<Job>>;

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Job>>;

    async fn find_by_code(&self, code: &str) -> anyhow::Result<Option<Job>>;

    async fn exists_by_code(&self, code: &str) -> anyhow::Result<bool>;

    async fn create(&self, job: &NewJob) -> anyhow::Result<Job>;

    /// 職種名を更新する。該当する職種がなければ `None` を返す。
    async fn update_name(&self, code: &str, name: &str) -> anyhow::Result<Option<Job>>;
}
