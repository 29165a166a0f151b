use async_trait::async_trait;

use crate::domain::entity::user::{NewUser, User};

/// UserRepository はユーザーの永続化を担うリポジトリトレイト。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;

    async fn exists_by_username(&self, username: &str) -> anyhow::Result<bool>;

    async fn exists_by_email(&self, email: &str) -> anyhow::Result<bool>;

    async fn create(&self, user: &NewUser) -> anyhow::Result<User>;
}
