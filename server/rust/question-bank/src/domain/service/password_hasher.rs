/// PasswordHasher はパスワードのハッシュ化と照合を抽象化する。
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> anyhow::Result<String>;

    /// 平文パスワードがハッシュと一致すれば `true` を返す。
    fn verify(&self, password: &str, hash: &str) -> anyhow::Result<bool>;
}
