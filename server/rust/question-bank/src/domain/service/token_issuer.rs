use serde::{Deserialize, Serialize};

/// TokenClaims はアクセストークンに含めるクレーム。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// ユーザー名
    pub sub: String,
    /// ユーザー ID
    pub uid: i64,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

/// IssuedToken は発行済みトークンと有効期間（秒）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: u64,
}

/// TokenIssuer はアクセストークンの発行と検証を抽象化する。
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user_id: i64, username: &str) -> anyhow::Result<IssuedToken>;

    fn verify(&self, token: &str) -> anyhow::Result<TokenClaims>;
}
