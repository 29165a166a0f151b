use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User はサインアップ済みのユーザーを表すドメインエンティティ。
/// `password_hash` は Argon2id の PHC 文字列で、平文パスワードは保持しない。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// NewUser はユーザー作成時の入力値。
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
