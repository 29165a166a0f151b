use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Job は職種（問題の紐付け先）を表すドメインエンティティ。
/// `code` は外部公開用の識別子で、内部 ID とは独立して一意である。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// NewJob は職種作成時の入力値。
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub name: String,
    pub code: String,
}
