use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// McqOption は多肢選択問題の選択肢 1 つを表す。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct McqOption {
    pub value: String,
    pub correct: bool,
}

impl McqOption {
    pub fn new(value: impl Into<String>, correct: bool) -> Self {
        Self {
            value: value.into(),
            correct,
        }
    }
}

/// NewQuestion は検証済みで永続化前の問題を表す。
/// CSV 取り込みで全フィールドの検証を通過した行からのみ生成される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question_text: String,
    pub difficulty: i32,
    pub job_id: i64,
    pub mcqs: Vec<McqOption>,
}

/// Question は永続化済みの問題を表すドメインエンティティ。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub id: i64,
    pub question_text: String,
    pub difficulty: i32,
    pub job_id: i64,
    pub mcqs: Vec<McqOption>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mcq_option_json_shape() {
        let json = serde_json::to_value(McqOption::new("A", true)).unwrap();
        assert_eq!(json, serde_json::json!({"value": "A", "correct": true}));
    }
}
