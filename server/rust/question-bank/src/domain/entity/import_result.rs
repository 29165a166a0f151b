use serde::Serialize;

use super::question::NewQuestion;

/// RowError は CSV の 1 行を問題に変換できなかった理由を表す。
/// 行単位のエラーは取り込み全体を中断せず、`ImportResult` に蓄積される。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("Invalid format, expected at least {expected} columns")]
    Malformed { expected: usize },

    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    #[error("Invalid number format in CSV record")]
    NumberFormat,

    #[error("Difficulty must be between {min} and {max}")]
    Range { min: i32, max: i32 },

    #[error("Job with code '{0}' does not exist")]
    UnknownReference(String),

    #[error("At least {min} MCQ options are required")]
    InsufficientOptions { min: usize },

    #[error("At least one MCQ option must be marked as correct")]
    NoCorrectOption,

    #[error("Unexpected error: {0}")]
    Lookup(String),
}

/// RowFailure は失敗した行の位置（元ファイル基準の 1 始まり）とエラー内容。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    pub row: usize,
    #[serde(skip)]
    pub error: RowError,
    pub message: String,
}

impl RowFailure {
    pub fn new(row: usize, error: RowError) -> Self {
        let message = error.to_string();
        Self {
            row,
            error,
            message,
        }
    }
}

impl std::fmt::Display for RowFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {}: {}", self.row, self.message)
    }
}

/// ImportResult は 1 回の CSV 取り込みの集計結果。
/// 取り込み呼び出しごとに新規に生成され、呼び出しをまたいで共有されない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResult {
    /// 検証を通過した問題（元ファイルの行順）
    pub questions: Vec<NewQuestion>,
    /// 失敗した行（元ファイルの行順）
    pub errors: Vec<RowFailure>,
    /// ヘッダーを除いて処理を試みた行数
    pub total_processed: usize,
}

impl ImportResult {
    pub fn successful_count(&self) -> usize {
        self.questions.len()
    }

    pub fn failed_count(&self) -> usize {
        self.errors.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_failure_display() {
        let failure = RowFailure::new(3, RowError::UnknownReference("XX".to_string()));
        assert_eq!(failure.to_string(), "Row 3: Job with code 'XX' does not exist");
        assert_eq!(failure.message, "Job with code 'XX' does not exist");
    }

    #[test]
    fn test_row_error_messages() {
        assert_eq!(
            RowError::Malformed { expected: 11 }.to_string(),
            "Invalid format, expected at least 11 columns"
        );
        assert_eq!(
            RowError::EmptyField {
                field: "Question text"
            }
            .to_string(),
            "Question text cannot be empty"
        );
        assert_eq!(
            RowError::Range { min: 1, max: 10 }.to_string(),
            "Difficulty must be between 1 and 10"
        );
    }

    #[test]
    fn test_counts() {
        let result = ImportResult {
            questions: vec![],
            errors: vec![RowFailure::new(2, RowError::NumberFormat)],
            total_processed: 1,
        };
        assert_eq!(result.successful_count(), 0);
        assert_eq!(result.failed_count(), 1);
        assert!(result.has_errors());
    }
}
