use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use crate::domain::entity::import_result::{ImportResult, RowFailure};
use crate::domain::repository::QuestionRepository;
use crate::domain::service::QuestionCsvImporter;

/// CsvUploadSummary は CSV アップロードの処理結果。
/// `successfully_parsed` は検証を通過した件数、`successfully_inserted` は実際に永続化された件数。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CsvUploadSummary {
    pub total_processed: usize,
    pub successfully_parsed: usize,
    pub successfully_inserted: usize,
    pub failed: usize,
    /// 検証は通過したが登録されなかった件数
    pub not_inserted: usize,
    pub errors: Vec<RowFailure>,
    pub message: String,
}

impl CsvUploadSummary {
    /// ファイル単位の事前検証で中断した場合の結果を生成する。
    fn aborted(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn has_inserted(&self) -> bool {
        self.successfully_inserted > 0
    }
}

/// ImportQuestionsUseCase は CSV の取り込みと問題の一括登録を行うユースケース。
pub struct ImportQuestionsUseCase {
    importer: Arc<QuestionCsvImporter>,
    question_repo: Arc<dyn QuestionRepository>,
}

impl ImportQuestionsUseCase {
    pub fn new(importer: Arc<QuestionCsvImporter>, question_repo: Arc<dyn QuestionRepository>) -> Self {
        Self {
            importer,
            question_repo,
        }
    }

    /// 取り込み結果は常に集計として返す。失敗の有無は集計内容で判断する。
    pub async fn execute(&self, file_name: &str, data: &[u8]) -> CsvUploadSummary {
        let result = match self.importer.import(file_name, data).await {
            Ok(result) => result,
            Err(e) => {
                info!(file_name, error = %e, "csv import rejected");
                return CsvUploadSummary::aborted(e.to_string());
            }
        };

        let parsed = result.successful_count();
        let (inserted, save_failed) = if parsed == 0 {
            (0, false)
        } else {
            match self.question_repo.save_all(&result.questions).await {
                Ok(saved) => (saved.len(), false),
                Err(e) => {
                    error!(file_name, error = %e, parsed, "failed to save imported questions");
                    (0, true)
                }
            }
        };

        let summary = build_summary(result, inserted, save_failed);
        info!(
            file_name,
            processed = summary.total_processed,
            parsed = summary.successfully_parsed,
            inserted = summary.successfully_inserted,
            failed = summary.failed,
            "csv import completed"
        );
        summary
    }
}

fn build_summary(result: ImportResult, inserted: usize, save_failed: bool) -> CsvUploadSummary {
    let parsed = result.successful_count();
    let failed = result.failed_count();

    let mut message = format!(
        "Processing completed. {inserted} successful, {failed} failed out of {} total records.",
        result.total_processed
    );
    if result.has_errors() {
        message.push_str(" Errors:");
        message.extend(result.errors.iter().map(|f| format!(" {f}.")));
    }
    if save_failed {
        message.push_str(" Failed to save parsed questions.");
    }

    CsvUploadSummary {
        total_processed: result.total_processed,
        successfully_parsed: parsed,
        successfully_inserted: inserted,
        failed,
        not_inserted: parsed.saturating_sub(inserted),
        errors: result.errors,
        message,
    }
}
