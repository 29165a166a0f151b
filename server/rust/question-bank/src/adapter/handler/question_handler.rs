use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};

use super::AppState;
use crate::adapter::handler::error::AppError;
use crate::adapter::presenter::response::{ApiResponse, CountResponse};
use crate::domain::entity::question::Question;
use crate::usecase::import_questions::CsvUploadSummary;

/// マルチパートでファイルを受け取るフィールド名。
const FILE_FIELD: &str = "file";

/// GET /api/v1/questions/job/{job_id}
pub async fn list_by_job(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<Question>>>, AppError> {
    let questions = state.list_questions_uc.by_job(job_id).await?;
    Ok(Json(ApiResponse::new(questions)))
}

/// GET /api/v1/questions/job/{job_id}/count
pub async fn count_by_job(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
) -> Result<Json<ApiResponse<CountResponse>>, AppError> {
    let count = state.list_questions_uc.count_by_job(job_id).await?;
    Ok(Json(ApiResponse::new(CountResponse { job_id, count })))
}

/// POST /api/v1/questions/upload-csv
///
/// 1 件以上登録できた場合は 200、それ以外は 400 で集計結果を `error.details` に含める。
pub async fn upload_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CsvUploadSummary>, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(multipart_error)?;
        upload = Some((file_name, data.to_vec()));
        break;
    }

    let Some((file_name, data)) = upload.filter(|(_, data)| !data.is_empty()) else {
        return Err(AppError::bad_request(
            "QB_IMPORT_FILE_REQUIRED",
            "Please select a file to upload",
        ));
    };

    let summary = state.import_questions_uc.execute(&file_name, &data).await;
    record_import_metrics(&state, &summary);

    if summary.has_inserted() {
        return Ok(Json(summary));
    }

    let details = serde_json::to_value(&summary)
        .map_err(|e| AppError::internal("QB_INTERNAL_ERROR", &e.to_string()))?;
    Err(
        AppError::bad_request("QB_IMPORT_NO_RECORDS_INSERTED", &summary.message)
            .with_details(details),
    )
}

fn record_import_metrics(state: &AppState, summary: &CsvUploadSummary) {
    let m = &state.metrics;
    m.record_import_rows("parsed", summary.successfully_parsed);
    m.record_import_rows("failed", summary.failed);
    m.record_import_rows("inserted", summary.successfully_inserted);
    m.record_import_rows("not_inserted", summary.not_inserted);
}

fn multipart_error(err: MultipartError) -> AppError {
    let status = err.status();
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::new(
            status,
            "QB_IMPORT_FILE_TOO_LARGE",
            "Uploaded file exceeds the maximum allowed size",
        );
    }
    AppError::bad_request("QB_IMPORT_INVALID_MULTIPART", &err.body_text())
}
