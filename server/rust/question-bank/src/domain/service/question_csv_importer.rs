use std::ops::RangeInclusive;
use std::sync::Arc;

use tracing::debug;

use crate::domain::entity::import_result::{ImportResult, RowError, RowFailure};
use crate::domain::entity::question::{McqOption, NewQuestion};
use crate::domain::repository::JobRepository;

/// 1 行に必要な最小列数（問題文・難易度・職種コード + 選択肢 4 組）。
pub const MIN_COLUMNS: usize = 11;
/// 選択肢の最大組数。列 `3 + 2k` がラベル、`4 + 2k` が正解フラグ。
pub const MAX_OPTIONS: usize = 4;
/// 有効な選択肢の最小数。
pub const MIN_OPTIONS: usize = 2;
/// 難易度の許容範囲（両端を含む）。
pub const DIFFICULTY_RANGE: RangeInclusive<i32> = 1..=10;

const OPTION_START_COLUMN: usize = 3;
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// ImportError はファイル単位の事前検証エラー。
/// これらが発生した場合は 1 行も処理されない。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("File is empty")]
    EmptyInput,

    #[error("Invalid file format. Please upload a CSV file")]
    InvalidFormat,

    #[error("CSV file contains no records")]
    NoRecords,

    #[error("Error reading CSV file: {0}")]
    Decode(String),
}

/// QuestionCsvImporter は CSV を検証済みの問題へ変換する。
///
/// 期待する列構成:
/// `question_text,difficulty,job_code,option1,option1_correct,...,option4,option4_correct`
///
/// 行の処理は 1 行ずつ順番に行い、職種コードは行ごとに `JobRepository` へ問い合わせる。
/// 取り込み中に作成された職種は、それ以降の行から参照できる。
pub struct QuestionCsvImporter {
    job_repo: Arc<dyn JobRepository>,
}

impl QuestionCsvImporter {
    pub fn new(job_repo: Arc<dyn JobRepository>) -> Self {
        Self { job_repo }
    }

    /// アップロードされた CSV を取り込む。
    /// 事前検証に失敗した場合のみ `Err` を返し、行単位の失敗は `ImportResult.errors` に蓄積する。
    pub async fn import(&self, file_name: &str, data: &[u8]) -> Result<ImportResult, ImportError> {
        validate_upload(file_name, data)?;

        let records = decode_records(data)?;
        let Some(first) = records.first() else {
            return Err(ImportError::NoRecords);
        };

        let start = usize::from(is_header_row(first));
        let mut result = ImportResult::default();

        for (idx, record) in records.iter().enumerate().skip(start) {
            result.total_processed += 1;
            // 行番号は元ファイル基準の 1 始まり
            let row = idx + 1;

            match self.parse_record(record).await {
                Ok(question) => result.questions.push(question),
                Err(e) => {
                    debug!(row, error = %e, "skipping invalid csv row");
                    result.errors.push(RowFailure::new(row, e));
                }
            }
        }

        Ok(result)
    }

    async fn parse_record(&self, record: &[String]) -> Result<NewQuestion, RowError> {
        if record.len() < MIN_COLUMNS {
            return Err(RowError::Malformed {
                expected: MIN_COLUMNS,
            });
        }

        let question_text = record[0].trim();
        if question_text.is_empty() {
            return Err(RowError::EmptyField {
                field: "Question text",
            });
        }

        let difficulty = parse_difficulty(&record[1])?;

        let job_code = record[2].trim();
        if job_code.is_empty() {
            return Err(RowError::EmptyField { field: "Job code" });
        }

        let job = self
            .job_repo
            .find_by_code(job_code)
            .await
            .map_err(|e| RowError::Lookup(e.to_string()))?
            .ok_or_else(|| RowError::UnknownReference(job_code.to_string()))?;

        let mcqs = parse_options(record)?;

        Ok(NewQuestion {
            question_text: question_text.to_string(),
            difficulty,
            job_id: job.id,
            mcqs,
        })
    }
}

fn validate_upload(file_name: &str, data: &[u8]) -> Result<(), ImportError> {
    if data.is_empty() {
        return Err(ImportError::EmptyInput);
    }
    if !file_name.to_lowercase().ends_with(".csv") {
        return Err(ImportError::InvalidFormat);
    }
    Ok(())
}

/// CSV を列の文字列に分解する。UTF-8 として不正なバイトは置換文字に変換する。
///
/// `csv` クレートは空行を読み飛ばすため、読み飛ばされた空行は 1 列の空レコードとして補う。
/// これにより行番号と処理件数は元ファイルの行と一致する。
fn decode_records(data: &[u8]) -> Result<Vec<Vec<String>>, ImportError> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut records = Vec::new();
    let mut record = csv::ByteRecord::new();
    loop {
        let more = reader
            .read_byte_record(&mut record)
            .map_err(|e| ImportError::Decode(e.to_string()))?;

        // レコードの位置は空行を読み飛ばす前の位置を指す
        let start = record
            .position()
            .and_then(|p| usize::try_from(p.byte()).ok())
            .unwrap_or(0);
        for _ in 0..count_blank_lines(data, start) {
            records.push(vec![String::new()]);
        }

        if !more {
            break;
        }
        records.push(
            record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect(),
        );
    }
    Ok(records)
}

/// `from` から始まる空行の数を数える。CR・LF・CRLF をそれぞれ 1 つの行終端とみなす。
/// 直前のレコードが CRLF の CR までで終わっている場合、続く LF はその行終端の一部として扱う。
fn count_blank_lines(data: &[u8], from: usize) -> usize {
    let mut pos = from;
    if pos > 0 && data.get(pos - 1) == Some(&b'\r') && data.get(pos) == Some(&b'\n') {
        pos += 1;
    }

    let mut blank = 0;
    while let Some(&byte) = data.get(pos) {
        match byte {
            b'\r' => {
                pos += 1;
                if data.get(pos) == Some(&b'\n') {
                    pos += 1;
                }
            }
            b'\n' => pos += 1,
            _ => break,
        }
        blank += 1;
    }
    blank
}

/// 先頭行がヘッダーかどうかを判定する。
/// 単純な文字列一致のため、該当語を含むデータ行もヘッダーとして扱われる。
fn is_header_row(first: &[String]) -> bool {
    if first.len() < 3 {
        return false;
    }

    let col1 = first[0].trim().to_lowercase();
    let col2 = first[1].trim().to_lowercase();
    let col3 = first[2].trim().to_lowercase();

    col1.contains("question") || col2.contains("difficulty") || col3.contains("job") || col3.contains("code")
}

fn parse_difficulty(raw: &str) -> Result<i32, RowError> {
    let difficulty: i32 = raw.trim().parse().map_err(|_| RowError::NumberFormat)?;
    if !DIFFICULTY_RANGE.contains(&difficulty) {
        return Err(RowError::Range {
            min: *DIFFICULTY_RANGE.start(),
            max: *DIFFICULTY_RANGE.end(),
        });
    }
    Ok(difficulty)
}

fn parse_options(record: &[String]) -> Result<Vec<McqOption>, RowError> {
    let mut options = Vec::with_capacity(MAX_OPTIONS);

    for k in 0..MAX_OPTIONS {
        let value_idx = OPTION_START_COLUMN + k * 2;
        let (Some(value), Some(flag)) = (record.get(value_idx), record.get(value_idx + 1)) else {
            continue;
        };

        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        options.push(McqOption::new(value, parse_flag(flag)));
    }

    if options.len() < MIN_OPTIONS {
        return Err(RowError::InsufficientOptions { min: MIN_OPTIONS });
    }
    if !options.iter().any(|o| o.correct) {
        return Err(RowError::NoCorrectOption);
    }
    Ok(options)
}

/// "true"（大文字小文字を区別しない）のみを真とし、それ以外はすべて偽として扱う。
fn parse_flag(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}
