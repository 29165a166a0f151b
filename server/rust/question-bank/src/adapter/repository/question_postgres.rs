use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::entity::question::{McqOption, NewQuestion, Question};
use crate::domain::repository::QuestionRepository;
use crate::infrastructure::metrics::Metrics;

/// 1 回の INSERT 文に含める最大行数（PostgreSQL のバインド変数上限 65535 を超えないようにする）。
const INSERT_CHUNK_SIZE: usize = 1000;

/// QuestionPostgresRepository は QuestionRepository の PostgreSQL 実装。
/// 選択肢は `mcqs` 列に JSONB として保存する。
pub struct QuestionPostgresRepository {
    pool: PgPool,
    metrics: Option<Arc<Metrics>>,
}

impl QuestionPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            metrics: None,
        }
    }

    pub fn with_metrics(pool: PgPool, metrics: Arc<Metrics>) -> Self {
        Self {
            pool,
            metrics: Some(metrics),
        }
    }

    fn observe(&self, query_name: &str, start: std::time::Instant) {
        if let Some(ref m) = self.metrics {
            m.record_db_query_duration(query_name, "questions", start.elapsed().as_secs_f64());
        }
    }
}

#[derive(sqlx::FromRow)]
struct QuestionRow {
    id: i64,
    question_text: String,
    difficulty: i32,
    job_id: i64,
    mcqs: Json<Vec<McqOption>>,
    created_at: DateTime<Utc>,
}

impl From<QuestionRow> for Question {
    fn from(r: QuestionRow) -> Self {
        Question {
            id: r.id,
            question_text: r.question_text,
            difficulty: r.difficulty,
            job_id: r.job_id,
            mcqs: r.mcqs.0,
            created_at: r.created_at,
        }
    }
}

#[async_trait]
impl QuestionRepository for QuestionPostgresRepository {
    /// 全件を 1 トランザクションで登録する。途中で失敗した場合は何も登録されない。
    async fn save_all(&self, questions: &[NewQuestion]) -> anyhow::Result<Vec<Question>> {
        if questions.is_empty() {
            return Ok(Vec::new());
        }

        let start = std::time::Instant::now();
        let mut tx = self.pool.begin().await?;
        let mut saved = Vec::with_capacity(questions.len());

        for chunk in questions.chunks(INSERT_CHUNK_SIZE) {
            let mut builder: QueryBuilder<Postgres> =
                QueryBuilder::new("INSERT INTO questions (question_text, difficulty, job_id, mcqs) ");
            builder.push_values(chunk, |mut b, q| {
                b.push_bind(&q.question_text)
                    .push_bind(q.difficulty)
                    .push_bind(q.job_id)
                    .push_bind(Json(&q.mcqs));
            });
            builder.push(" RETURNING id, question_text, difficulty, job_id, mcqs, created_at");

            let rows = builder
                .build_query_as::<QuestionRow>()
                .fetch_all(&mut *tx)
                .await?;
            saved.extend(rows.into_iter().map(Question::from));
        }

        tx.commit().await?;
        self.observe("save_all", start);
        Ok(saved)
    }

    async fn find_by_job_id(&self, job_id: i64) -> anyhow::Result<Vec<Question>> {
        let start = std::time::Instant::now();
        let rows = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, question_text, difficulty, job_id, mcqs, created_at
            FROM questions
            WHERE job_id = $1
            ORDER BY id
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        self.observe("find_by_job_id", start);
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_by_job_id(&self, job_id: i64) -> anyhow::Result<i64> {
        let start = std::time::Instant::now();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions WHERE job_id = $1")
            .bind(job_id)
            .fetch_one(&self.pool)
            .await?;
        self.observe("count_by_job_id", start);
        Ok(count)
    }
}
