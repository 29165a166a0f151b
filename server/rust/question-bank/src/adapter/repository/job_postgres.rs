use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entity::job::{Job, NewJob};
use crate::domain::repository::JobRepository;
use crate::infrastructure::metrics::Metrics;

/// JobPostgresRepository は JobRepository の PostgreSQL 実装。
pub struct JobPostgresRepository {
    pool: PgPool,
    metrics: Option<Arc<Metrics>>,
}

impl JobPostgresRepository {
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
            m.record_db_query_duration(query_name, "jobs", start.elapsed().as_secs_f64());
        }
    }
}

#[derive(sqlx::FromRow)]
struct JobRow {
    id: i64,
    name: String,
    code: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<JobRow> for Job {
    fn from(r: JobRow) -> Self {
        Job {
            id: r.id,
            name: r.name,
            code: r.code,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[async_trait]
impl JobRepository for JobPostgresRepository {
    async fn find_all(&self) -> anyhow::Result<Vec<Job>> {
        let start = std::time::Instant::now();
        let rows = sqlx::query_as::<_, JobRow>(
            "SELECT id, name, code, created_at, updated_at FROM jobs ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        self.observe("find_all", start);
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Job>> {
        let start = std::time::Instant::now();
        let row = sqlx::query_as::<_, JobRow>(
            "SELECT id, name, code, created_at, updated_at FROM jobs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        self.observe("find_by_id", start);
        Ok(row.map(Into::into))
    }

    async fn find_by_code(&self, code: &str) -> anyhow::Result<Option<Job>> {
        let start = std::time::Instant::now();
        let row = sqlx::query_as::<_, JobRow>(
            "SELECT id, name, code, created_at, updated_at FROM jobs WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        self.observe("find_by_code", start);
        Ok(row.map(Into::into))
    }

    async fn exists_by_code(&self, code: &str) -> anyhow::Result<bool> {
        let start = std::time::Instant::now();
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM jobs WHERE code = $1)")
            .bind(code)
            .fetch_one(&self.pool)
            .await?;
        self.observe("exists_by_code", start);
        Ok(exists)
    }

    async fn create(&self, job: &NewJob) -> anyhow::Result<Job> {
        let start = std::time::Instant::now();
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            INSERT INTO jobs (name, code)
            VALUES ($1, $2)
            RETURNING id, name, code, created_at, updated_at
            "#,
        )
        .bind(&job.name)
        .bind(&job.code)
        .fetch_one(&self.pool)
        .await?;
        self.observe("create", start);
        Ok(row.into())
    }

    async fn update_name(&self, code: &str, name: &str) -> anyhow::Result<Option<Job>> {
        let start = std::time::Instant::now();
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            UPDATE jobs
            SET name = $2, updated_at = NOW()
            WHERE code = $1
            RETURNING id, name, code, created_at, updated_at
            "#,
        )
        .bind(code)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        self.observe("update_name", start);
        Ok(row.map(Into::into))
    }
}
