//! データベース未設定時（dev モード・テスト）に使用するインメモリリポジトリ。

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entity::job::{Job, NewJob};
use crate::domain::entity::question::{NewQuestion, Question};
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::{JobRepository, QuestionRepository, UserRepository};

/// InMemoryJobRepository は JobRepository のインメモリ実装。
#[derive(Default)]
pub struct InMemoryJobRepository {
    jobs: RwLock<Vec<Job>>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn find_all(&self) -> anyhow::Result<Vec<Job>> {
        Ok(self.jobs.read().await.clone())
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Job>> {
        Ok(self.jobs.read().await.iter().find(|j| j.id == id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> anyhow::Result<Option<Job>> {
        Ok(self.jobs.read().await.iter().find(|j| j.code == code).cloned())
    }

    async fn exists_by_code(&self, code: &str) -> anyhow::Result<bool> {
        Ok(self.jobs.read().await.iter().any(|j| j.code == code))
    }

    async fn create(&self, job: &NewJob) -> anyhow::Result<Job> {
        let mut jobs = self.jobs.write().await;
        if jobs.iter().any(|j| j.code == job.code) {
            anyhow::bail!("duplicate job code: {}", job.code);
        }
        let now = Utc::now();
        let created = Job {
            id: jobs.last().map_or(1, |j| j.id + 1),
            name: job.name.clone(),
            code: job.code.clone(),
            created_at: now,
            updated_at: now,
        };
        jobs.push(created.clone());
        Ok(created)
    }

    async fn update_name(&self, code: &str, name: &str) -> anyhow::Result<Option<Job>> {
        let mut jobs = self.jobs.write().await;
        Ok(jobs.iter_mut().find(|j| j.code == code).map(|job| {
            job.name = name.to_string();
            job.updated_at = Utc::now();
            job.clone()
        }))
    }
}

/// InMemoryQuestionRepository は QuestionRepository のインメモリ実装。
#[derive(Default)]
pub struct InMemoryQuestionRepository {
    questions: RwLock<Vec<Question>>,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn save_all(&self, questions: &[NewQuestion]) -> anyhow::Result<Vec<Question>> {
        let mut stored = self.questions.write().await;
        let mut next_id = stored.last().map_or(1, |q| q.id + 1);
        let now = Utc::now();

        let saved: Vec<Question> = questions
            .iter()
            .map(|q| {
                let question = Question {
                    id: next_id,
                    question_text: q.question_text.clone(),
                    difficulty: q.difficulty,
                    job_id: q.job_id,
                    mcqs: q.mcqs.clone(),
                    created_at: now,
                };
                next_id += 1;
                question
            })
            .collect();
        stored.extend(saved.iter().cloned());
        Ok(saved)
    }

    async fn find_by_job_id(&self, job_id: i64) -> anyhow::Result<Vec<Question>> {
        Ok(self
            .questions
            .read()
            .await
            .iter()
            .filter(|q| q.job_id == job_id)
            .cloned()
            .collect())
    }

    async fn count_by_job_id(&self, job_id: i64) -> anyhow::Result<i64> {
        let count = self
            .questions
            .read()
            .await
            .iter()
            .filter(|q| q.job_id == job_id)
            .count();
        Ok(i64::try_from(count)?)
    }
}

/// InMemoryUserRepository は UserRepository のインメモリ実装。
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn exists_by_username(&self, username: &str) -> anyhow::Result<bool> {
        Ok(self.users.read().await.iter().any(|u| u.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> anyhow::Result<bool> {
        Ok(self.users.read().await.iter().any(|u| u.email == email))
    }

    async fn create(&self, user: &NewUser) -> anyhow::Result<User> {
        let mut users = self.users.write().await;
        let created = User {
            id: users.last().map_or(1, |u| u.id + 1),
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::question::McqOption;

    #[tokio::test]
    async fn test_job_create_assigns_sequential_ids() {
        let repo = InMemoryJobRepository::new();
        let a = repo
            .create(&NewJob {
                name: "Math".to_string(),
                code: "MATH01".to_string(),
            })
            .await
            .unwrap();
        let b = repo
            .create(&NewJob {
                name: "Science".to_string(),
                code: "SCI01".to_string(),
            })
            .await
            .unwrap();

        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(repo.find_by_code("SCI01").await.unwrap().unwrap().id, 2);
        assert!(repo.exists_by_code("MATH01").await.unwrap());
    }

    #[tokio::test]
    async fn test_job_update_name_unknown_code() {
        let repo = InMemoryJobRepository::new();
        assert!(repo.update_name("NOPE", "x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_question_save_all_and_count() {
        let repo = InMemoryQuestionRepository::new();
        let new = |job_id| NewQuestion {
            question_text: "Q".to_string(),
            difficulty: 1,
            job_id,
            mcqs: vec![McqOption::new("a", true), McqOption::new("b", false)],
        };

        let saved = repo.save_all(&[new(1), new(1), new(2)]).await.unwrap();
        assert_eq!(saved.iter().map(|q| q.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(repo.count_by_job_id(1).await.unwrap(), 2);
        assert_eq!(repo.find_by_job_id(2).await.unwrap().len(), 1);
    }
}
