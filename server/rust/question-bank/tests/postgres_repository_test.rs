#![cfg(feature = "db-tests")]

use sqlx::PgPool;

use question_bank_server::adapter::repository::{
    JobPostgresRepository, QuestionPostgresRepository, UserPostgresRepository,
};
use question_bank_server::domain::entity::job::NewJob;
use question_bank_server::domain::entity::question::{McqOption, NewQuestion};
use question_bank_server::domain::entity::user::NewUser;
use question_bank_server::domain::repository::{
    JobRepository, QuestionRepository, UserRepository,
};

// sqlx::test マクロ用。マイグレーションを自動適用する。
static MIGRATOR: sqlx::migrate::Migrator =
    sqlx::migrate!("../../../database/question-bank-db/migrations");

async fn seed_job(pool: &PgPool, code: &str) -> i64 {
    JobPostgresRepository::new(pool.clone())
        .create(&NewJob {
            name: format!("{code} job"),
            code: code.to_string(),
        })
        .await
        .unwrap()
        .id
}

fn question(text: &str, job_id: i64) -> NewQuestion {
    NewQuestion {
        question_text: text.to_string(),
        difficulty: 5,
        job_id,
        mcqs: vec![McqOption::new("yes", true), McqOption::new("no", false)],
    }
}

#[sqlx::test(migrator = "MIGRATOR")]
async fn test_job_create_find_update(pool: PgPool) {
    let repo = JobPostgresRepository::new(pool);
    let job = repo
        .create(&NewJob {
            name: "Mathematics".to_string(),
            code: "MATH01".to_string(),
        })
        .await
        .unwrap();

    assert!(repo.exists_by_code("MATH01").await.unwrap());
    assert_eq!(repo.find_by_code("MATH01").await.unwrap().unwrap().id, job.id);
    assert_eq!(repo.find_by_id(job.id).await.unwrap().unwrap().code, "MATH01");

    let updated = repo
        .update_name("MATH01", "Applied Mathematics")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Applied Mathematics");
    assert!(repo.update_name("NOPE", "x").await.unwrap().is_none());
    assert_eq!(repo.find_all().await.unwrap().len(), 1);
}

#[sqlx::test(migrator = "MIGRATOR")]
async fn test_job_duplicate_code_is_error(pool: PgPool) {
    seed_job(&pool, "MATH01").await;
    let result = JobPostgresRepository::new(pool)
        .create(&NewJob {
            name: "Other".to_string(),
            code: "MATH01".to_string(),
        })
        .await;
    assert!(result.is_err());
}

#[sqlx::test(migrator = "MIGRATOR")]
async fn test_question_save_all_round_trips_mcqs(pool: PgPool) {
    let job_id = seed_job(&pool, "SCI01").await;
    let repo = QuestionPostgresRepository::new(pool);

    let saved = repo
        .save_all(&[question("first", job_id), question("second", job_id)])
        .await
        .unwrap();
    assert_eq!(saved.len(), 2);

    let found = repo.find_by_job_id(job_id).await.unwrap();
    assert_eq!(found[0].question_text, "first");
    assert_eq!(found[1].mcqs, vec![McqOption::new("yes", true), McqOption::new("no", false)]);
    assert_eq!(repo.count_by_job_id(job_id).await.unwrap(), 2);
}

#[sqlx::test(migrator = "MIGRATOR")]
async fn test_question_save_all_is_atomic(pool: PgPool) {
    let job_id = seed_job(&pool, "SCI01").await;
    let repo = QuestionPostgresRepository::new(pool);

    // 存在しない job_id は外部キー制約違反となり、全件ロールバックされる
    let result = repo
        .save_all(&[question("ok", job_id), question("orphan", job_id + 1000)])
        .await;
    assert!(result.is_err());
    assert_eq!(repo.count_by_job_id(job_id).await.unwrap(), 0);
}

#[sqlx::test(migrator = "MIGRATOR")]
async fn test_user_create_and_lookup(pool: PgPool) {
    let repo = UserPostgresRepository::new(pool);
    repo.create(&NewUser {
        username: "hanako".to_string(),
        email: "hanako@example.com".to_string(),
        password_hash: "$argon2id$v=19$stub".to_string(),
    })
    .await
    .unwrap();

    assert!(repo.exists_by_username("hanako").await.unwrap());
    assert!(repo.exists_by_email("hanako@example.com").await.unwrap());
    assert!(!repo.exists_by_email("taro@example.com").await.unwrap());
    let user = repo.find_by_username("hanako").await.unwrap().unwrap();
    assert_eq!(user.email, "hanako@example.com");
}
