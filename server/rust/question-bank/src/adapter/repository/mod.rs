pub mod in_memory;
pub mod job_postgres;
pub mod question_postgres;
pub mod user_postgres;

pub use in_memory::{InMemoryJobRepository, InMemoryQuestionRepository, InMemoryUserRepository};
pub use job_postgres::JobPostgresRepository;
pub use question_postgres::QuestionPostgresRepository;
pub use user_postgres::UserPostgresRepository;
