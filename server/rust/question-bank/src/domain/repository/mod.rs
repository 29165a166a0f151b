pub mod job_repository;
pub mod question_repository;
pub mod user_repository;

pub use job_repository::JobRepository;
pub use question_repository::QuestionRepository;
pub use user_repository::UserRepository;
