pub mod create_job;
pub mod get_job;
pub mod import_questions;
pub mod list_jobs;
pub mod list_questions;
pub mod signin;
pub mod signup;
pub mod update_job;

pub use create_job::CreateJobUseCase;
pub use get_job::GetJobUseCase;
pub use import_questions::ImportQuestionsUseCase;
pub use list_jobs::ListJobsUseCase;
pub use list_questions::ListQuestionsUseCase;
pub use signin::SigninUseCase;
pub use signup::SignupUseCase;
pub use update_job::UpdateJobUseCase;

/// validator のエラーをフィールド名順の 1 行メッセージにまとめる。
pub(crate) fn describe_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map_or_else(|| format!("{field} is invalid"), ToString::to_string)
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
