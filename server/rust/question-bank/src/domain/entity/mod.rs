pub mod import_result;
pub mod job;
pub mod question;
pub mod user;
