pub mod password_hasher;
pub mod question_csv_importer;
pub mod token_issuer;

pub use password_hasher::PasswordHasher;
pub use question_csv_importer::{ImportError, QuestionCsvImporter};
pub use token_issuer::{IssuedToken, TokenClaims, TokenIssuer};
