use std::sync::Arc;

use serde::Deserialize;
use validator::Validate;

use crate::domain::repository::UserRepository;
use crate::domain::service::{PasswordHasher, TokenIssuer};
use crate::usecase::describe_validation_errors;
use crate::usecase::signup::AuthOutput;

/// SigninError はサインインに関するエラー。
/// ユーザーの有無を推測されないよう、認証失敗は `InvalidCredentials` に統一する。
#[derive(Debug, thiserror::Error)]
pub enum SigninError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("internal error: {0}")]
    Internal(String),
}

/// SigninInput はサインインリクエスト。
#[derive(Clone, Deserialize, Validate)]
pub struct SigninInput {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl std::fmt::Debug for SigninInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigninInput")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// SigninUseCase はパスワード照合とトークン発行を行うユースケース。
pub struct SigninUseCase {
    user_repo: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    issuer: Arc<dyn TokenIssuer>,
}

impl SigninUseCase {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            issuer,
        }
    }

    pub async fn execute(&self, input: SigninInput) -> Result<AuthOutput, SigninError> {
        input
            .validate()
            .map_err(|e| SigninError::Validation(describe_validation_errors(&e)))?;

        let Some(user) = self
            .user_repo
            .find_by_username(&input.username)
            .await
            .map_err(|e| SigninError::Internal(e.to_string()))?
        else {
            tracing::warn!(username = %input.username, "signin failed: unknown user");
            return Err(SigninError::InvalidCredentials);
        };

        let matched = self
            .hasher
            .verify(&input.password, &user.password_hash)
            .map_err(|e| SigninError::Internal(e.to_string()))?;
        if !matched {
            tracing::warn!(user_id = user.id, "signin failed: password mismatch");
            return Err(SigninError::InvalidCredentials);
        }

        let token = self
            .issuer
            .issue(user.id, &user.username)
            .map_err(|e| SigninError::Internal(e.to_string()))?;

        Ok(AuthOutput { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::user::User;
    use crate::domain::repository::user_repository::MockUserRepository;
    use crate::domain::service::password_hasher::MockPasswordHasher;
    use crate::domain::service::token_issuer::MockTokenIssuer;
    use crate::domain::service::IssuedToken;
    use chrono::Utc;

    fn input(password: &str) -> SigninInput {
        SigninInput {
            username: "hanako".to_string(),
            password: password.to_string(),
        }
    }

    fn existing_user() -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|name| {
            Ok(Some(User {
                id: 4,
                username: name.to_string(),
                email: "hanako@example.com".to_string(),
                password_hash: "hash".to_string(),
                created_at: Utc::now(),
            }))
        });
        users
    }

    fn hasher() -> MockPasswordHasher {
        let mut mock = MockPasswordHasher::new();
        mock.expect_verify()
            .returning(|password, hash| Ok(password == "correct" && hash == "hash"));
        mock
    }

    #[tokio::test]
    async fn test_signin_success() {
        let mut issuer = MockTokenIssuer::new();
        issuer
            .expect_issue()
            .withf(|uid, name| *uid == 4 && name == "hanako")
            .returning(|_, _| {
                Ok(IssuedToken {
                    token: "jwt".to_string(),
                    expires_in: 60,
                })
            });

        let uc = SigninUseCase::new(Arc::new(existing_user()), Arc::new(hasher()), Arc::new(issuer));
        let out = uc.execute(input("correct")).await.unwrap();
        assert_eq!(out.user.id, 4);
        assert_eq!(out.token.token, "jwt");
    }

    #[tokio::test]
    async fn test_signin_wrong_password() {
        let mut issuer = MockTokenIssuer::new();
        issuer.expect_issue().never();

        let uc = SigninUseCase::new(Arc::new(existing_user()), Arc::new(hasher()), Arc::new(issuer));
        assert!(matches!(
            uc.execute(input("wrong")).await.unwrap_err(),
            SigninError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_signin_unknown_user() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| Ok(None));

        let uc = SigninUseCase::new(
            Arc::new(users),
            Arc::new(MockPasswordHasher::new()),
            Arc::new(MockTokenIssuer::new()),
        );
        let err = uc.execute(input("correct")).await.unwrap_err();
        assert!(matches!(err, SigninError::InvalidCredentials));
        assert_eq!(err.to_string(), "Invalid username or password");
    }

    #[tokio::test]
    async fn test_signin_empty_fields() {
        let uc = SigninUseCase::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockPasswordHasher::new()),
            Arc::new(MockTokenIssuer::new()),
        );
        assert!(matches!(
            uc.execute(input("")).await.unwrap_err(),
            SigninError::Validation(_)
        ));
    }
}
