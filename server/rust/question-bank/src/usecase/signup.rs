use std::sync::Arc;

use serde::Deserialize;
use validator::Validate;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::service::{IssuedToken, PasswordHasher, TokenIssuer};
use crate::usecase::describe_validation_errors;

/// SignupError はサインアップに関するエラー。
#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// SignupInput はサインアップリクエスト。
/// パスワードをログへ出力しないよう Debug は手動実装している。
#[derive(Clone, Deserialize, Validate)]
pub struct SignupInput {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username must be between 3 and 50 characters"
    ))]
    pub username: String,

    #[validate(email(message = "Email should be valid"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

impl std::fmt::Debug for SignupInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupInput")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// AuthOutput は認証成功時のユーザーと発行済みトークン。
#[derive(Debug, Clone)]
pub struct AuthOutput {
    pub user: User,
    pub token: IssuedToken,
}

/// SignupUseCase はユーザー登録とトークン発行を行うユースケース。
pub struct SignupUseCase {
    user_repo: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    issuer: Arc<dyn TokenIssuer>,
}

impl SignupUseCase {
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

    pub async fn execute(&self, input: SignupInput) -> Result<AuthOutput, SignupError> {
        input
            .validate()
            .map_err(|e| SignupError::Validation(describe_validation_errors(&e)))?;

        if self
            .user_repo
            .exists_by_username(&input.username)
            .await
            .map_err(|e| SignupError::Internal(e.to_string()))?
        {
            return Err(SignupError::Conflict("Username is already taken".to_string()));
        }
        if self
            .user_repo
            .exists_by_email(&input.email)
            .await
            .map_err(|e| SignupError::Internal(e.to_string()))?
        {
            return Err(SignupError::Conflict("Email is already in use".to_string()));
        }

        let password_hash = self
            .hasher
            .hash(&input.password)
            .map_err(|e| SignupError::Internal(e.to_string()))?;

        let user = self
            .user_repo
            .create(&NewUser {
                username: input.username,
                email: input.email,
                password_hash,
            })
            .await
            .map_err(|e| SignupError::Internal(e.to_string()))?;

        let token = self
            .issuer
            .issue(user.id, &user.username)
            .map_err(|e| SignupError::Internal(e.to_string()))?;

        tracing::info!(user_id = user.id, username = %user.username, "user signed up");
        Ok(AuthOutput { user, token })
    }
}
