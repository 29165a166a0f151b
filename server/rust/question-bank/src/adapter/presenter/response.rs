use serde::Serialize;

use crate::domain::entity::user::User;
use crate::usecase::signup::AuthOutput;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            message: None,
            data,
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            message: Some(message.into()),
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub job_id: i64,
    pub count: i64,
}

/// AuthResponse はサインアップ・サインイン成功時のレスポンス。
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

impl From<AuthOutput> for AuthResponse {
    fn from(out: AuthOutput) -> Self {
        let User {
            id,
            username,
            email,
            ..
        } = out.user;
        Self {
            user_id: id,
            username,
            email,
            token: out.token.token,
            token_type: "Bearer",
            expires_in: out.token.expires_in,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
