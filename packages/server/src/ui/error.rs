//! HTTP error responses.
//!
//! UseCase 層のエラーをステータスコード付きの JSON ボディに変換します。
//! ボディは常に `{"message": "..."}` の形です。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::usecase::{CreatePostError, GetUserError, LoginError, RegisterError, SendOtpError};

/// HTTP API のエラー
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("malformed payload")]
    MalformedPayload,

    #[error("{0}")]
    BadRequest(String),

    #[error("missing or invalid bearer token")]
    Unauthorized,

    #[error(transparent)]
    SendOtp(#[from] SendOtpError),

    #[error(transparent)]
    Register(#[from] RegisterError),

    #[error(transparent)]
    Login(#[from] LoginError),

    #[error(transparent)]
    CreatePost(#[from] CreatePostError),

    #[error(transparent)]
    GetUser(#[from] GetUserError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedPayload | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::SendOtp(e) => match e {
                SendOtpError::EmailTaken => StatusCode::CONFLICT,
                SendOtpError::HashFailed(_)
                | SendOtpError::ImageStoreFailed(_)
                | SendOtpError::MailFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Register(e) => match e {
                RegisterError::MissingOtp => StatusCode::BAD_REQUEST,
                RegisterError::ChallengeNotFound => StatusCode::NOT_FOUND,
                RegisterError::OtpExpired => StatusCode::GONE,
                RegisterError::InvalidOtp => StatusCode::UNAUTHORIZED,
                RegisterError::EmailTaken => StatusCode::CONFLICT,
                RegisterError::HashFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Login(e) => match e {
                LoginError::UserNotFound | LoginError::WrongPassword => StatusCode::BAD_REQUEST,
                LoginError::HashFailed(_) | LoginError::TokenFailed(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::CreatePost(e) => match e {
                CreatePostError::UserNotFound(_) => StatusCode::NOT_FOUND,
                CreatePostError::ImageStoreFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::GetUser(e) => match e {
                GetUserError::UserNotFound(_) => StatusCode::NOT_FOUND,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = Json(serde_json::json!({ "message": self.to_string() }));
        (status, body).into_response()
    }
}
