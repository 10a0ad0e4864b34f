//! UseCase 層のエラー定義
//!
//! 各ユースケースが返すエラーを列挙します。リアルタイム系のユースケース
//! （接続・在席登録・配送・切断）は仕様上失敗しないため、ここには
//! HTTP 系フローのエラーのみが並びます。

use thiserror::Error;

/// OTP 送信のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendOtpError {
    #[error("another user with this email exists")]
    EmailTaken,
    #[error("failed to hash one-time password: {0}")]
    HashFailed(String),
    #[error("failed to store picture: {0}")]
    ImageStoreFailed(String),
    #[error("failed to send verification mail: {0}")]
    MailFailed(String),
}

/// アカウント登録のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegisterError {
    #[error("empty otp details are not allowed")]
    MissingOtp,
    #[error("account record not found, sign up again")]
    ChallengeNotFound,
    #[error("code has expired, request a new one")]
    OtpExpired,
    #[error("invalid otp")]
    InvalidOtp,
    #[error("another user with this email exists")]
    EmailTaken,
    #[error("failed to hash credential: {0}")]
    HashFailed(String),
}

/// ログインのエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("user does not exist")]
    UserNotFound,
    #[error("wrong password")]
    WrongPassword,
    #[error("failed to verify credential: {0}")]
    HashFailed(String),
    #[error("failed to issue token: {0}")]
    TokenFailed(String),
}

/// 投稿作成のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CreatePostError {
    #[error("user '{0}' not found")]
    UserNotFound(String),
    #[error("failed to store picture: {0}")]
    ImageStoreFailed(String),
}

/// ユーザー取得のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GetUserError {
    #[error("user '{0}' not found")]
    UserNotFound(String),
}
