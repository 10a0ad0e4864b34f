//! 外部コラボレータの trait 定義
//!
//! 認証・投稿フローが依存する外部サービス（パスワードハッシュ、トークン発行、
//! メール送信、画像ストレージ）のインターフェースをドメイン層に置きます。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use thiserror::Error;

use super::value_object::{Email, UserId};

/// ハッシュ処理のエラー
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("failed to hash credential: {0}")]
    HashFailed(String),
    #[error("stored credential hash is malformed: {0}")]
    MalformedHash(String),
}

/// パスワード・OTP のハッシュ化と照合
///
/// パスワードと OTP はどちらも平文では保存せず、この trait 経由で
/// ハッシュ化してから Repository に渡します。
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// 平文をハッシュ化する
    fn hash(&self, plaintext: &str) -> Result<String, CredentialError>;

    /// 平文とハッシュを照合する
    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, CredentialError>;
}

/// トークン操作のエラー
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to issue token: {0}")]
    IssueFailed(String),
    #[error("token is invalid or expired")]
    Invalid,
}

/// アクセストークンの発行と検証
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// ユーザー ID を主体とするトークンを発行する
    fn issue(&self, user_id: &UserId) -> Result<String, TokenError>;

    /// トークンを検証し、主体のユーザー ID を返す
    fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}

/// メール送信のエラー
#[derive(Debug, Error)]
pub enum MailError {
    #[error("failed to send mail to '{0}': {1}")]
    SendFailed(String, String),
}

/// 認証メールの送信
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailSender: Send + Sync {
    /// OTP を記載した認証メールを送信する
    async fn send_otp(&self, to: &Email, otp: &str) -> Result<(), MailError>;
}

/// アップロードされた画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// 画像ストレージのエラー
#[derive(Debug, Error)]
pub enum ImageStoreError {
    #[error("failed to store image: {0}")]
    StoreFailed(String),
}

/// 画像の保存
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// 画像を保存し、参照用のパス（例: `profiles/<id>`）を返す
    async fn store(&self, folder: &str, upload: ImageUpload) -> Result<String, ImageStoreError>;
}
