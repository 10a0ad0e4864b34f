//! 値オブジェクト（Value Object）定義
//!
//! 不変条件を持つ識別子・値の型をここに集約します。
//! 生成時に検証を行い、不正な値がドメイン層に入り込むことを防ぎます。

use thiserror::Error;
use uuid::Uuid;

/// 値オブジェクトの検証エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("user id must not be empty")]
    EmptyUserId,
    #[error("connection id must not be empty")]
    EmptyConnectionId,
    #[error("conversation id must not be empty")]
    EmptyConversationId,
    #[error("invalid email address: '{0}'")]
    InvalidEmail(String),
}

/// ユーザー ID
///
/// アカウントの識別子。リアルタイムチャンネルでは `addUser` でクライアントが
/// 申告した文字列をそのまま受け取るため、検証は「空でないこと」のみ。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// 新しい UserId を作成（空文字列はエラー）
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::EmptyUserId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// UserId のファクトリ
///
/// 新規アカウント作成時にサーバー側で UUID v4 の ID を採番します。
pub struct UserIdFactory;

impl UserIdFactory {
    pub fn generate() -> UserId {
        UserId(Uuid::new_v4().to_string())
    }
}

/// 接続 ID
///
/// トランスポート接続ごとにサーバーが採番する識別子。
/// クライアントが値を選ぶことはできません。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// 新しい ConnectionId を作成（空文字列はエラー）
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::EmptyConnectionId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// ConnectionId のファクトリ
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId(Uuid::new_v4().to_string())
    }
}

/// 会話 ID
///
/// メッセージが属する会話の識別子。中継サーバーは解釈せず、
/// そのまま受信者に引き渡します。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversationId(String);

impl ConversationId {
    /// 新しい ConversationId を作成（空文字列はエラー）
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::EmptyConversationId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// メッセージ本文
///
/// 不透明なペイロード。サーバーは内容を検証・解釈せずに中継するため、
/// 空文字列も許容します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody(String);

impl MessageBody {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for MessageBody {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// メールアドレス
///
/// アカウントのキー。検証は最小限（空でない・`@` を含む）。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// 新しい Email を作成
    pub fn new(value: String) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() || !trimmed.contains('@') {
            return Err(DomainError::InvalidEmail(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// タイムスタンプ（Unix ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
