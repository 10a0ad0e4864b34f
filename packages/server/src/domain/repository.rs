//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use thiserror::Error;

use super::entity::{ConnectionRecord, OtpChallenge, Post, User};
use super::value_object::{ConnectionId, Email, UserId};

/// Repository 操作のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("another user with this email exists: '{0}'")]
    DuplicateEmail(String),
    #[error("user '{0}' not found")]
    UserNotFound(String),
}

/// 在席台帳 Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
///
/// ## エラーを返さない理由
///
/// 在席台帳の操作に失敗はありません。重複登録・未登録の切断・不在の検索は
/// すべて正常系（無視 / 0 件 / None）として扱います。
#[async_trait]
pub trait PresenceRepository: Send + Sync {
    /// 在席記録を登録（重複時は何もせず false）
    async fn register(&self, user_id: UserId, connection_id: ConnectionId) -> bool;

    /// 指定した接続の在席記録をすべて削除し、削除件数を返す
    async fn unregister(&self, connection_id: &ConnectionId) -> usize;

    /// ユーザーの在席記録を検索（最初に一致した 1 件）
    async fn lookup(&self, user_id: &UserId) -> Option<ConnectionRecord>;

    /// 台帳全体のコピーを挿入順で取得
    async fn snapshot(&self) -> Vec<ConnectionRecord>;

    /// 在席記録の件数を取得
    async fn count(&self) -> usize;
}

/// アカウント Repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// アカウントを保存（メールアドレス重複時はエラー）
    async fn insert(&self, user: User) -> Result<User, RepositoryError>;

    /// メールアドレスでアカウントを検索
    async fn find_by_email(&self, email: &Email) -> Option<User>;

    /// ID でアカウントを検索
    async fn find_by_id(&self, id: &UserId) -> Option<User>;
}

/// OTP チャレンジ Repository trait
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// チャレンジを保存
    async fn insert(&self, challenge: OtpChallenge);

    /// ID でチャレンジを検索
    async fn find(&self, id: &str) -> Option<OtpChallenge>;

    /// ID でチャレンジを削除（存在しなくてもエラーにしない）
    async fn delete(&self, id: &str);
}

/// 投稿 Repository trait
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// 投稿を保存
    async fn insert(&self, post: Post);

    /// 全投稿を新しい順に取得
    async fn list_newest_first(&self) -> Vec<Post>;
}
