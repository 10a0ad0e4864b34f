//! エンティティ定義
//!
//! - `PresenceDirectory`: 接続中ユーザーの台帳（リアルタイムチャンネルの中核）
//! - `User`: アカウント
//! - `OtpChallenge`: メール認証用のワンタイムパスワード記録
//! - `Post`: 投稿

use super::value_object::{ConnectionId, Email, Timestamp, UserId};

/// 在席記録
///
/// 「このユーザーはこの接続で到達できる」という 1 件の対応付け。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRecord {
    pub user_id: UserId,
    pub connection_id: ConnectionId,
}

impl ConnectionRecord {
    /// 新しい ConnectionRecord を作成
    pub fn new(user_id: UserId, connection_id: ConnectionId) -> Self {
        Self {
            user_id,
            connection_id,
        }
    }
}

/// 在席台帳
///
/// 接続中ユーザーの記録を挿入順に保持します。プロセス内メモリのみで、
/// 永続化は行いません（プロセス終了とともに消える）。
///
/// ## 不変条件
///
/// - 同じ `user_id` の記録は高々 1 件
/// - 同じ `connection_id` の記録は高々 1 件
/// - 記録は挿入順を保つ
#[derive(Debug, Default)]
pub struct PresenceDirectory {
    /// 在席記録（挿入順）
    pub records: Vec<ConnectionRecord>,
}

impl PresenceDirectory {
    /// 空の台帳を作成
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// 在席記録を登録
    ///
    /// 同じ `user_id` または `connection_id` の記録が既にある場合は
    /// 何もせず `false` を返します。登録できた場合は `true`。
    ///
    /// 失敗やエラーはありません。重複はエラーではなく無視です。
    pub fn register(&mut self, user_id: UserId, connection_id: ConnectionId) -> bool {
        let occupied = self
            .records
            .iter()
            .any(|record| record.user_id == user_id || record.connection_id == connection_id);
        if occupied {
            return false;
        }
        self.records.push(ConnectionRecord::new(user_id, connection_id));
        true
    }

    /// 指定した接続の在席記録をすべて削除し、削除件数を返す
    ///
    /// 該当する記録がない場合は 0 を返します（エラーにはなりません）。
    pub fn unregister(&mut self, connection_id: &ConnectionId) -> usize {
        let before = self.records.len();
        self.records
            .retain(|record| record.connection_id != *connection_id);
        before - self.records.len()
    }

    /// ユーザーの在席記録を検索（最初に一致した 1 件）
    pub fn lookup(&self, user_id: &UserId) -> Option<&ConnectionRecord> {
        self.records.iter().find(|record| record.user_id == *user_id)
    }

    /// 台帳全体のコピーを挿入順で返す
    pub fn snapshot(&self) -> Vec<ConnectionRecord> {
        self.records.clone()
    }

    /// 記録件数
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// アカウント
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    /// パスワードのハッシュ。平文は保持しない
    pub password_hash: String,
    pub picture_path: String,
    pub friends: Vec<String>,
    pub location: String,
    pub occupation: String,
    pub viewed_profile: u32,
    pub impressions: u32,
    pub created_at: Timestamp,
}

/// メール認証チャレンジ
///
/// OTP は平文では保持せず、ハッシュのみを保存します。
#[derive(Debug, Clone, PartialEq)]
pub struct OtpChallenge {
    pub id: String,
    pub email: Email,
    pub otp_hash: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

impl OtpChallenge {
    /// 新しい OtpChallenge を作成（有効期限は作成時刻 + ttl_millis）
    pub fn new(
        id: String,
        email: Email,
        otp_hash: String,
        created_at: Timestamp,
        ttl_millis: i64,
    ) -> Self {
        Self {
            id,
            email,
            otp_hash,
            created_at,
            expires_at: Timestamp::new(created_at.value() + ttl_millis),
        }
    }

    /// 有効期限切れかどうか（expires_at < now で期限切れ）
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at < now
    }
}

/// 投稿
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: String,
    pub user_id: UserId,
    pub description: String,
    pub picture_path: String,
    pub created_at: Timestamp,
}
