//! UseCase: 在席登録処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - AnnounceIdentityUseCase::execute() メソッド
//! - クライアントが申告した identity の在席台帳への登録と在席リスト構築
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：既存の user_id / connection_id は沈黙のまま無視される
//! - Domain Model（PresenceDirectory）への追加が正しく行われることを確認
//! - 登録が no-op だった場合でもブロードキャストは行われることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規クライアントの在席登録
//! - エッジケース：同じ user_id による 2 本目の接続（登録されない）
//! - エッジケース：identity 未申告の接続へのブロードキャスト到達

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRecord, MessagePusher, PresenceRepository, UserId};

/// 在席登録のユースケース
pub struct AnnounceIdentityUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn PresenceRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl AnnounceIdentityUseCase {
    /// 新しい AnnounceIdentityUseCase を作成
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 在席登録を実行
    ///
    /// 同じ user_id または connection_id の記録が既に存在する場合は
    /// 何も登録せず、エラーも返しません。戻り値は新しい記録が
    /// 追加されたかどうかです。どちらの場合も呼び出し側は
    /// 在席リストをブロードキャストします。
    ///
    /// # Arguments
    ///
    /// * `user_id` - クライアントが申告したユーザー ID（Domain Model）
    /// * `connection_id` - 接続ごとに採番された ID（Domain Model）
    ///
    /// # Returns
    ///
    /// * `true` - 新しい在席記録が追加された
    /// * `false` - 既存の記録があり、何も変更されなかった
    pub async fn execute(&self, user_id: UserId, connection_id: ConnectionId) -> bool {
        let registered = self
            .repository
            .register(user_id.clone(), connection_id.clone())
            .await;

        if registered {
            tracing::debug!(
                "User '{}' announced on connection '{}'",
                user_id.as_str(),
                connection_id.as_str()
            );
        } else {
            tracing::debug!(
                "Announcement from user '{}' on connection '{}' ignored (already registered)",
                user_id.as_str(),
                connection_id.as_str()
            );
        }

        registered
    }

    /// 在席リストを構築
    ///
    /// # Returns
    ///
    /// 在席台帳の全記録（Domain Model、登録順のまま）
    pub async fn build_presence_list(&self) -> Vec<ConnectionRecord> {
        self.repository.snapshot().await
    }

    /// 在席リストを接続中の全クライアントにブロードキャスト
    ///
    /// identity 未申告の接続にも送信します。
    ///
    /// # Arguments
    ///
    /// * `message` - ブロードキャストするメッセージ（JSON）
    ///
    /// # Returns
    ///
    /// * `Ok(())` - ブロードキャスト成功
    /// * `Err(String)` - ブロードキャスト失敗
    pub async fn broadcast_presence(&self, message: &str) -> Result<(), String> {
        self.message_pusher
            .broadcast_all(message)
            .await
            .map_err(|e| e.to_string())
    }
}
