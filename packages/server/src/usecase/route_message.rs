//! UseCase: メッセージ配送処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RouteMessageUseCase::execute() メソッド
//! - 受信者の在席記録の検索と、該当する 1 接続への point-to-point 配送
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：メッセージは受信者の接続にだけ届く
//! - 受信者が不在の場合に黙って破棄されることを確認（at-most-once）
//! - 配送失敗がエラーとして呼び出し側に伝播しないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：在席中の受信者への配送
//! - エッジケース：不在の受信者への送信（破棄）
//! - 異常系：受信者のチャンネルが閉じている場合（破棄）

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PresenceRepository, UserId};

/// メッセージ配送の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// 受信者の接続に配送された
    Delivered(ConnectionId),
    /// 受信者が不在、または送信できず破棄された
    RecipientOffline,
}

/// メッセージ配送のユースケース
pub struct RouteMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn PresenceRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl RouteMessageUseCase {
    /// 新しい RouteMessageUseCase を作成
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// メッセージ配送を実行
    ///
    /// 受信者の在席記録を検索し、見つかればその接続 1 本にだけ送信します。
    /// 不在・送信失敗はどちらも破棄として扱い、エラーは返しません。
    /// 再送や永続化は行いません（at-most-once）。
    ///
    /// # Arguments
    ///
    /// * `sender_id` - メッセージ送信者のユーザー ID（Domain Model）
    /// * `receiver_id` - メッセージ受信者のユーザー ID（Domain Model）
    /// * `json_message` - 送信する JSON メッセージ（DTO 層で生成されたもの）
    ///
    /// # Returns
    ///
    /// * `DeliveryOutcome::Delivered` - 配送先の接続 ID
    /// * `DeliveryOutcome::RecipientOffline` - 受信者が不在で破棄された
    pub async fn execute(
        &self,
        sender_id: &UserId,
        receiver_id: &UserId,
        json_message: String,
    ) -> DeliveryOutcome {
        // 1. 受信者の在席記録を検索
        let Some(record) = self.repository.lookup(receiver_id).await else {
            tracing::debug!(
                "Dropping message from '{}': receiver '{}' is not present",
                sender_id.as_str(),
                receiver_id.as_str()
            );
            return DeliveryOutcome::RecipientOffline;
        };

        // 2. 受信者の接続 1 本にだけ push
        match self
            .message_pusher
            .push_to(&record.connection_id, &json_message)
            .await
        {
            Ok(()) => DeliveryOutcome::Delivered(record.connection_id),
            Err(e) => {
                tracing::warn!(
                    "Dropping message from '{}': push to connection '{}' failed: {}",
                    sender_id.as_str(),
                    record.connection_id.as_str(),
                    e
                );
                DeliveryOutcome::RecipientOffline
            }
        }
    }
}
