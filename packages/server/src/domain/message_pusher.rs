//! MessagePusher trait 定義
//!
//! 接続中クライアントへのメッセージ送出を抽象化します。
//! 具体的な実装（WebSocket）は Infrastructure 層が提供します。

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::value_object::ConnectionId;

/// クライアントへの送信チャンネル
///
/// UI 層が WebSocket 接続ごとに生成し、MessagePusher に登録します。
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// メッセージ送出のエラー
#[derive(Debug, Error)]
pub enum MessagePushError {
    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),
    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// MessagePusher trait
///
/// チャンネルの登録は接続の確立時、解除は切断時に行われます。
/// 在席台帳への登録（addUser）とは独立しているため、identity を
/// 申告していない接続にもブロードキャストは届きます。
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを解除
    async fn unregister_connection(&self, connection_id: &ConnectionId);

    /// 特定の接続にメッセージを送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// 接続中の全クライアントにメッセージを送信
    async fn broadcast_all(&self, content: &str) -> Result<(), MessagePushError>;
}
