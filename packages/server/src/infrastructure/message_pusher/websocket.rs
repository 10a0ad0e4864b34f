//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの WebSocket `UnboundedSender` を管理
//! - 接続へのメッセージ送信（push_to, broadcast_all）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//!
//! これにより、「WebSocket の生成」と「メッセージの送信」が分離されます：
//! - UI 層: WebSocket 接続の受付、sender の生成
//! - Infrastructure 層: sender の管理、メッセージ送信
//!
//! チャンネルは接続単位（connection_id）で管理します。在席台帳（user_id と
//! connection_id の対応付け）とは独立しており、`addUser` を送っていない
//! 接続もブロードキャストを受信します。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// WebSocket を使った MessagePusher 実装
///
/// ## フィールド
///
/// - `channels`: 接続中の connection_id と対応する WebSocket sender のマップ
///
/// ## 使用例
///
/// ```ignore
/// let channels = Arc::new(Mutex::new(HashMap::new()));
/// let pusher = WebSocketMessagePusher::new(channels.clone());
///
/// // 接続に送信
/// pusher.push_to(&connection_id, "{\"type\":\"getMessage\",\"message\":\"Hello\"}").await?;
/// ```
pub struct WebSocketMessagePusher {
    /// 接続中の接続の WebSocket sender
    ///
    /// Key: connection_id (String)
    /// Value: PusherChannel
    channels: Arc<Mutex<HashMap<String, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    ///
    /// # 引数
    ///
    /// - `channels`: 接続中の接続の sender マップ
    pub fn new(channels: Arc<Mutex<HashMap<String, PusherChannel>>>) -> Self {
        Self { channels }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut channels = self.channels.lock().await;
        channels.insert(connection_id.as_str().to_string(), sender);
        tracing::debug!(
            "Connection '{}' registered to MessagePusher",
            connection_id.as_str()
        );
    }

    async fn unregister_connection(&self, connection_id: &ConnectionId) {
        let mut channels = self.channels.lock().await;
        channels.remove(connection_id.as_str());
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id.as_str()
        );
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let channels = self.channels.lock().await;

        if let Some(sender) = channels.get(connection_id.as_str()) {
            sender
                .send(content.to_string())
                .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed message to connection '{}'", connection_id.as_str());
            Ok(())
        } else {
            Err(MessagePushError::ConnectionNotFound(
                connection_id.as_str().to_string(),
            ))
        }
    }

    async fn broadcast_all(&self, content: &str) -> Result<(), MessagePushError> {
        let channels = self.channels.lock().await;

        for (connection_id, sender) in channels.iter() {
            // ブロードキャストでは一部の送信失敗を許容
            if let Err(e) = sender.send(content.to_string()) {
                tracing::warn!(
                    "Failed to push message to connection '{}': {}",
                    connection_id,
                    e
                );
            } else {
                tracing::debug!("Broadcasted message to connection '{}'", connection_id);
            }
        }

        Ok(())
    }
}
