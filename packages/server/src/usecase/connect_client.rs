//! UseCase: クライアント接続処理

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel};

/// クライアント接続のユースケース
///
/// WebSocket 接続の確立時に送信チャンネルを MessagePusher へ登録します。
/// 在席台帳への登録はここでは行いません。クライアントが `addUser` で
/// 自分の identity を申告するまで、接続は「在席未申告」のまま
/// ブロードキャストのみを受信します。
pub struct ConnectClientUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// クライアント接続を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 接続ごとに採番された ID（Domain Model）
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    pub async fn execute(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.message_pusher
            .register_connection(connection_id, sender)
            .await;
    }
}
