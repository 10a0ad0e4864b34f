//! UseCase: クライアント切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - 切断した接続の在席記録の削除と送信チャンネルの解除
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：切断した接続の記録だけが削除される
//! - identity 未申告の接続の切断でもエラーにならないことを確認
//! - 切断後のブロードキャストが残りの接続に届くことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：在席登録済みクライアントの切断
//! - エッジケース：identity 未申告の接続の切断（削除 0 件）
//! - エッジケース：最後のクライアントの切断

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRecord, MessagePusher, PresenceRepository};

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn PresenceRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// クライアント切断を実行
    ///
    /// 在席台帳から該当する接続の記録をすべて削除し、送信チャンネルを
    /// 解除します。identity 未申告の接続（削除 0 件）でもエラーに
    /// なりません。どちらの場合も呼び出し側は在席リストを
    /// ブロードキャストします。
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 切断した接続の ID（Domain Model）
    ///
    /// # Returns
    ///
    /// 削除された在席記録の件数
    pub async fn execute(&self, connection_id: ConnectionId) -> usize {
        // 1. Repository から該当接続の在席記録を削除
        let removed = self.repository.unregister(&connection_id).await;

        // 2. MessagePusher から送信チャンネルを解除
        self.message_pusher
            .unregister_connection(&connection_id)
            .await;

        if removed > 0 {
            tracing::debug!(
                "Connection '{}' disconnected, {} presence record(s) removed",
                connection_id.as_str(),
                removed
            );
        } else {
            tracing::debug!(
                "Connection '{}' disconnected without a presence record",
                connection_id.as_str()
            );
        }

        removed
    }

    /// 在席リストを構築
    ///
    /// # Returns
    ///
    /// 在席台帳の全記録（Domain Model、登録順のまま）
    pub async fn build_presence_list(&self) -> Vec<ConnectionRecord> {
        self.repository.snapshot().await
    }

    /// 在席リストを残りの全クライアントにブロードキャスト
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{PresenceDirectory, UserId},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryPresenceRepository,
        },
    };
    use std::{collections::HashMap, sync::Arc};
    use tokio::sync::Mutex;

    fn create_test_repository() -> Arc<InMemoryPresenceRepository> {
        let directory = Arc::new(Mutex::new(PresenceDirectory::new()));
        Arc::new(InMemoryPresenceRepository::new(directory))
    }

    fn create_test_message_pusher() -> Arc<WebSocketMessagePusher> {
        let channels = Arc::new(Mutex::new(HashMap::new()));
        Arc::new(WebSocketMessagePusher::new(channels))
    }

    #[tokio::test]
    async fn test_disconnect_client_removes_record_and_channel() {
        // テスト項目: 切断した接続の在席記録と送信チャンネルが削除される
        // given (前提条件):
        let repository = create_test_repository();
        let message_pusher = create_test_message_pusher();
        let usecase = DisconnectClientUseCase::new(repository.clone(), message_pusher.clone());

        // alice (conn-1) と bob (conn-2) が在席
        let alice = UserId::new("alice".to_string()).unwrap();
        let bob = UserId::new("bob".to_string()).unwrap();
        let conn_alice = ConnectionId::new("conn-1".to_string()).unwrap();
        let conn_bob = ConnectionId::new("conn-2".to_string()).unwrap();
        let (tx1, _rx1) = tokio::sync::mpsc::unbounded_channel();
        let (tx2, _rx2) = tokio::sync::mpsc::unbounded_channel();
        message_pusher.register_connection(conn_alice.clone(), tx1).await;
        message_pusher.register_connection(conn_bob.clone(), tx2).await;
        repository.register(alice, conn_alice.clone()).await;
        repository.register(bob, conn_bob).await;

        // when (操作): alice の接続を切断
        let removed = usecase.execute(conn_alice.clone()).await;

        // then (期待する結果): 記録が 1 件削除され、チャンネルへの push が失敗する
        assert_eq!(removed, 1);
        assert_eq!(repository.count().await, 1);
        let push_result = message_pusher.push_to(&conn_alice, "late message").await;
        assert!(push_result.is_err());
    }

    #[tokio::test]
    async fn test_disconnect_unannounced_connection_is_silent_noop() {
        // テスト項目: identity 未申告の接続の切断が何も削除せずに成功する
        // given (前提条件):
        let repository = create_test_repository();
        let message_pusher = create_test_message_pusher();
        let usecase = DisconnectClientUseCase::new(repository.clone(), message_pusher.clone());

        // alice は在席、conn-silent は接続のみで未申告
        let alice = UserId::new("alice".to_string()).unwrap();
        let conn_alice = ConnectionId::new("conn-1".to_string()).unwrap();
        repository.register(alice, conn_alice).await;
        let silent = ConnectionId::new("conn-silent".to_string()).unwrap();
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        message_pusher.register_connection(silent.clone(), tx).await;

        // when (操作): 未申告の接続を切断
        let removed = usecase.execute(silent).await;

        // then (期待する結果): 削除 0 件、在席台帳は変化しない
        assert_eq!(removed, 0);
        assert_eq!(repository.count().await, 1);
    }

    #[tokio::test]
    async fn test_broadcast_after_disconnect_reaches_remaining_clients() {
        // テスト項目: 切断後のブロードキャストが残りの接続に届く
        // given (前提条件):
        let repository = create_test_repository();
        let message_pusher = create_test_message_pusher();
        let usecase = DisconnectClientUseCase::new(repository.clone(), message_pusher.clone());

        let alice = UserId::new("alice".to_string()).unwrap();
        let bob = UserId::new("bob".to_string()).unwrap();
        let conn_alice = ConnectionId::new("conn-1".to_string()).unwrap();
        let conn_bob = ConnectionId::new("conn-2".to_string()).unwrap();
        let (tx1, _rx1) = tokio::sync::mpsc::unbounded_channel();
        let (tx2, mut rx_bob) = tokio::sync::mpsc::unbounded_channel();
        message_pusher.register_connection(conn_alice.clone(), tx1).await;
        message_pusher.register_connection(conn_bob.clone(), tx2).await;
        repository.register(alice, conn_alice.clone()).await;
        repository.register(bob, conn_bob).await;

        // when (操作): alice を切断して在席リストをブロードキャスト
        usecase.execute(conn_alice).await;
        let result = usecase.broadcast_presence(r#"{"type":"getUsers"}"#).await;

        // then (期待する結果): bob の接続に届く
        assert!(result.is_ok());
        assert_eq!(rx_bob.recv().await.unwrap(), r#"{"type":"getUsers"}"#);
    }

    #[tokio::test]
    async fn test_disconnect_last_client_leaves_empty_directory() {
        // テスト項目: 最後のクライアントの切断で在席台帳が空になる
        // given (前提条件):
        let repository = create_test_repository();
        let message_pusher = create_test_message_pusher();
        let usecase = DisconnectClientUseCase::new(repository.clone(), message_pusher);

        let alice = UserId::new("alice".to_string()).unwrap();
        let conn_alice = ConnectionId::new("conn-1".to_string()).unwrap();
        repository.register(alice, conn_alice.clone()).await;

        // when (操作):
        let removed = usecase.execute(conn_alice).await;

        // then (期待する結果):
        assert_eq!(removed, 1);
        assert_eq!(repository.count().await, 0);
        assert!(usecase.build_presence_list().await.is_empty());
    }
}
