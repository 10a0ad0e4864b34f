//! InMemory Presence Repository 実装
//!
//! ドメイン層が定義する PresenceRepository trait の具体的な実装。
//! Mutex で保護した PresenceDirectory をインメモリ DB として使用します。
//!
//! ## 技術的負債
//!
//! ドメインモデル（`PresenceDirectory`）を直接ストレージとして使用しています。
//! InMemory 実装では許容される妥協ですが、Redis などの外部ストアを実装する
//! 際は DTO 変換層が必要になります。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, ConnectionRecord, PresenceDirectory, PresenceRepository, UserId,
};

/// インメモリ Presence Repository 実装
///
/// PresenceDirectory ドメインモデルを保持し、ドメイン層の PresenceRepository trait を
/// 実装します（依存性の逆転）。
pub struct InMemoryPresenceRepository {
    /// PresenceDirectory ドメインモデル
    directory: Arc<Mutex<PresenceDirectory>>,
}

impl InMemoryPresenceRepository {
    /// 新しい InMemoryPresenceRepository を作成
    pub fn new(directory: Arc<Mutex<PresenceDirectory>>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl PresenceRepository for InMemoryPresenceRepository {
    async fn register(&self, user_id: UserId, connection_id: ConnectionId) -> bool {
        let mut directory = self.directory.lock().await;
        directory.register(user_id, connection_id)
    }

    async fn unregister(&self, connection_id: &ConnectionId) -> usize {
        let mut directory = self.directory.lock().await;
        directory.unregister(connection_id)
    }

    async fn lookup(&self, user_id: &UserId) -> Option<ConnectionRecord> {
        let directory = self.directory.lock().await;
        directory.lookup(user_id).cloned()
    }

    async fn snapshot(&self) -> Vec<ConnectionRecord> {
        let directory = self.directory.lock().await;
        directory.snapshot()
    }

    async fn count(&self) -> usize {
        let directory = self.directory.lock().await;
        directory.len()
    }
}
