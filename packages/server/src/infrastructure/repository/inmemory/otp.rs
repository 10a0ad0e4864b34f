//! InMemory OTP Repository 実装
//!
//! ドメイン層が定義する OtpRepository trait の具体的な実装。
//! Mutex で保護した HashMap をインメモリ DB として使用します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{OtpChallenge, OtpRepository};

/// インメモリ OTP Repository 実装
#[derive(Default)]
pub struct InMemoryOtpRepository {
    /// 発行済みチャレンジ
    ///
    /// Key: チャレンジ ID
    /// Value: OtpChallenge
    challenges: Mutex<HashMap<String, OtpChallenge>>,
}

impl InMemoryOtpRepository {
    /// 新しい InMemoryOtpRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OtpRepository for InMemoryOtpRepository {
    async fn insert(&self, challenge: OtpChallenge) {
        let mut challenges = self.challenges.lock().await;
        challenges.insert(challenge.id.clone(), challenge);
    }

    async fn find(&self, id: &str) -> Option<OtpChallenge> {
        let challenges = self.challenges.lock().await;
        challenges.get(id).cloned()
    }

    async fn delete(&self, id: &str) {
        let mut challenges = self.challenges.lock().await;
        challenges.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Email, Timestamp};

    fn create_test_challenge(id: &str) -> OtpChallenge {
        OtpChallenge::new(
            id.to_string(),
            Email::new("alice@example.com".to_string()).unwrap(),
            "hashed:1234".to_string(),
            Timestamp::new(0),
            3_600_000,
        )
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        // テスト項目: 保存したチャレンジを ID で検索できる
        // given (前提条件):
        let repo = InMemoryOtpRepository::new();

        // when (操作):
        repo.insert(create_test_challenge("challenge-1")).await;
        let found = repo.find("challenge-1").await;

        // then (期待する結果):
        assert_eq!(found.unwrap().otp_hash, "hashed:1234");
    }

    #[tokio::test]
    async fn test_delete_removes_challenge() {
        // テスト項目: チャレンジを削除すると検索できなくなる
        // given (前提条件):
        let repo = InMemoryOtpRepository::new();
        repo.insert(create_test_challenge("challenge-1")).await;

        // when (操作):
        repo.delete("challenge-1").await;

        // then (期待する結果):
        assert!(repo.find("challenge-1").await.is_none());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_idempotent() {
        // テスト項目: 存在しないチャレンジの削除はエラーにならない（冪等性）
        // given (前提条件):
        let repo = InMemoryOtpRepository::new();

        // when (操作) / then (期待する結果): panic しない
        repo.delete("no-such-id").await;
    }
}
