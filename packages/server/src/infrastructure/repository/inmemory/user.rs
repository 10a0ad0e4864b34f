//! InMemory User Repository 実装
//!
//! ドメイン層が定義する UserRepository trait の具体的な実装。
//! Mutex で保護した Vec をインメモリ DB として使用します。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Email, RepositoryError, User, UserId, UserRepository};

/// インメモリ User Repository 実装
#[derive(Default)]
pub struct InMemoryUserRepository {
    /// 登録済みアカウント（登録順）
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    /// 新しい InMemoryUserRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::DuplicateEmail(
                user.email.as_str().to_string(),
            ));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &Email) -> Option<User> {
        let users = self.users.lock().await;
        users.iter().find(|u| &u.email == email).cloned()
    }

    async fn find_by_id(&self, id: &UserId) -> Option<User> {
        let users = self.users.lock().await;
        users.iter().find(|u| &u.id == id).cloned()
    }
}
