//! InMemory Post Repository 実装
//!
//! ドメイン層が定義する PostRepository trait の具体的な実装。
//! Mutex で保護した Vec をインメモリ DB として使用します。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Post, PostRepository};

/// インメモリ Post Repository 実装
#[derive(Default)]
pub struct InMemoryPostRepository {
    /// 投稿（追加順）
    posts: Mutex<Vec<Post>>,
}

impl InMemoryPostRepository {
    /// 新しい InMemoryPostRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: Post) {
        let mut posts = self.posts.lock().await;
        posts.push(post);
    }

    async fn list_newest_first(&self) -> Vec<Post> {
        let posts = self.posts.lock().await;
        posts.iter().rev().cloned().collect()
    }
}
