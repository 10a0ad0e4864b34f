//! UseCase: 投稿フィードの取得

use std::sync::Arc;

use crate::domain::{Post, PostRepository};

/// 投稿フィード取得のユースケース
pub struct GetFeedUseCase {
    /// Repository（投稿のデータアクセス層の抽象化）
    post_repository: Arc<dyn PostRepository>,
}

impl GetFeedUseCase {
    /// 新しい GetFeedUseCase を作成
    pub fn new(post_repository: Arc<dyn PostRepository>) -> Self {
        Self { post_repository }
    }

    /// 投稿フィードを取得（新しい順）
    pub async fn execute(&self) -> Vec<Post> {
        self.post_repository.list_newest_first().await
    }
}
