//! UseCase: 投稿作成処理

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{ImageStore, ImageUpload, Post, PostRepository, Timestamp, UserId, UserRepository};

use super::error::CreatePostError;

/// 投稿画像の保存先フォルダ
const POST_IMAGE_FOLDER: &str = "posts";

/// 投稿作成のユースケース
pub struct CreatePostUseCase {
    /// Repository（投稿のデータアクセス層の抽象化）
    post_repository: Arc<dyn PostRepository>,
    /// Repository（ユーザーのデータアクセス層の抽象化）
    user_repository: Arc<dyn UserRepository>,
    /// ImageStore（画像保存の抽象化）
    image_store: Arc<dyn ImageStore>,
}

impl CreatePostUseCase {
    /// 新しい CreatePostUseCase を作成
    pub fn new(
        post_repository: Arc<dyn PostRepository>,
        user_repository: Arc<dyn UserRepository>,
        image_store: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            post_repository,
            user_repository,
            image_store,
        }
    }

    /// 投稿作成を実行
    ///
    /// 画像を保存して投稿を追加し、最新の投稿フィード全体を返します。
    ///
    /// # Arguments
    ///
    /// * `user_id` - 投稿者のユーザー ID（Domain Model）
    /// * `description` - 投稿の本文
    /// * `picture` - 投稿画像のアップロード内容
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Post>)` - 作成後の投稿フィード（新しい順）
    /// * `Err(CreatePostError)` - 作成失敗
    pub async fn execute(
        &self,
        user_id: UserId,
        description: String,
        picture: ImageUpload,
    ) -> Result<Vec<Post>, CreatePostError> {
        use connect_shared::time::get_utc_timestamp;

        // 1. 投稿者の存在チェック
        if self.user_repository.find_by_id(&user_id).await.is_none() {
            return Err(CreatePostError::UserNotFound(user_id.into_string()));
        }

        // 2. 投稿画像を保存
        let picture_path = self
            .image_store
            .store(POST_IMAGE_FOLDER, picture)
            .await
            .map_err(|e| CreatePostError::ImageStoreFailed(e.to_string()))?;

        // 3. 投稿を追加
        let post = Post {
            id: Uuid::new_v4().to_string(),
            user_id,
            description,
            picture_path,
            created_at: Timestamp::new(get_utc_timestamp()),
        };
        self.post_repository.insert(post).await;

        // 4. 最新のフィードを返す
        Ok(self.post_repository.list_newest_first().await)
    }
}
