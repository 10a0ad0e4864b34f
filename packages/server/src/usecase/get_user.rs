//! UseCase: ユーザープロフィールの取得

use std::sync::Arc;

use crate::domain::{User, UserId, UserRepository};

use super::error::GetUserError;

/// ユーザープロフィール取得のユースケース
pub struct GetUserUseCase {
    /// Repository（ユーザーのデータアクセス層の抽象化）
    user_repository: Arc<dyn UserRepository>,
}

impl GetUserUseCase {
    /// 新しい GetUserUseCase を作成
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// ユーザープロフィールを取得
    ///
    /// # Arguments
    ///
    /// * `user_id` - 取得するユーザーの ID（Domain Model）
    pub async fn execute(&self, user_id: &UserId) -> Result<User, GetUserError> {
        self.user_repository
            .find_by_id(user_id)
            .await
            .ok_or_else(|| GetUserError::UserNotFound(user_id.as_str().to_string()))
    }
}
