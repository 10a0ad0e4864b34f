//! UseCase: 在席台帳の参照

use std::sync::Arc;

use crate::domain::{ConnectionRecord, PresenceRepository};

/// 在席台帳の現在の状態を取得するユースケース
///
/// デバッグ用 HTTP エンドポイントから利用します。
pub struct GetPresenceUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn PresenceRepository>,
}

impl GetPresenceUseCase {
    /// 新しい GetPresenceUseCase を作成
    pub fn new(repository: Arc<dyn PresenceRepository>) -> Self {
        Self { repository }
    }

    /// 在席台帳の全記録を取得
    pub async fn execute(&self) -> Vec<ConnectionRecord> {
        self.repository.snapshot().await
    }
}
