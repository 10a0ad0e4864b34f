//! ImageStore 実装
//!
//! アップロードされた画像をプロセス内に保持する開発用の実装です。
//! 保存先パスは `<folder>/<uuid>` の形式で採番します。
//! blob ストレージにつなぐ場合はこの trait の別実装を追加します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{ImageStore, ImageStoreError, ImageUpload};

/// インメモリ ImageStore 実装
#[derive(Default)]
pub struct InMemoryImageStore {
    /// 保存済み画像
    ///
    /// Key: 保存先パス（`<folder>/<uuid>`）
    /// Value: ImageUpload
    images: Mutex<HashMap<String, ImageUpload>>,
}

impl InMemoryImageStore {
    /// 新しい InMemoryImageStore を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存済み画像を取得
    pub async fn fetch(&self, path: &str) -> Option<ImageUpload> {
        let images = self.images.lock().await;
        images.get(path).cloned()
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn store(&self, folder: &str, upload: ImageUpload) -> Result<String, ImageStoreError> {
        let path = format!("{}/{}", folder, Uuid::new_v4());
        let mut images = self.images.lock().await;
        images.insert(path.clone(), upload);
        tracing::debug!("Stored image at '{}'", path);
        Ok(path)
    }
}
