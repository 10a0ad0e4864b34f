//! UseCase: ログイン処理

use std::sync::Arc;

use crate::domain::{CredentialHasher, Email, TokenIssuer, User, UserRepository};

use super::error::LoginError;

/// ログイン成功時に払い出されるセッション
#[derive(Debug, Clone)]
pub struct LoginSession {
    /// 署名済みアクセストークン
    pub token: String,
    /// ログインしたアカウント（Domain Model）
    pub user: User,
}

/// ログインのユースケース
pub struct LoginUseCase {
    /// Repository（ユーザーのデータアクセス層の抽象化）
    user_repository: Arc<dyn UserRepository>,
    /// CredentialHasher（ハッシュ化の抽象化）
    credential_hasher: Arc<dyn CredentialHasher>,
    /// TokenIssuer（トークン発行の抽象化）
    token_issuer: Arc<dyn TokenIssuer>,
}

impl LoginUseCase {
    /// 新しい LoginUseCase を作成
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        credential_hasher: Arc<dyn CredentialHasher>,
        token_issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            user_repository,
            credential_hasher,
            token_issuer,
        }
    }

    /// ログインを実行
    ///
    /// # Arguments
    ///
    /// * `email` - ログインするアカウントのメールアドレス（Domain Model）
    /// * `password` - ユーザーが入力したパスワード（平文）
    ///
    /// # Returns
    ///
    /// * `Ok(LoginSession)` - トークンとアカウント
    /// * `Err(LoginError)` - ログイン失敗
    pub async fn execute(&self, email: Email, password: String) -> Result<LoginSession, LoginError> {
        // 1. アカウントの検索
        let Some(user) = self.user_repository.find_by_email(&email).await else {
            return Err(LoginError::UserNotFound);
        };

        // 2. パスワードの照合
        let password_matches = self
            .credential_hasher
            .verify(&password, &user.password_hash)
            .map_err(|e| LoginError::HashFailed(e.to_string()))?;
        if !password_matches {
            return Err(LoginError::WrongPassword);
        }

        // 3. アクセストークンの発行
        let token = self
            .token_issuer
            .issue(&user.id)
            .map_err(|e| LoginError::TokenFailed(e.to_string()))?;

        tracing::debug!("User '{}' logged in", user.id.as_str());

        Ok(LoginSession { token, user })
    }
}
