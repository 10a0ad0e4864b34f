//! UseCase: アカウント登録処理（サインアップの第 2 段階）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RegisterAccountUseCase::execute() メソッド
//! - OTP チャレンジの検証・消費とアカウントの作成
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：正しい OTP を提示したときだけアカウントが作られる
//! - 期限切れチャレンジが削除され、再利用できないことを確認
//! - 成功したチャレンジが消費され、同じ otp_id で再登録できないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：有効な OTP でのアカウント登録
//! - 異常系：OTP 入力の欠落、存在しない otp_id、期限切れ、OTP 不一致
//! - エッジケース：チャレンジ発行後に同じメールアドレスが登録済みになった場合

use std::sync::Arc;

use crate::domain::{
    CredentialHasher, Email, OtpRepository, Timestamp, User, UserIdFactory, UserRepository,
};

use super::error::RegisterError;

/// アカウント登録の入力
#[derive(Debug, Clone)]
pub struct RegisterInput {
    /// OTP 送信時に発行されたチャレンジ ID
    pub otp_id: String,
    /// ユーザーが入力した OTP（平文）
    pub otp: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    /// パスワード（平文、保存前にハッシュ化される）
    pub password: String,
    pub friends: Vec<String>,
    pub location: String,
    pub occupation: String,
    /// OTP 送信時に保存されたプロフィール画像のパス
    pub picture_path: String,
}

/// アカウント登録のユースケース
pub struct RegisterAccountUseCase {
    /// Repository（ユーザーのデータアクセス層の抽象化）
    user_repository: Arc<dyn UserRepository>,
    /// Repository（OTP チャレンジのデータアクセス層の抽象化）
    otp_repository: Arc<dyn OtpRepository>,
    /// CredentialHasher（ハッシュ化の抽象化）
    credential_hasher: Arc<dyn CredentialHasher>,
}

impl RegisterAccountUseCase {
    /// 新しい RegisterAccountUseCase を作成
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        otp_repository: Arc<dyn OtpRepository>,
        credential_hasher: Arc<dyn CredentialHasher>,
    ) -> Self {
        Self {
            user_repository,
            otp_repository,
            credential_hasher,
        }
    }

    /// アカウント登録を実行
    ///
    /// # Arguments
    ///
    /// * `input` - 登録フォームの入力一式
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - 作成されたアカウント（Domain Model）
    /// * `Err(RegisterError)` - 登録失敗
    pub async fn execute(&self, input: RegisterInput) -> Result<User, RegisterError> {
        use connect_shared::time::get_utc_timestamp;

        // 1. OTP 入力の存在チェック
        if input.otp_id.is_empty() || input.otp.is_empty() {
            return Err(RegisterError::MissingOtp);
        }

        // 2. チャレンジの取得
        let Some(challenge) = self.otp_repository.find(&input.otp_id).await else {
            return Err(RegisterError::ChallengeNotFound);
        };

        // 3. 有効期限チェック（期限切れのチャレンジはここで削除する）
        let now = Timestamp::new(get_utc_timestamp());
        if challenge.is_expired(now) {
            self.otp_repository.delete(&input.otp_id).await;
            return Err(RegisterError::OtpExpired);
        }

        // 4. OTP の照合（不一致の場合はチャレンジを残して再入力を許す）
        let otp_matches = self
            .credential_hasher
            .verify(&input.otp, &challenge.otp_hash)
            .map_err(|e| RegisterError::HashFailed(e.to_string()))?;
        if !otp_matches {
            return Err(RegisterError::InvalidOtp);
        }

        // 5. チャレンジを消費（同じ otp_id での再登録を防ぐ）
        self.otp_repository.delete(&input.otp_id).await;

        // 6. パスワードをハッシュ化してアカウントを作成
        let password_hash = self
            .credential_hasher
            .hash(&input.password)
            .map_err(|e| RegisterError::HashFailed(e.to_string()))?;
        let user = User {
            id: UserIdFactory::generate(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password_hash,
            picture_path: input.picture_path,
            friends: input.friends,
            location: input.location,
            occupation: input.occupation,
            viewed_profile: random_profile_counter(),
            impressions: random_profile_counter(),
            created_at: now,
        };

        // insert の失敗はメールアドレスの重複のみ
        let created = self
            .user_repository
            .insert(user)
            .await
            .map_err(|_| RegisterError::EmailTaken)?;

        tracing::debug!("Account created for '{}'", created.email.as_str());

        Ok(created)
    }
}

/// プロフィール閲覧数の初期値（0〜9999 のランダム値）
fn random_profile_counter() -> u32 {
    use rand::Rng;

    rand::rng().random_range(0..10000)
}
