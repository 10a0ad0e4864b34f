//! UseCase: OTP 送信処理（サインアップの第 1 段階）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendOtpUseCase::execute() メソッド
//! - OTP の生成・ハッシュ化・チャレンジ保存・画像保存・メール送信の一連の流れ
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：登録済みメールアドレスでは OTP を送信しない
//! - 生成される OTP が 4 桁（1000〜9999）であることを確認
//! - チャレンジには OTP の平文ではなくハッシュが保存されることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：未登録メールアドレスへの OTP 送信
//! - 異常系：登録済みメールアドレスでの送信試行
//! - エッジケース：OTP の値域の境界

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{
    CredentialHasher, Email, ImageStore, ImageUpload, MailSender, OtpChallenge, OtpRepository,
    Timestamp, UserRepository,
};

use super::error::SendOtpError;

/// OTP チャレンジの有効期間（1 時間）
const OTP_TTL_MILLIS: i64 = 3_600_000;

/// プロフィール画像の保存先フォルダ
const PROFILE_IMAGE_FOLDER: &str = "profiles";

/// OTP 送信の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpDispatch {
    /// 発行されたチャレンジの ID（登録時に提示する）
    pub otp_id: String,
    /// 保存されたプロフィール画像のパス
    pub picture_path: String,
}

/// OTP 送信のユースケース
pub struct SendOtpUseCase {
    /// Repository（ユーザーのデータアクセス層の抽象化）
    user_repository: Arc<dyn UserRepository>,
    /// Repository（OTP チャレンジのデータアクセス層の抽象化）
    otp_repository: Arc<dyn OtpRepository>,
    /// CredentialHasher（ハッシュ化の抽象化）
    credential_hasher: Arc<dyn CredentialHasher>,
    /// MailSender（メール送信の抽象化）
    mail_sender: Arc<dyn MailSender>,
    /// ImageStore（画像保存の抽象化）
    image_store: Arc<dyn ImageStore>,
}

impl SendOtpUseCase {
    /// 新しい SendOtpUseCase を作成
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        otp_repository: Arc<dyn OtpRepository>,
        credential_hasher: Arc<dyn CredentialHasher>,
        mail_sender: Arc<dyn MailSender>,
        image_store: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            user_repository,
            otp_repository,
            credential_hasher,
            mail_sender,
            image_store,
        }
    }

    /// OTP 送信を実行
    ///
    /// # Arguments
    ///
    /// * `email` - サインアップ希望者のメールアドレス（Domain Model）
    /// * `picture` - プロフィール画像のアップロード内容
    ///
    /// # Returns
    ///
    /// * `Ok(OtpDispatch)` - チャレンジ ID と画像の保存先パス
    /// * `Err(SendOtpError)` - 送信失敗
    pub async fn execute(
        &self,
        email: Email,
        picture: ImageUpload,
    ) -> Result<OtpDispatch, SendOtpError> {
        use connect_shared::time::get_utc_timestamp;

        // 1. メールアドレスの重複チェック
        if self.user_repository.find_by_email(&email).await.is_some() {
            return Err(SendOtpError::EmailTaken);
        }

        // 2. OTP を生成してハッシュ化（チャレンジには平文を残さない）
        let otp = generate_otp();
        let otp_hash = self
            .credential_hasher
            .hash(&otp)
            .map_err(|e| SendOtpError::HashFailed(e.to_string()))?;

        // 3. チャレンジを保存（有効期限 1 時間）
        let created_at = Timestamp::new(get_utc_timestamp());
        let challenge = OtpChallenge::new(
            Uuid::new_v4().to_string(),
            email.clone(),
            otp_hash,
            created_at,
            OTP_TTL_MILLIS,
        );
        let otp_id = challenge.id.clone();
        self.otp_repository.insert(challenge).await;

        // 4. プロフィール画像を保存
        let picture_path = self
            .image_store
            .store(PROFILE_IMAGE_FOLDER, picture)
            .await
            .map_err(|e| SendOtpError::ImageStoreFailed(e.to_string()))?;

        // 5. 認証メールを送信
        self.mail_sender
            .send_otp(&email, &otp)
            .await
            .map_err(|e| SendOtpError::MailFailed(e.to_string()))?;

        tracing::debug!("OTP challenge '{}' issued for '{}'", otp_id, email.as_str());

        Ok(OtpDispatch {
            otp_id,
            picture_path,
        })
    }
}

/// 4 桁の OTP を生成（1000〜9999）
fn generate_otp() -> String {
    use rand::Rng;

    rand::rng().random_range(1000..=9999).to_string()
}
