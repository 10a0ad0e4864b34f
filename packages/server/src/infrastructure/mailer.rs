//! MailSender 実装
//!
//! SMTP 連携は持たず、送信内容を構造化ログに出す開発用の実装です。
//! 本番のメール基盤につなぐ場合はこの trait の別実装を追加します。

use async_trait::async_trait;

use crate::domain::{Email, MailError, MailSender};

/// ログ出力による MailSender 実装
#[derive(Default)]
pub struct LogMailSender;

impl LogMailSender {
    /// 新しい LogMailSender を作成
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MailSender for LogMailSender {
    async fn send_otp(&self, to: &Email, otp: &str) -> Result<(), MailError> {
        tracing::info!(
            "Verification mail to '{}': your one-time password is {}",
            to.as_str(),
            otp
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_otp_always_succeeds() {
        // テスト項目: ログ実装のメール送信は常に成功する
        // given (前提条件):
        let mailer = LogMailSender::new();

        // when (操作):
        let to = Email::new("alice@example.com".to_string()).unwrap();
        let result = mailer.send_otp(&to, "1234").await;

        // then (期待する結果):
        assert!(result.is_ok());
    }
}
