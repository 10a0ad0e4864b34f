//! JWT (HS256) を使った TokenIssuer 実装

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::{TokenError, TokenIssuer, UserId};

/// アクセストークンの有効期間（24 時間）
const TOKEN_TTL_SECONDS: i64 = 86_400;

/// JWT のクレーム
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// 主体（ユーザー ID）
    sub: String,
    /// 発行時刻（UNIX 秒）
    iat: i64,
    /// 有効期限（UNIX 秒）
    exp: i64,
}

/// JWT を使った TokenIssuer 実装
pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtTokenIssuer {
    /// 新しい JwtTokenIssuer を作成
    ///
    /// # 引数
    ///
    /// - `secret`: HS256 の署名鍵
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user_id: &UserId) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.as_str().to_string(),
            iat: now,
            exp: now + TOKEN_TTL_SECONDS,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::IssueFailed(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| TokenError::Invalid)?;
        UserId::new(token_data.claims.sub).map_err(|_| TokenError::Invalid)
    }
}
