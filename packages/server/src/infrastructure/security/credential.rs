//! Argon2 を使った CredentialHasher 実装
//!
//! パスワードと OTP のハッシュ化に使用します。ソルトは生成ごとに
//! ランダムで、ハッシュ文字列は PHC string format で保存されます。

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::domain::{CredentialError, CredentialHasher};

/// Argon2 を使った CredentialHasher 実装
#[derive(Default)]
pub struct Argon2CredentialHasher;

impl Argon2CredentialHasher {
    /// 新しい Argon2CredentialHasher を作成
    pub fn new() -> Self {
        Self
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, plaintext: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| CredentialError::HashFailed(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, CredentialError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| CredentialError::MalformedHash(e.to_string()))?;
        match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(CredentialError::MalformedHash(e.to_string())),
        }
    }
}
