//! 認証まわりの Gateway 実装
//!
//! ## 実装
//!
//! - `credential`: Argon2 によるハッシュ化と照合
//! - `token`: JWT (HS256) によるトークン発行と検証

pub mod credential;
pub mod token;

pub use credential::Argon2CredentialHasher;
pub use token::JwtTokenIssuer;
