//! インメモリ Repository 実装
//!
//! アプリケーションの全データをプロセス内に保持します。
//! 再起動でデータは失われます。

pub mod otp;
pub mod post;
pub mod presence;
pub mod user;

pub use otp::InMemoryOtpRepository;
pub use post::InMemoryPostRepository;
pub use presence::InMemoryPresenceRepository;
pub use user::InMemoryUserRepository;
