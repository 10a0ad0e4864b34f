//! Repository 実装
//!
//! ## 概要
//!
//! このモジュールはドメイン層の Repository trait の具体的な実装を提供します。
//!
//! ## 実装
//!
//! - `inmemory`: プロセス内の Mutex 保護ストレージを使った実装
//! - 将来的に: `postgres`, `redis` など

pub mod inmemory;

pub use inmemory::{
    InMemoryOtpRepository, InMemoryPostRepository, InMemoryPresenceRepository,
    InMemoryUserRepository,
};
