//! ドメイン層
//!
//! 値オブジェクト、エンティティ、および Infrastructure 層が実装する
//! インターフェース（Repository / MessagePusher / Gateway）を定義します。

pub mod entity;
pub mod gateway;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{ConnectionRecord, OtpChallenge, Post, PresenceDirectory, User};
pub use gateway::{
    CredentialError, CredentialHasher, ImageStore, ImageStoreError, ImageUpload, MailError,
    MailSender, TokenError, TokenIssuer,
};
pub use message_pusher::{MessagePushError, MessagePusher, PusherChannel};
pub use repository::{
    OtpRepository, PostRepository, PresenceRepository, RepositoryError, UserRepository,
};
pub use value_object::{
    ConnectionId, ConnectionIdFactory, ConversationId, DomainError, Email, MessageBody, Timestamp,
    UserId, UserIdFactory,
};
