//! UseCase 層
//!
//! Domain Model を組み合わせてアプリケーションの操作を実装します。
//! Repository や MessagePusher などの抽象化（トレイト）にのみ依存し、
//! インフラの具象型には依存しません。

pub mod error;

mod announce_identity;
mod connect_client;
mod create_post;
mod disconnect_client;
mod get_feed;
mod get_presence;
mod get_user;
mod login;
mod register_account;
mod route_message;
mod send_otp;

pub use announce_identity::AnnounceIdentityUseCase;
pub use connect_client::ConnectClientUseCase;
pub use create_post::CreatePostUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{CreatePostError, GetUserError, LoginError, RegisterError, SendOtpError};
pub use get_feed::GetFeedUseCase;
pub use get_presence::GetPresenceUseCase;
pub use get_user::GetUserUseCase;
pub use login::{LoginSession, LoginUseCase};
pub use register_account::{RegisterAccountUseCase, RegisterInput};
pub use route_message::{DeliveryOutcome, RouteMessageUseCase};
pub use send_otp::{OtpDispatch, SendOtpUseCase};
