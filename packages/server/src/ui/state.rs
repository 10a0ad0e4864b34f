//! Server state shared across handlers.

use std::sync::Arc;

use crate::domain::TokenIssuer;
use crate::usecase::{
    AnnounceIdentityUseCase, ConnectClientUseCase, CreatePostUseCase, DisconnectClientUseCase,
    GetFeedUseCase, GetPresenceUseCase, GetUserUseCase, LoginUseCase, RegisterAccountUseCase,
    RouteMessageUseCase, SendOtpUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectClientUseCase（接続受付のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// AnnounceIdentityUseCase（在席登録のユースケース）
    pub announce_identity_usecase: Arc<AnnounceIdentityUseCase>,
    /// RouteMessageUseCase（メッセージ配送のユースケース）
    pub route_message_usecase: Arc<RouteMessageUseCase>,
    /// DisconnectClientUseCase（切断処理のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// GetPresenceUseCase（在席一覧取得のユースケース）
    pub get_presence_usecase: Arc<GetPresenceUseCase>,
    /// SendOtpUseCase（OTP 送信のユースケース）
    pub send_otp_usecase: Arc<SendOtpUseCase>,
    /// RegisterAccountUseCase（アカウント登録のユースケース）
    pub register_account_usecase: Arc<RegisterAccountUseCase>,
    /// LoginUseCase（ログインのユースケース）
    pub login_usecase: Arc<LoginUseCase>,
    /// CreatePostUseCase（投稿作成のユースケース）
    pub create_post_usecase: Arc<CreatePostUseCase>,
    /// GetFeedUseCase（フィード取得のユースケース）
    pub get_feed_usecase: Arc<GetFeedUseCase>,
    /// GetUserUseCase（ユーザー取得のユースケース）
    pub get_user_usecase: Arc<GetUserUseCase>,
    /// TokenIssuer（トークン検証の抽象化、認証ガードが使用）
    pub token_issuer: Arc<dyn TokenIssuer>,
}
