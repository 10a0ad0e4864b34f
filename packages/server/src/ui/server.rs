//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::domain::TokenIssuer;
use crate::usecase::{
    AnnounceIdentityUseCase, ConnectClientUseCase, CreatePostUseCase, DisconnectClientUseCase,
    GetFeedUseCase, GetPresenceUseCase, GetUserUseCase, LoginUseCase, RegisterAccountUseCase,
    RouteMessageUseCase, SendOtpUseCase,
};

use super::{
    handler::{
        create_post, debug_presence, get_feed, get_user, health_check, login, register, send_otp,
        websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Social backend server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_client_usecase,
///     announce_identity_usecase,
///     route_message_usecase,
///     disconnect_client_usecase,
///     get_presence_usecase,
///     send_otp_usecase,
///     register_account_usecase,
///     login_usecase,
///     create_post_usecase,
///     get_feed_usecase,
///     get_user_usecase,
///     token_issuer,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// ConnectClientUseCase（接続受付のユースケース）
    connect_client_usecase: Arc<ConnectClientUseCase>,
    /// AnnounceIdentityUseCase（在席登録のユースケース）
    announce_identity_usecase: Arc<AnnounceIdentityUseCase>,
    /// RouteMessageUseCase（メッセージ配送のユースケース）
    route_message_usecase: Arc<RouteMessageUseCase>,
    /// DisconnectClientUseCase（切断処理のユースケース）
    disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// GetPresenceUseCase（在席一覧取得のユースケース）
    get_presence_usecase: Arc<GetPresenceUseCase>,
    /// SendOtpUseCase（OTP 送信のユースケース）
    send_otp_usecase: Arc<SendOtpUseCase>,
    /// RegisterAccountUseCase（アカウント登録のユースケース）
    register_account_usecase: Arc<RegisterAccountUseCase>,
    /// LoginUseCase（ログインのユースケース）
    login_usecase: Arc<LoginUseCase>,
    /// CreatePostUseCase（投稿作成のユースケース）
    create_post_usecase: Arc<CreatePostUseCase>,
    /// GetFeedUseCase（フィード取得のユースケース）
    get_feed_usecase: Arc<GetFeedUseCase>,
    /// GetUserUseCase（ユーザー取得のユースケース）
    get_user_usecase: Arc<GetUserUseCase>,
    /// TokenIssuer（トークン検証の抽象化）
    token_issuer: Arc<dyn TokenIssuer>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `connect_client_usecase` - UseCase for accepting connections
    /// * `announce_identity_usecase` - UseCase for presence registration
    /// * `route_message_usecase` - UseCase for direct message delivery
    /// * `disconnect_client_usecase` - UseCase for disconnection
    /// * `get_presence_usecase` - UseCase for reading the presence directory
    /// * `send_otp_usecase` - UseCase for OTP dispatch
    /// * `register_account_usecase` - UseCase for account registration
    /// * `login_usecase` - UseCase for login
    /// * `create_post_usecase` - UseCase for post creation
    /// * `get_feed_usecase` - UseCase for reading the post feed
    /// * `get_user_usecase` - UseCase for reading a user profile
    /// * `token_issuer` - Token verification for guarded endpoints
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        announce_identity_usecase: Arc<AnnounceIdentityUseCase>,
        route_message_usecase: Arc<RouteMessageUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        get_presence_usecase: Arc<GetPresenceUseCase>,
        send_otp_usecase: Arc<SendOtpUseCase>,
        register_account_usecase: Arc<RegisterAccountUseCase>,
        login_usecase: Arc<LoginUseCase>,
        create_post_usecase: Arc<CreatePostUseCase>,
        get_feed_usecase: Arc<GetFeedUseCase>,
        get_user_usecase: Arc<GetUserUseCase>,
        token_issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            connect_client_usecase,
            announce_identity_usecase,
            route_message_usecase,
            disconnect_client_usecase,
            get_presence_usecase,
            send_otp_usecase,
            register_account_usecase,
            login_usecase,
            create_post_usecase,
            get_feed_usecase,
            get_user_usecase,
            token_issuer,
        }
    }

    /// Build the axum application router
    pub fn build_router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_client_usecase: self.connect_client_usecase,
            announce_identity_usecase: self.announce_identity_usecase,
            route_message_usecase: self.route_message_usecase,
            disconnect_client_usecase: self.disconnect_client_usecase,
            get_presence_usecase: self.get_presence_usecase,
            send_otp_usecase: self.send_otp_usecase,
            register_account_usecase: self.register_account_usecase,
            login_usecase: self.login_usecase,
            create_post_usecase: self.create_post_usecase,
            get_feed_usecase: self.get_feed_usecase,
            get_user_usecase: self.get_user_usecase,
            token_issuer: self.token_issuer,
        });

        // ブラウザのフロントエンドから直接叩くため CORS は全許可
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        // Define handlers
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/debug/presence", get(debug_presence))
            .route("/api/health", get(health_check))
            .route("/auth/sendOTP", post(send_otp))
            .route("/auth/register", post(register))
            .route("/auth/login", post(login))
            .route("/posts", post(create_post).get(get_feed))
            .route("/users/{user_id}", get(get_user))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(app_state)
    }

    /// Run the social backend server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.build_router();

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Social backend server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
