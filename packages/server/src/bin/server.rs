//! Social backend server with realtime presence and direct messaging.
//!
//! Serves the HTTP API (auth, posts, users) and the WebSocket endpoint that
//! tracks who is online and relays direct messages between connections.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin connect-server
//! cargo run --bin connect-server -- --host 0.0.0.0 --port 3000
//! ```

use std::{collections::HashMap, sync::Arc};

use clap::Parser;
use connect_server::{
    domain::PresenceDirectory,
    infrastructure::{
        image_store::InMemoryImageStore,
        mailer::LogMailSender,
        message_pusher::WebSocketMessagePusher,
        repository::{
            InMemoryOtpRepository, InMemoryPostRepository, InMemoryPresenceRepository,
            InMemoryUserRepository,
        },
        security::{Argon2CredentialHasher, JwtTokenIssuer},
    },
    ui::Server,
    usecase::{
        AnnounceIdentityUseCase, ConnectClientUseCase, CreatePostUseCase, DisconnectClientUseCase,
        GetFeedUseCase, GetPresenceUseCase, GetUserUseCase, LoginUseCase, RegisterAccountUseCase,
        RouteMessageUseCase, SendOtpUseCase,
    },
};
use connect_shared::logger::setup_logger;
use tokio::sync::Mutex;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Social backend server with realtime presence and messaging", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. MessagePusher
    // 3. Gateways
    // 4. UseCases
    // 5. Server

    // 1. Create Repositories (in-memory database)
    let directory = Arc::new(Mutex::new(PresenceDirectory::new()));
    let presence_repository = Arc::new(InMemoryPresenceRepository::new(directory));
    let user_repository = Arc::new(InMemoryUserRepository::new());
    let otp_repository = Arc::new(InMemoryOtpRepository::new());
    let post_repository = Arc::new(InMemoryPostRepository::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let pusher_channels = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(pusher_channels.clone()));

    // 3. Create Gateways (hashing, tokens, mail, images)
    // JWT secret comes from the environment, with a dev-only fallback
    let jwt_secret = std::env::var("CONNECT_JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("CONNECT_JWT_SECRET not set, using development secret");
        "connect-dev-secret".to_string()
    });
    let credential_hasher = Arc::new(Argon2CredentialHasher::new());
    let token_issuer = Arc::new(JwtTokenIssuer::new(jwt_secret.as_bytes()));
    let mail_sender = Arc::new(LogMailSender::new());
    let image_store = Arc::new(InMemoryImageStore::new());

    // 4. Create UseCases
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(message_pusher.clone()));
    let announce_identity_usecase = Arc::new(AnnounceIdentityUseCase::new(
        presence_repository.clone(),
        message_pusher.clone(),
    ));
    let route_message_usecase = Arc::new(RouteMessageUseCase::new(
        presence_repository.clone(),
        message_pusher.clone(),
    ));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(
        presence_repository.clone(),
        message_pusher.clone(),
    ));
    let get_presence_usecase = Arc::new(GetPresenceUseCase::new(presence_repository.clone()));
    let send_otp_usecase = Arc::new(SendOtpUseCase::new(
        user_repository.clone(),
        otp_repository.clone(),
        credential_hasher.clone(),
        mail_sender.clone(),
        image_store.clone(),
    ));
    let register_account_usecase = Arc::new(RegisterAccountUseCase::new(
        user_repository.clone(),
        otp_repository.clone(),
        credential_hasher.clone(),
    ));
    let login_usecase = Arc::new(LoginUseCase::new(
        user_repository.clone(),
        credential_hasher.clone(),
        token_issuer.clone(),
    ));
    let create_post_usecase = Arc::new(CreatePostUseCase::new(
        post_repository.clone(),
        user_repository.clone(),
        image_store.clone(),
    ));
    let get_feed_usecase = Arc::new(GetFeedUseCase::new(post_repository.clone()));
    let get_user_usecase = Arc::new(GetUserUseCase::new(user_repository.clone()));

    // 5. Create and run the server
    let server = Server::new(
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
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
