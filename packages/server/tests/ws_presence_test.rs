//! Integration tests for the realtime channel: presence announcements,
//! full-snapshot broadcasts, direct message routing, and disconnects.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;

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

type WsStream = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;
type WsWrite = futures_util::stream::SplitSink<WsStream, Message>;
type WsRead = futures_util::stream::SplitStream<WsStream>;

/// Helper: start the server on a random port and return (base_url, ws_url).
async fn start_test_server() -> (String, String) {
    let directory = Arc::new(Mutex::new(PresenceDirectory::new()));
    let presence_repository = Arc::new(InMemoryPresenceRepository::new(directory));
    let user_repository = Arc::new(InMemoryUserRepository::new());
    let otp_repository = Arc::new(InMemoryOtpRepository::new());
    let post_repository = Arc::new(InMemoryPostRepository::new());

    let pusher_channels = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(pusher_channels));

    let credential_hasher = Arc::new(Argon2CredentialHasher::new());
    let token_issuer = Arc::new(JwtTokenIssuer::new(b"integration-test-secret"));
    let mail_sender = Arc::new(LogMailSender::new());
    let image_store = Arc::new(InMemoryImageStore::new());

    let server = Server::new(
        Arc::new(ConnectClientUseCase::new(message_pusher.clone())),
        Arc::new(AnnounceIdentityUseCase::new(
            presence_repository.clone(),
            message_pusher.clone(),
        )),
        Arc::new(RouteMessageUseCase::new(
            presence_repository.clone(),
            message_pusher.clone(),
        )),
        Arc::new(DisconnectClientUseCase::new(
            presence_repository.clone(),
            message_pusher.clone(),
        )),
        Arc::new(GetPresenceUseCase::new(presence_repository.clone())),
        Arc::new(SendOtpUseCase::new(
            user_repository.clone(),
            otp_repository.clone(),
            credential_hasher.clone(),
            mail_sender.clone(),
            image_store.clone(),
        )),
        Arc::new(RegisterAccountUseCase::new(
            user_repository.clone(),
            otp_repository.clone(),
            credential_hasher.clone(),
        )),
        Arc::new(LoginUseCase::new(
            user_repository.clone(),
            credential_hasher.clone(),
            token_issuer.clone(),
        )),
        Arc::new(CreatePostUseCase::new(
            post_repository.clone(),
            user_repository.clone(),
            image_store.clone(),
        )),
        Arc::new(GetFeedUseCase::new(post_repository.clone())),
        Arc::new(GetUserUseCase::new(user_repository.clone())),
        token_issuer,
    );
    let app = server.build_router();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), format!("ws://{}/ws", addr))
}

/// Connect a WebSocket client and split it into write and read halves.
async fn connect_client(ws_url: &str) -> (WsWrite, WsRead) {
    let (ws_stream, _) = tokio_tungstenite::connect_async(ws_url)
        .await
        .expect("Failed to connect to WebSocket");
    ws_stream.split()
}

/// Send a JSON value as a text frame.
async fn send_json(write: &mut WsWrite, value: serde_json::Value) {
    write
        .send(Message::Text(value.to_string().into()))
        .await
        .expect("Failed to send frame");
}

/// Read the next text frame and parse it as JSON.
async fn recv_json(read: &mut WsRead) -> serde_json::Value {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(2), read.next())
            .await
            .expect("Expected a frame within timeout")
            .expect("Stream ended unexpectedly")
            .expect("WebSocket error");
        if let Message::Text(text) = msg {
            return serde_json::from_str(&text).expect("Frame is not valid JSON");
        }
    }
}

/// Assert that no frame arrives within the given window.
async fn assert_silent(read: &mut WsRead, millis: u64) {
    let result = tokio::time::timeout(Duration::from_millis(millis), read.next()).await;
    assert!(result.is_err(), "Expected no frame, got: {:?}", result);
}

#[tokio::test]
async fn test_connect_alone_receives_nothing() {
    let (_base_url, ws_url) = start_test_server().await;
    let (_write, mut read) = connect_client(&ws_url).await;

    // Nothing is pushed on connect; broadcasts only follow announces
    // and disconnects
    assert_silent(&mut read, 300).await;
}

#[tokio::test]
async fn test_announce_broadcasts_to_every_connection() {
    let (_base_url, ws_url) = start_test_server().await;
    let (mut alice_write, mut alice_read) = connect_client(&ws_url).await;
    let (_bob_write, mut bob_read) = connect_client(&ws_url).await;

    send_json(&mut alice_write, json!({"type": "addUser", "userId": "alice"})).await;

    // Both connections receive the full snapshot, including bob who
    // never announced an identity
    let alice_view = recv_json(&mut alice_read).await;
    let bob_view = recv_json(&mut bob_read).await;

    for view in [&alice_view, &bob_view] {
        assert_eq!(view["type"], "getUsers");
        let users = view["users"].as_array().expect("users should be an array");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["userId"], "alice");
        let connection_id = users[0]["connectionId"].as_str().unwrap();
        assert!(!connection_id.is_empty());
    }
}

#[tokio::test]
async fn test_duplicate_announce_is_ignored_but_still_broadcast() {
    let (_base_url, ws_url) = start_test_server().await;
    let (mut first_write, mut first_read) = connect_client(&ws_url).await;
    let (mut second_write, mut second_read) = connect_client(&ws_url).await;

    send_json(&mut first_write, json!({"type": "addUser", "userId": "alice"})).await;
    let snapshot = recv_json(&mut first_read).await;
    let original_connection = snapshot["users"][0]["connectionId"]
        .as_str()
        .unwrap()
        .to_string();
    recv_json(&mut second_read).await;

    // The same user announces again from a second connection
    send_json(&mut second_write, json!({"type": "addUser", "userId": "alice"})).await;

    // The broadcast fires anyway, and the directory keeps the first entry
    let first_view = recv_json(&mut first_read).await;
    let second_view = recv_json(&mut second_read).await;
    for view in [&first_view, &second_view] {
        let users = view["users"].as_array().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["userId"], "alice");
        assert_eq!(users[0]["connectionId"], original_connection.as_str());
    }
}

#[tokio::test]
async fn test_direct_message_reaches_only_the_receiver() {
    let (_base_url, ws_url) = start_test_server().await;
    let (mut alice_write, mut alice_read) = connect_client(&ws_url).await;
    let (mut bob_write, mut bob_read) = connect_client(&ws_url).await;
    let (_watcher_write, mut watcher_read) = connect_client(&ws_url).await;

    send_json(&mut alice_write, json!({"type": "addUser", "userId": "alice"})).await;
    recv_json(&mut alice_read).await;
    recv_json(&mut bob_read).await;
    recv_json(&mut watcher_read).await;

    send_json(&mut bob_write, json!({"type": "addUser", "userId": "bob"})).await;
    recv_json(&mut alice_read).await;
    recv_json(&mut bob_read).await;
    recv_json(&mut watcher_read).await;

    send_json(
        &mut alice_write,
        json!({
            "type": "sendMessage",
            "conversationId": "convo-1",
            "senderId": "alice",
            "receiverId": "bob",
            "message": "hello bob"
        }),
    )
    .await;

    // Only bob's connection receives the message; the receiver is implicit
    let delivery = recv_json(&mut bob_read).await;
    assert_eq!(delivery["type"], "getMessage");
    assert_eq!(delivery["conversationId"], "convo-1");
    assert_eq!(delivery["senderId"], "alice");
    assert_eq!(delivery["message"], "hello bob");
    assert!(delivery.get("receiverId").is_none());

    assert_silent(&mut alice_read, 300).await;
    assert_silent(&mut watcher_read, 300).await;
}

#[tokio::test]
async fn test_message_to_absent_user_is_dropped_silently() {
    let (_base_url, ws_url) = start_test_server().await;
    let (mut alice_write, mut alice_read) = connect_client(&ws_url).await;

    send_json(&mut alice_write, json!({"type": "addUser", "userId": "alice"})).await;
    recv_json(&mut alice_read).await;

    send_json(
        &mut alice_write,
        json!({
            "type": "sendMessage",
            "conversationId": "convo-1",
            "senderId": "alice",
            "receiverId": "ghost",
            "message": "anyone there?"
        }),
    )
    .await;

    // No delivery and no error frame
    assert_silent(&mut alice_read, 300).await;

    // The connection is still healthy: a later broadcast arrives
    let (mut bob_write, mut bob_read) = connect_client(&ws_url).await;
    send_json(&mut bob_write, json!({"type": "addUser", "userId": "bob"})).await;
    let view = recv_json(&mut alice_read).await;
    assert_eq!(view["type"], "getUsers");
    assert_eq!(view["users"].as_array().unwrap().len(), 2);
    recv_json(&mut bob_read).await;
}

#[tokio::test]
async fn test_disconnect_removes_user_and_broadcasts() {
    let (_base_url, ws_url) = start_test_server().await;
    let (mut alice_write, mut alice_read) = connect_client(&ws_url).await;
    let (mut bob_write, mut bob_read) = connect_client(&ws_url).await;

    send_json(&mut alice_write, json!({"type": "addUser", "userId": "alice"})).await;
    recv_json(&mut alice_read).await;
    recv_json(&mut bob_read).await;
    send_json(&mut bob_write, json!({"type": "addUser", "userId": "bob"})).await;
    recv_json(&mut alice_read).await;
    recv_json(&mut bob_read).await;

    // Alice's transport closes
    alice_write
        .send(Message::Close(None))
        .await
        .expect("Failed to send close");

    // Bob receives the shrunken snapshot
    let view = recv_json(&mut bob_read).await;
    assert_eq!(view["type"], "getUsers");
    let users = view["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["userId"], "bob");
}

#[tokio::test]
async fn test_unannounced_disconnect_still_broadcasts() {
    let (_base_url, ws_url) = start_test_server().await;
    let (mut alice_write, mut alice_read) = connect_client(&ws_url).await;
    let (mut watcher_write, _watcher_read) = connect_client(&ws_url).await;

    send_json(&mut alice_write, json!({"type": "addUser", "userId": "alice"})).await;
    recv_json(&mut alice_read).await;

    // The watcher leaves without ever announcing an identity
    watcher_write
        .send(Message::Close(None))
        .await
        .expect("Failed to send close");

    // The broadcast fires anyway, with the directory unchanged
    let view = recv_json(&mut alice_read).await;
    assert_eq!(view["type"], "getUsers");
    let users = view["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["userId"], "alice");
}

#[tokio::test]
async fn test_snapshot_preserves_announce_order() {
    let (_base_url, ws_url) = start_test_server().await;
    let (mut c1_write, mut c1_read) = connect_client(&ws_url).await;
    let (mut c2_write, mut c2_read) = connect_client(&ws_url).await;
    let (mut c3_write, mut c3_read) = connect_client(&ws_url).await;

    // Announce in a non-alphabetical order
    send_json(&mut c1_write, json!({"type": "addUser", "userId": "charlie"})).await;
    recv_json(&mut c1_read).await;
    recv_json(&mut c2_read).await;
    recv_json(&mut c3_read).await;
    send_json(&mut c2_write, json!({"type": "addUser", "userId": "alice"})).await;
    recv_json(&mut c1_read).await;
    recv_json(&mut c2_read).await;
    recv_json(&mut c3_read).await;
    send_json(&mut c3_write, json!({"type": "addUser", "userId": "bob"})).await;

    // The snapshot lists users in announce order, not sorted
    let view = recv_json(&mut c1_read).await;
    let names: Vec<&str> = view["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["userId"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["charlie", "alice", "bob"]);
}

#[tokio::test]
async fn test_malformed_frames_are_skipped() {
    let (_base_url, ws_url) = start_test_server().await;
    let (mut alice_write, mut alice_read) = connect_client(&ws_url).await;

    // Not JSON at all, then an unknown event type
    alice_write
        .send(Message::Text("not json".into()))
        .await
        .expect("Failed to send frame");
    send_json(&mut alice_write, json!({"type": "mystery"})).await;
    assert_silent(&mut alice_read, 300).await;

    // The connection keeps working afterwards
    send_json(&mut alice_write, json!({"type": "addUser", "userId": "alice"})).await;
    let view = recv_json(&mut alice_read).await;
    assert_eq!(view["type"], "getUsers");
}

#[tokio::test]
async fn test_debug_presence_reflects_directory() {
    let (base_url, ws_url) = start_test_server().await;

    let empty: serde_json::Value = reqwest::get(format!("{}/debug/presence", base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(empty.as_array().unwrap().len(), 0);

    let (mut alice_write, mut alice_read) = connect_client(&ws_url).await;
    send_json(&mut alice_write, json!({"type": "addUser", "userId": "alice"})).await;
    recv_json(&mut alice_read).await;

    let entries: serde_json::Value = reqwest::get(format!("{}/debug/presence", base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["userId"], "alice");
    assert!(!entries[0]["connectionId"].as_str().unwrap().is_empty());
}
