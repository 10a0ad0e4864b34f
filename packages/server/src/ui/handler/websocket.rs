//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory, ConversationId, MessageBody, UserId},
    infrastructure::dto::websocket::{
        ClientEvent, DirectMessage, EventType, PresenceEntry, PresenceListMessage,
    },
    ui::state::AppState,
    usecase::DeliveryOutcome,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // The server assigns the connection id, clients cannot pick one
    let connection_id = ConnectionIdFactory::generate();

    // Create a channel for this connection to receive pushed messages
    let (tx, rx) = mpsc::unbounded_channel();

    // Register the push channel right away so presence broadcasts reach
    // connections that never announce an identity
    state
        .connect_client_usecase
        .execute(connection_id.clone(), tx)
        .await;
    tracing::info!("Connection '{}' established", connection_id.as_str());

    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id, rx))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: presence broadcasts and
/// relayed direct messages (via rx channel) are sent to this connection.
///
/// # Arguments
///
/// * `rx` - Channel receiver for messages addressed to this connection
/// * `sender` - WebSocket sink to send messages to this connection
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the message to this connection
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    connection_id: ConnectionId,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let (sender, mut receiver) = socket.split();

    let connection_id_clone = connection_id.clone();
    let state_clone = state.clone();

    // Spawn a task to receive events from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text: {}", text);

                    // Parse the incoming event
                    let event = match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!("Ignoring unparsable frame: {}", e);
                            continue;
                        }
                    };

                    match event {
                        ClientEvent::AddUser(add_user) => {
                            // Convert String -> UserId (Domain Model)
                            let user_id = match UserId::try_from(add_user.user_id.clone()) {
                                Ok(id) => id,
                                Err(_) => {
                                    tracing::warn!(
                                        "Invalid userId format: '{}'",
                                        add_user.user_id
                                    );
                                    continue;
                                }
                            };

                            // Register presence (a repeat announce is a silent no-op)
                            let registered = state_clone
                                .announce_identity_usecase
                                .execute(user_id, connection_id_clone.clone())
                                .await;
                            if registered {
                                tracing::info!(
                                    "User '{}' announced on connection '{}'",
                                    add_user.user_id,
                                    connection_id_clone.as_str()
                                );
                            }

                            // Broadcast the full presence list even when nothing changed
                            let records = state_clone
                                .announce_identity_usecase
                                .build_presence_list()
                                .await;

                            // Domain Model から DTO への変換
                            let users: Vec<PresenceEntry> =
                                records.into_iter().map(PresenceEntry::from).collect();

                            let list_msg = PresenceListMessage {
                                r#type: EventType::GetUsers,
                                users,
                            };

                            let list_json = serde_json::to_string(&list_msg).unwrap();
                            if let Err(e) = state_clone
                                .announce_identity_usecase
                                .broadcast_presence(&list_json)
                                .await
                            {
                                tracing::warn!("Failed to broadcast presence list: {}", e);
                            }
                        }
                        ClientEvent::SendMessage(send) => {
                            // Convert String -> Domain Models
                            let sender_id_result = UserId::try_from(send.sender_id.clone());
                            let receiver_id_result = UserId::try_from(send.receiver_id.clone());

                            let (sender_id, receiver_id) =
                                match (sender_id_result, receiver_id_result) {
                                    (Ok(sender_id), Ok(receiver_id)) => (sender_id, receiver_id),
                                    (Err(_), _) => {
                                        tracing::warn!(
                                            "Invalid senderId format: '{}'",
                                            send.sender_id
                                        );
                                        continue;
                                    }
                                    (_, Err(_)) => {
                                        tracing::warn!(
                                            "Invalid receiverId format: '{}'",
                                            send.receiver_id
                                        );
                                        continue;
                                    }
                                };

                            let conversation_id =
                                match ConversationId::new(send.conversation_id.clone()) {
                                    Ok(id) => id,
                                    Err(_) => {
                                        tracing::warn!(
                                            "Invalid conversationId format: '{}'",
                                            send.conversation_id
                                        );
                                        continue;
                                    }
                                };

                            // The body is an opaque payload, relayed untouched
                            let body = MessageBody::new(send.message);

                            // Domain Model から DTO への変換
                            // (receiverId is implicit for the receiving connection)
                            let direct_msg = DirectMessage {
                                r#type: EventType::GetMessage,
                                conversation_id: conversation_id.into_string(),
                                sender_id: sender_id.as_str().to_string(),
                                message: body.into_string(),
                            };

                            let direct_json = serde_json::to_string(&direct_msg).unwrap();
                            match state_clone
                                .route_message_usecase
                                .execute(&sender_id, &receiver_id, direct_json)
                                .await
                            {
                                DeliveryOutcome::Delivered(target) => {
                                    tracing::info!(
                                        "Relayed message from '{}' to '{}' on connection '{}'",
                                        sender_id.as_str(),
                                        receiver_id.as_str(),
                                        target.as_str()
                                    );
                                }
                                DeliveryOutcome::RecipientOffline => {
                                    // At-most-once delivery: the sender gets no failure notice
                                }
                            }
                        }
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!(
                        "Connection '{}' requested close",
                        connection_id_clone.as_str()
                    );
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to receive messages from other clients and send to this connection
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Remove this connection's presence entry and push channel
    let removed = state
        .disconnect_client_usecase
        .execute(connection_id.clone())
        .await;
    tracing::info!(
        "Connection '{}' closed, {} presence entries removed",
        connection_id.as_str(),
        removed
    );

    // Broadcast the updated presence list to every remaining connection,
    // whether or not a presence entry was removed
    let records = state.disconnect_client_usecase.build_presence_list().await;

    // Domain Model から DTO への変換
    let users: Vec<PresenceEntry> = records.into_iter().map(PresenceEntry::from).collect();

    let list_msg = PresenceListMessage {
        r#type: EventType::GetUsers,
        users,
    };

    let list_json = serde_json::to_string(&list_msg).unwrap();
    if let Err(e) = state
        .disconnect_client_usecase
        .broadcast_presence(&list_json)
        .await
    {
        tracing::warn!("Failed to broadcast presence list: {}", e);
    } else {
        tracing::info!(
            "Broadcasted presence list after connection '{}' left",
            connection_id.as_str()
        );
    }
}
