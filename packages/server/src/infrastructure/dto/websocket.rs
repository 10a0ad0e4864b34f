//! WebSocket message DTOs.
//!
//! All events travel as JSON objects tagged with a `"type"` field, with
//! camelCase keys:
//!
//! - client → server: `addUser`, `sendMessage`
//! - server → client: `getUsers` (broadcast), `getMessage` (targeted)

use serde::{Deserialize, Serialize};

/// Event type tag for server → client messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    GetUsers,
    GetMessage,
}

/// Client → server events, dispatched on the `"type"` tag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ClientEvent {
    #[serde(rename = "addUser")]
    AddUser(AddUserMessage),
    #[serde(rename = "sendMessage")]
    SendMessage(SendMessageMessage),
}

/// Identity announcement from a connected client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddUserMessage {
    pub user_id: String,
}

/// A direct message addressed to another user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageMessage {
    pub conversation_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub message: String,
}

/// One entry of the presence snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceEntry {
    pub user_id: String,
    pub connection_id: String,
}

/// Full presence snapshot, broadcast to every connection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceListMessage {
    pub r#type: EventType,
    pub users: Vec<PresenceEntry>,
}

/// A direct message delivered to the receiver's connection.
///
/// The receiver is implicit (the connection the message is pushed to),
/// so only the sender and conversation travel on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectMessage {
    pub r#type: EventType,
    pub conversation_id: String,
    pub sender_id: String,
    pub message: String,
}
