//! HTTP and WebSocket request handlers.

mod http;
mod websocket;

pub use http::{
    create_post, debug_presence, get_feed, get_user, health_check, login, register, send_otp,
};
pub use websocket::websocket_handler;
