//! Infrastructure 層
//!
//! ドメイン層が定義する trait（Repository, MessagePusher, Gateway）の
//! 具体的な実装と、プロトコル境界の DTO を提供します。

pub mod dto;
pub mod image_store;
pub mod mailer;
pub mod message_pusher;
pub mod repository;
pub mod security;
