//! Conversion logic between DTOs and domain entities.

use connect_shared::time::timestamp_to_utc_rfc3339;

use crate::domain::entity;
use crate::infrastructure::dto::{http, websocket};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<entity::ConnectionRecord> for websocket::PresenceEntry {
    fn from(model: entity::ConnectionRecord) -> Self {
        Self {
            user_id: model.user_id.into_string(),
            connection_id: model.connection_id.into_string(),
        }
    }
}

impl From<entity::User> for http::UserResponse {
    fn from(model: entity::User) -> Self {
        Self {
            id: model.id.into_string(),
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email.into_string(),
            picture_path: model.picture_path,
            friends: model.friends,
            location: model.location,
            occupation: model.occupation,
            viewed_profile: model.viewed_profile,
            impressions: model.impressions,
            created_at: timestamp_to_utc_rfc3339(model.created_at.value()),
        }
    }
}

impl From<entity::Post> for http::PostResponse {
    fn from(model: entity::Post) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id.into_string(),
            description: model.description,
            picture_path: model.picture_path,
            created_at: timestamp_to_utc_rfc3339(model.created_at.value()),
        }
    }
}
