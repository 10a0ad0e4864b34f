//! Bearer token authentication for the HTTP API.

use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::domain::UserId;

use super::{error::ApiError, state::AppState};

/// The user authenticated by the `Authorization: Bearer` header.
///
/// Implements axum's FromRequestParts for use as an extractor; guarded
/// handlers take it as an argument and receive the token's subject.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

impl FromRequestParts<Arc<AppState>> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        // Extract Bearer token from Authorization header
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized)?;

        // Validate the token and recover its subject
        let user_id = state
            .token_issuer
            .verify(token)
            .map_err(|_| ApiError::Unauthorized)?;

        Ok(AuthenticatedUser { user_id })
    }
}
