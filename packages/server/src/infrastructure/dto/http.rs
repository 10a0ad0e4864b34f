//! HTTP API request/response DTOs.
//!
//! Requests and responses use camelCase keys. Multipart endpoints
//! (`/auth/sendOTP`, `/posts`) read their fields directly from the
//! multipart form in the handler and have no request DTO here.

use serde::{Deserialize, Serialize};

/// Request body for `POST /auth/register`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub otp_id: String,
    pub otp: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub friends: Vec<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub occupation: String,
    pub picture_path: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Account representation returned by the API.
///
/// The credential hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub picture_path: String,
    pub friends: Vec<String>,
    pub location: String,
    pub occupation: String,
    pub viewed_profile: u32,
    pub impressions: u32,
    pub created_at: String,
}

/// Payload of the `POST /auth/sendOTP` response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpData {
    pub email: String,
    pub picture_path: String,
    pub otp_id: String,
}

/// Response body for `POST /auth/sendOTP`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendOtpResponse {
    pub status: String,
    pub message: String,
    pub data: SendOtpData,
}

/// Response body for `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// One post of the feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub picture_path: String,
    pub created_at: String,
}
