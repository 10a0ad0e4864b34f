//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};

use crate::{
    domain::{Email, ImageUpload, UserId},
    infrastructure::dto::{
        http::{
            LoginRequest, LoginResponse, PostResponse, RegisterRequest, SendOtpData,
            SendOtpResponse, UserResponse,
        },
        websocket::PresenceEntry,
    },
    ui::{error::ApiError, middleware::AuthenticatedUser, state::AppState},
    usecase::{LoginError, RegisterInput},
};

/// Debug endpoint to get the current presence directory (for testing purposes)
pub async fn debug_presence(State(state): State<Arc<AppState>>) -> Json<Vec<PresenceEntry>> {
    let records = state.get_presence_usecase.execute().await;

    // Domain Model から DTO への変換
    let entries: Vec<PresenceEntry> = records.into_iter().map(PresenceEntry::from).collect();

    Json(entries)
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Send an OTP verification mail and stage the profile picture
///
/// Multipart fields: `email` (text) and `picture` (file).
pub async fn send_otp(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<SendOtpResponse>, ApiError> {
    let mut email = None;
    let mut picture = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::MalformedPayload)?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "email" => {
                email = Some(field.text().await.map_err(|_| ApiError::MalformedPayload)?);
            }
            "picture" => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(|_| ApiError::MalformedPayload)?;
                picture = Some(ImageUpload {
                    bytes: bytes.to_vec(),
                    content_type,
                });
            }
            _ => {}
        }
    }

    let email = email.ok_or_else(|| ApiError::BadRequest("missing field 'email'".to_string()))?;
    let picture =
        picture.ok_or_else(|| ApiError::BadRequest("missing field 'picture'".to_string()))?;

    // Convert String -> Email (Domain Model)
    let email = Email::new(email).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let dispatch = state
        .send_otp_usecase
        .execute(email.clone(), picture)
        .await?;

    Ok(Json(SendOtpResponse {
        status: "PENDING".to_string(),
        message: "Verification email sent".to_string(),
        data: SendOtpData {
            email: email.into_string(),
            picture_path: dispatch.picture_path,
            otp_id: dispatch.otp_id,
        },
    }))
}

/// Register an account with a previously dispatched OTP
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    // Convert String -> Email (Domain Model)
    let email = Email::new(request.email).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let input = RegisterInput {
        otp_id: request.otp_id,
        otp: request.otp,
        first_name: request.first_name,
        last_name: request.last_name,
        email,
        password: request.password,
        friends: request.friends,
        location: request.location,
        occupation: request.occupation,
        picture_path: request.picture_path,
    };

    let user = state.register_account_usecase.execute(input).await?;

    // Domain Model から DTO への変換
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Log in with email and password, returning a bearer token
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    // Convert String -> Email (Domain Model)
    // A malformed address cannot belong to an account
    let email =
        Email::new(request.email).map_err(|_| ApiError::Login(LoginError::UserNotFound))?;

    let session = state.login_usecase.execute(email, request.password).await?;

    // Domain Model から DTO への変換
    Ok(Json(LoginResponse {
        token: session.token,
        user: UserResponse::from(session.user),
    }))
}

/// Create a post as the authenticated user and return the updated feed
///
/// Multipart fields: `description` (text) and `picture` (file).
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    mut multipart: Multipart,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let mut description = None;
    let mut picture = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::MalformedPayload)?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "description" => {
                description = Some(field.text().await.map_err(|_| ApiError::MalformedPayload)?);
            }
            "picture" => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(|_| ApiError::MalformedPayload)?;
                picture = Some(ImageUpload {
                    bytes: bytes.to_vec(),
                    content_type,
                });
            }
            _ => {}
        }
    }

    let description = description
        .ok_or_else(|| ApiError::BadRequest("missing field 'description'".to_string()))?;
    let picture =
        picture.ok_or_else(|| ApiError::BadRequest("missing field 'picture'".to_string()))?;

    // The poster is the bearer token's subject
    let posts = state
        .create_post_usecase
        .execute(user.user_id, description, picture)
        .await?;

    // Domain Model から DTO への変換
    let responses: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();

    Ok(Json(responses))
}

/// Get the post feed, newest first
pub async fn get_feed(
    State(state): State<Arc<AppState>>,
    _user: AuthenticatedUser,
) -> Json<Vec<PostResponse>> {
    let posts = state.get_feed_usecase.execute().await;

    // Domain Model から DTO への変換
    let responses: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();

    Json(responses)
}

/// Get a user profile by ID
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    _user: AuthenticatedUser,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    // Convert String -> UserId (Domain Model)
    let user_id = UserId::try_from(user_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let user = state.get_user_usecase.execute(&user_id).await?;

    // Domain Model から DTO への変換
    Ok(Json(UserResponse::from(user)))
}
