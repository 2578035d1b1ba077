//! # User Handlers
//!
//! HTTP handlers for user CRUD, bulk population, matchmaking and standalone
//! email validation. Handlers only extract and validate input; the work is
//! done by [`UserService`](crate::services::user::UserService).

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{AppState, NewUser, UserUpdate};
use crate::utils::{constant::*, validator::validate_payload};

/// Query parameters for listing users
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_skip")]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}
fn default_skip() -> u32 {
    DEFAULT_PAGE_SKIP
}
fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

/// Request payload for creating many users at once
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct BulkUserCreate {
    #[validate(nested)]
    pub users: Vec<NewUser>,
}

/// Request payload for the standalone email check
#[derive(Debug, Serialize, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

/// Confirmation returned after a deletion
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Creates a user.
///
/// POST /users/
///
/// # Returns
///
/// - `201 Created` with the stored `User`
/// - `400 Bad Request` - Field too long, or email already taken
/// - `406 Not Acceptable` - Email failed the format or MX check
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewUser>,
) -> AppResult<impl IntoResponse> {
    validate_payload(&payload)?;

    let user = state.user_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Lists users page by page.
///
/// GET /users/ ?skip=0&limit=10
///
/// # Returns
///
/// - `200 OK` with a list of `User`, ordered by id
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let users = state
        .user_service
        .list(i64::from(query.skip), i64::from(query.limit))
        .await?;

    debug!(count = users.len(), "Listed users");
    Ok(Json(users))
}

/// Gets a single user.
///
/// GET /users/{user_id}
///
/// # Returns
///
/// - `200 OK` with the `User`
/// - `404 Not Found` - No user with this id
#[instrument(skip(state), fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let user = state.user_service.get(user_id).await?;
    Ok(Json(user))
}

/// Updates a user. Empty strings and zero values leave the stored field as is.
///
/// PUT /users/update/{user_id}
///
/// # Returns
///
/// - `201 Created` with the updated `User`
/// - `400 Bad Request` - Field too long, or email already taken
/// - `404 Not Found` - No user with this id
/// - `406 Not Acceptable` - New email failed the format or MX check
#[instrument(skip(state, payload), fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<impl IntoResponse> {
    validate_payload(&payload)?;

    let user = state.user_service.update(user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Deletes a user.
///
/// DELETE /users/delete/{user_id}
///
/// # Returns
///
/// - `202 Accepted` with a confirmation message
/// - `404 Not Found` - No user with this id
#[instrument(skip(state), fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    state.user_service.delete(user_id).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse {
            message: "User deleted successfully".to_string(),
        }),
    ))
}

/// Finds users of the opposite gender who share an interest with this user.
///
/// GET /users/matches/{user_id}
///
/// # Returns
///
/// - `200 OK` with a (possibly empty) list of `User`
/// - `404 Not Found` - No user with this id
#[instrument(skip(state), fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn find_matches(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let matches = state.user_service.find_matches(user_id).await?;
    Ok(Json(matches))
}

/// Creates a batch of users atomically.
///
/// POST /users/populate/
///
/// # Returns
///
/// - `201 Created` with every created `User`, in request order
/// - `400 Bad Request` - Field too long, or an email already exists
/// - `406 Not Acceptable` - An email failed the format or MX check
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn populate_users(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BulkUserCreate>,
) -> AppResult<impl IntoResponse> {
    validate_payload(&payload)?;

    let users = state.user_service.bulk_create(payload.users).await?;
    Ok((StatusCode::CREATED, Json(users)))
}

/// Checks an email address without storing anything.
///
/// POST /users/validate-email/
///
/// # Returns
///
/// - `200 OK` with `{"valid": true, "message": "Valid email address"}`
/// - `400 Bad Request` - The reason the email was rejected
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn validate_email(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<EmailRequest>,
) -> AppResult<impl IntoResponse> {
    let check = state.user_service.check_email(&payload.email).await;

    if !check.valid {
        warn!(email = %payload.email, reason = %check.message, "Email failed validation");
        return Err(AppError::BadRequest(check.message));
    }

    Ok(Json(check))
}
