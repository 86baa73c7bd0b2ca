//! Admin handlers. Each delegates to `AccessService`, which enforces the
//! admin check and the self-action guard.

use axum::Json;
use axum::extract::State;

use gramdrive_entity::user::User;

use crate::dto::request::{AdminBlockRequest, AdminDeleteUserRequest, AdminListUsersRequest};
use crate::dto::response::StatusResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/admin/users — list every registered user.
pub async fn list_users(
    State(state): State<AppState>,
    Json(request): Json<AdminListUsersRequest>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.access.list_users(request.admin_id).await?;
    Ok(Json(users))
}

/// POST /api/admin/block — toggle another user's blocked flag.
pub async fn block_user(
    State(state): State<AppState>,
    Json(request): Json<AdminBlockRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    state
        .access
        .set_blocked(request.admin_id, request.user_id, request.blocked)
        .await?;
    Ok(Json(StatusResponse::ok()))
}

/// POST /api/admin/delete_user — wipe another user's account and catalog.
pub async fn delete_user(
    State(state): State<AppState>,
    Json(request): Json<AdminDeleteUserRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    state
        .access
        .delete_account(request.admin_id, request.user_id)
        .await?;
    Ok(Json(StatusResponse::ok()))
}
