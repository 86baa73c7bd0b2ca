//! Catalog browse and mutation handlers.
//!
//! User-addressed endpoints gate on the acting user's blocked state;
//! item-addressed endpoints gate on the item owner's state, since the
//! request body carries no separate caller identity.

use axum::Json;
use axum::extract::{Query, State};
use uuid::Uuid;

use gramdrive_core::result::AppResult;
use gramdrive_entity::item::Item;
use gramdrive_service::{ListMode, ProfileSummary};

use crate::dto::request::{
    parse_placement, validated, CreateFolderRequest, DeleteAllRequest, DeleteRequest,
    ListFilesParams, MoveFileRequest, ProfileParams, RenameRequest,
};
use crate::dto::response::StatusResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Reject the request when the owner of `item_id` is blocked. A missing
/// item passes; the mutation it precedes treats that as a no-op.
async fn gate_item_owner(state: &AppState, item_id: Uuid) -> AppResult<()> {
    if let Some(item) = state.catalog.items().find_by_id(item_id).await? {
        state.access.ensure_not_blocked(item.user_id).await?;
    }
    Ok(())
}

/// GET /api/files?user_id&folder_id&mode
pub async fn list_files(
    State(state): State<AppState>,
    Query(params): Query<ListFilesParams>,
) -> Result<Json<Vec<Item>>, ApiError> {
    state.access.ensure_not_blocked(params.user_id).await?;

    let parent_id = parse_placement(params.folder_id.as_deref())?;
    let mode: ListMode = params.mode.as_deref().unwrap_or("strict").parse()?;

    let items = state.catalog.list(params.user_id, parent_id, mode).await?;
    Ok(Json(items))
}

/// GET /api/profile?user_id
pub async fn profile(
    State(state): State<AppState>,
    Query(params): Query<ProfileParams>,
) -> Result<Json<ProfileSummary>, ApiError> {
    state.access.ensure_not_blocked(params.user_id).await?;
    let summary = state.catalog.profile(params.user_id).await?;
    Ok(Json(summary))
}

/// POST /api/create_folder
pub async fn create_folder(
    State(state): State<AppState>,
    Json(request): Json<CreateFolderRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    validated(&request)?;
    state.access.ensure_not_blocked(request.user_id).await?;

    let parent_id = parse_placement(request.parent_id.as_deref())?;
    state
        .catalog
        .create_folder(request.user_id, &request.name, parent_id)
        .await?;
    Ok(Json(StatusResponse::ok()))
}

/// POST /api/rename
pub async fn rename(
    State(state): State<AppState>,
    Json(request): Json<RenameRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    validated(&request)?;
    gate_item_owner(&state, request.item_id).await?;

    state
        .catalog
        .rename(request.item_id, &request.new_name)
        .await?;
    Ok(Json(StatusResponse::ok()))
}

/// POST /api/delete — non-recursive; children move to root.
pub async fn delete(
    State(state): State<AppState>,
    Json(request): Json<DeleteRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    gate_item_owner(&state, request.item_id).await?;
    state.catalog.delete(request.item_id).await?;
    Ok(Json(StatusResponse::ok()))
}

/// POST /api/delete_folder_recursive
pub async fn delete_folder_recursive(
    State(state): State<AppState>,
    Json(request): Json<DeleteRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    gate_item_owner(&state, request.item_id).await?;
    state.catalog.delete_recursive(request.item_id).await?;
    Ok(Json(StatusResponse::ok()))
}

/// POST /api/delete_all — account reset.
pub async fn delete_all(
    State(state): State<AppState>,
    Json(request): Json<DeleteAllRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    state.access.ensure_not_blocked(request.user_id).await?;
    state.catalog.delete_all(request.user_id).await?;
    Ok(Json(StatusResponse::ok()))
}

/// POST /api/move_file
pub async fn move_file(
    State(state): State<AppState>,
    Json(request): Json<MoveFileRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    gate_item_owner(&state, request.file_id).await?;

    let folder_id = parse_placement(request.folder_id.as_deref())?;
    state.catalog.move_item(request.file_id, folder_id).await?;
    Ok(Json(StatusResponse::ok()))
}
