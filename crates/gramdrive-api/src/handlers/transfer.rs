//! Download and preview handlers — the two endpoints that touch the
//! provider-side file content.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use gramdrive_entity::item::FileCategory;
use gramdrive_service::share::send_kind_for_name;

use crate::dto::request::{validated, DownloadRequest};
use crate::dto::response::StatusResponse;
use crate::error::ApiError;
use crate::state::AppState;

fn caption_for(name: &str) -> &'static str {
    match FileCategory::from_name(name) {
        FileCategory::Photo => "Вот твое фото 📸",
        FileCategory::Video => "Вот твое видео 🎥",
        FileCategory::Doc => "Вот твой файл 📄",
    }
}

/// POST /api/download — re-deliver a stored file to a chat.
///
/// Sends to `recipient_id` when given (the "send to a friend" flow),
/// otherwise back to the owner's own chat.
pub async fn download(
    State(state): State<AppState>,
    Json(request): Json<DownloadRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    validated(&request)?;
    state.access.ensure_not_blocked(request.user_id).await?;

    let chat_id = request.recipient_id.unwrap_or(request.user_id);
    state
        .transport
        .send_file(
            chat_id,
            &request.file_id,
            send_kind_for_name(&request.file_name),
            Some(caption_for(&request.file_name)),
        )
        .await?;
    Ok(Json(StatusResponse::ok()))
}

/// GET /api/preview/{file_id} — stream provider bytes inline.
///
/// The content type is fixed to `image/jpeg` regardless of the actual
/// file type; the web client only previews photos.
pub async fn preview(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<Response, ApiError> {
    let bytes = state.transport.fetch_file(&file_id).await?;
    Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes).into_response())
}
