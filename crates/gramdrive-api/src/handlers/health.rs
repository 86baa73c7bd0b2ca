//! Liveness handler.

use axum::Json;

use crate::dto::response::LivenessResponse;

/// GET /
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse::working())
}
