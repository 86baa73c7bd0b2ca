//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use gramdrive_core::error::AppError;
use gramdrive_core::result::AppResult;

/// Normalize a wire placement reference into an optional folder id.
///
/// The web client sends root placement in several historical forms:
/// an absent field, an empty string, the literal `"null"`, or `"root"`.
/// Anything else must be a valid item id.
pub fn parse_placement(raw: Option<&str>) -> AppResult<Option<Uuid>> {
    match raw {
        None | Some("") | Some("null") | Some("root") => Ok(None),
        Some(value) => Uuid::parse_str(value)
            .map(Some)
            .map_err(|_| AppError::validation(format!("Invalid folder reference '{value}'"))),
    }
}

/// Run `validator` checks, surfacing failures as a validation error.
pub fn validated<T: Validate>(request: &T) -> AppResult<()> {
    request
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))
}

/// Query parameters for GET /api/files.
#[derive(Debug, Clone, Deserialize)]
pub struct ListFilesParams {
    pub user_id: i64,
    /// Placement reference; see [`parse_placement`].
    pub folder_id: Option<String>,
    /// `strict` (default), `global`, or `folders`.
    pub mode: Option<String>,
}

/// Query parameters for GET /api/profile.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileParams {
    pub user_id: i64,
}

/// POST /api/create_folder body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    pub user_id: i64,
    /// Folder display name.
    #[validate(length(min = 1, message = "Folder name is required"))]
    pub name: String,
    pub parent_id: Option<String>,
}

/// POST /api/rename body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameRequest {
    pub item_id: Uuid,
    #[validate(length(min = 1, message = "New name is required"))]
    pub new_name: String,
}

/// POST /api/delete and /api/delete_folder_recursive body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub item_id: Uuid,
}

/// POST /api/delete_all body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAllRequest {
    pub user_id: i64,
}

/// POST /api/move_file body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveFileRequest {
    pub file_id: Uuid,
    /// Target placement; see [`parse_placement`].
    pub folder_id: Option<String>,
}

/// POST /api/download body.
///
/// `file_id` is the provider file handle, not a catalog item id; the
/// web client reads it off the listed item and posts it back.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DownloadRequest {
    pub user_id: i64,
    #[validate(length(min = 1, message = "File handle is required"))]
    pub file_id: String,
    /// Display name; the suffix picks the send method.
    #[serde(default = "default_download_name")]
    pub file_name: String,
    /// Chat to deliver to; the owner's chat when absent.
    pub recipient_id: Option<i64>,
}

fn default_download_name() -> String {
    "file".to_string()
}

/// POST /api/admin/users body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminListUsersRequest {
    pub admin_id: i64,
}

/// POST /api/admin/block body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminBlockRequest {
    pub admin_id: i64,
    pub user_id: i64,
    pub blocked: bool,
}

/// POST /api/admin/delete_user body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminDeleteUserRequest {
    pub admin_id: i64,
    pub user_id: i64,
}
