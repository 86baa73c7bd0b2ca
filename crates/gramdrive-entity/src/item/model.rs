//! Item entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The kind of a catalog item.
///
/// Declared in `file < folder` order so that a descending sort on the
/// `kind` column lists folders before files, matching the web client's
/// expectation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "item_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A file backed by a provider handle.
    File,
    /// A folder grouping other items.
    Folder,
}

impl ItemKind {
    /// Check whether this kind is a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder)
    }
}

/// A node in a user's catalog forest.
///
/// Items never carry file bytes; a file item holds an opaque provider
/// handle from which the content can be re-fetched or re-sent.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Item {
    /// Unique item identifier.
    pub id: Uuid,
    /// The owning user. Immutable; parents always share it.
    pub user_id: i64,
    /// Display name. Not required to be unique among siblings.
    pub name: String,
    /// File or folder. Immutable after creation.
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Opaque provider file handle. Present iff `kind` is `File`.
    pub file_handle: Option<String>,
    /// Byte size (0 for folders).
    pub size: i64,
    /// Parent folder id; `None` means the item sits at the forest root.
    pub parent_id: Option<Uuid>,
    /// When the item was created. Secondary sort key, newest first.
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// The file category derived from the item name.
    pub fn category(&self) -> FileCategory {
        FileCategory::from_name(&self.name)
    }
}

/// Data required to create a new item record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItem {
    /// The owning user.
    pub user_id: i64,
    /// Display name.
    pub name: String,
    /// File or folder.
    pub kind: ItemKind,
    /// Provider file handle (files only).
    pub file_handle: Option<String>,
    /// Byte size (0 for folders).
    pub size: i64,
    /// Parent folder id, or `None` for root placement.
    pub parent_id: Option<Uuid>,
}

impl CreateItem {
    /// A folder at the given placement.
    pub fn folder(user_id: i64, name: impl Into<String>, parent_id: Option<Uuid>) -> Self {
        Self {
            user_id,
            name: name.into(),
            kind: ItemKind::Folder,
            file_handle: None,
            size: 0,
            parent_id,
        }
    }

    /// A root-level file referencing provider content.
    pub fn root_file(user_id: i64, name: impl Into<String>, handle: String, size: i64) -> Self {
        Self {
            user_id,
            name: name.into(),
            kind: ItemKind::File,
            file_handle: Some(handle),
            size,
            parent_id: None,
        }
    }
}

use super::category::FileCategory;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_ordering_puts_folders_above_files() {
        // A descending sort on kind must yield folders first.
        assert!(ItemKind::Folder > ItemKind::File);
    }

    #[test]
    fn test_kind_serializes_as_type_field() {
        let item = Item {
            id: Uuid::nil(),
            user_id: 1,
            name: "a.png".into(),
            kind: ItemKind::File,
            file_handle: Some("h".into()),
            size: 10,
            parent_id: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "file");
    }
}
