//! Store traits over the `users` and `items` tables.
//!
//! The service layer depends only on these traits. The sqlx
//! repositories in [`crate::repositories`] are the production
//! implementations; unit tests substitute in-memory doubles.
//!
//! All operations are single statements; there is no cross-statement
//! transaction. Store failures (timeout, constraint violation,
//! connectivity loss) surface as `ErrorKind::Database` errors, never as
//! silently empty results.

use async_trait::async_trait;
use uuid::Uuid;

use gramdrive_core::result::AppResult;
use gramdrive_entity::item::{CreateItem, Item};
use gramdrive_entity::user::User;

/// Keyed access to the `items` table.
///
/// List methods return items ordered by kind descending (folders before
/// files) then creation time descending (newest first), and an empty
/// vector when nothing matches.
#[async_trait]
pub trait ItemStore: Send + Sync + 'static {
    /// Insert a new item and return the stored row (with generated id).
    async fn insert(&self, data: &CreateItem) -> AppResult<Item>;

    /// Find an item by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Item>>;

    /// Items of a user directly under `parent_id` (`None` = forest root).
    async fn list_children(&self, user_id: i64, parent_id: Option<Uuid>) -> AppResult<Vec<Item>>;

    /// All non-folder items of a user regardless of placement.
    async fn list_files(&self, user_id: i64) -> AppResult<Vec<Item>>;

    /// All folders of a user regardless of placement.
    async fn list_folders(&self, user_id: i64) -> AppResult<Vec<Item>>;

    /// Every item of a user.
    async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<Item>>;

    /// Direct children of an item, across the owner's whole forest.
    /// Parents and children always share an owner, so no user filter
    /// is needed here.
    async fn children_of(&self, parent_id: Uuid) -> AppResult<Vec<Item>>;

    /// Update an item's display name. Returns the affected row count.
    async fn set_name(&self, id: Uuid, name: &str) -> AppResult<u64>;

    /// Update an item's parent. Returns the affected row count.
    async fn set_parent(&self, id: Uuid, parent_id: Option<Uuid>) -> AppResult<u64>;

    /// Re-parent every direct child of `parent_id` to `new_parent`.
    async fn reparent_children(&self, parent_id: Uuid, new_parent: Option<Uuid>)
        -> AppResult<u64>;

    /// Delete a single item row. Returns the affected row count.
    async fn delete_by_id(&self, id: Uuid) -> AppResult<u64>;

    /// Delete every item owned by a user, ignoring tree structure.
    async fn delete_by_user(&self, user_id: i64) -> AppResult<u64>;
}

/// Keyed access to the `users` table.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Insert or refresh a user row, updating the username.
    async fn upsert(&self, id: i64, username: Option<&str>) -> AppResult<User>;

    /// Find a user by id.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// All users, oldest first.
    async fn list_all(&self) -> AppResult<Vec<User>>;

    /// Set the blocked flag. Returns the affected row count.
    async fn set_blocked(&self, id: i64, blocked: bool) -> AppResult<u64>;

    /// Delete a user row. Returns the affected row count.
    async fn delete(&self, id: i64) -> AppResult<u64>;
}
