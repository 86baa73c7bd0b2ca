//! Catalog engine operations.
//!
//! Every operation is a single atomic transition per store statement;
//! recursive operations are not atomic across the whole subtree (a crash
//! mid-recursion can leave a partially deleted subtree). Consistency of
//! the forest shape is enforced here at write time, not by the store.

use std::str::FromStr;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::info;
use uuid::Uuid;

use gramdrive_core::error::AppError;
use gramdrive_core::result::AppResult;
use gramdrive_database::store::ItemStore;
use gramdrive_entity::item::{CreateItem, Item};

use super::profile::ProfileSummary;

/// Upper bound on tree depth for recursive operations and ancestor
/// walks. Protects against attacker-constructed deep trees blowing the
/// stack; a well-formed catalog never comes close.
pub const MAX_TREE_DEPTH: usize = 64;

/// Listing mode for [`CatalogService::list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    /// Items whose parent equals the given folder (root when absent).
    Strict,
    /// All non-folder items regardless of placement (flattened view).
    Global,
    /// All folders regardless of placement (move-target pickers).
    Folders,
}

impl FromStr for ListMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Self::Strict),
            "global" => Ok(Self::Global),
            "folders" => Ok(Self::Folders),
            other => Err(AppError::validation(format!("Unknown list mode '{other}'"))),
        }
    }
}

/// Maintains the per-user item forest.
#[derive(Clone)]
pub struct CatalogService {
    items: Arc<dyn ItemStore>,
}

impl CatalogService {
    /// Create a new catalog service.
    pub fn new(items: Arc<dyn ItemStore>) -> Self {
        Self { items }
    }

    /// The injected item store, shared with sibling services.
    pub fn items(&self) -> Arc<dyn ItemStore> {
        self.items.clone()
    }

    /// List a user's items. Empty results are not an error.
    pub async fn list(
        &self,
        user_id: i64,
        parent_id: Option<Uuid>,
        mode: ListMode,
    ) -> AppResult<Vec<Item>> {
        match mode {
            ListMode::Strict => self.items.list_children(user_id, parent_id).await,
            ListMode::Global => self.items.list_files(user_id).await,
            ListMode::Folders => self.items.list_folders(user_id).await,
        }
    }

    /// Create a folder at the given placement.
    ///
    /// The parent, when given, must exist, be a folder, and belong to the
    /// same user. (The legacy service skipped these checks; enforcing the
    /// forest invariants at write time is a deliberate hardening.)
    pub async fn create_folder(
        &self,
        user_id: i64,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> AppResult<Item> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }

        if let Some(parent) = parent_id {
            let parent_item = self
                .items
                .find_by_id(parent)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Parent folder {parent} not found")))?;
            if !parent_item.kind.is_folder() {
                return Err(AppError::validation("Parent item is not a folder"));
            }
            if parent_item.user_id != user_id {
                return Err(AppError::validation(
                    "Parent folder belongs to a different user",
                ));
            }
        }

        let folder = self
            .items
            .insert(&CreateItem::folder(user_id, name, parent_id))
            .await?;

        info!(user_id, folder_id = %folder.id, name = %folder.name, "Folder created");
        Ok(folder)
    }

    /// Rename an item. Renaming a missing item is a no-op success.
    pub async fn rename(&self, item_id: Uuid, new_name: &str) -> AppResult<()> {
        if new_name.trim().is_empty() {
            return Err(AppError::validation("Item name cannot be empty"));
        }
        self.items.set_name(item_id, new_name).await?;
        Ok(())
    }

    /// Move an item under a folder, or to the root when `folder_id` is
    /// `None`.
    ///
    /// Rejects self-parenting and any move that would make the item an
    /// ancestor of its new parent. The ancestor walk is depth-limited;
    /// exceeding the limit also rejects the move.
    pub async fn move_item(&self, item_id: Uuid, folder_id: Option<Uuid>) -> AppResult<()> {
        let item = self
            .items
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Item {item_id} not found")))?;

        if let Some(target) = folder_id {
            if target == item_id {
                return Err(AppError::validation("An item cannot be its own parent"));
            }

            let dest = self
                .items
                .find_by_id(target)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Folder {target} not found")))?;
            if !dest.kind.is_folder() {
                return Err(AppError::validation("Move target is not a folder"));
            }
            if dest.user_id != item.user_id {
                return Err(AppError::validation(
                    "Move target belongs to a different user",
                ));
            }

            // Walk from the destination towards the root. Meeting the
            // moved item on the way means the move would create a cycle.
            let mut cursor = dest.parent_id;
            let mut hops = 0usize;
            while let Some(ancestor_id) = cursor {
                if ancestor_id == item_id {
                    return Err(AppError::validation(
                        "Cannot move a folder into its own subtree",
                    ));
                }
                hops += 1;
                if hops > MAX_TREE_DEPTH {
                    return Err(AppError::validation("Tree depth limit exceeded"));
                }
                cursor = self
                    .items
                    .find_by_id(ancestor_id)
                    .await?
                    .and_then(|a| a.parent_id);
            }
        }

        self.items.set_parent(item_id, folder_id).await?;
        info!(item_id = %item_id, target = ?folder_id, "Item moved");
        Ok(())
    }

    /// Delete a single item. For folders, direct children are re-parented
    /// to the root first so no surviving item points at a missing parent.
    /// Deleting a missing item is a no-op success.
    pub async fn delete(&self, item_id: Uuid) -> AppResult<()> {
        let Some(item) = self.items.find_by_id(item_id).await? else {
            return Ok(());
        };

        if item.kind.is_folder() {
            self.items.reparent_children(item_id, None).await?;
        }
        self.items.delete_by_id(item_id).await?;

        info!(item_id = %item_id, kind = ?item.kind, "Item deleted");
        Ok(())
    }

    /// Delete an item and its entire subtree, children before parents.
    /// A store failure aborts the recursion rather than skipping nodes.
    pub async fn delete_recursive(&self, item_id: Uuid) -> AppResult<()> {
        self.delete_subtree(item_id, 0).await?;
        info!(item_id = %item_id, "Subtree deleted");
        Ok(())
    }

    fn delete_subtree(&self, item_id: Uuid, depth: usize) -> BoxFuture<'_, AppResult<()>> {
        async move {
            if depth >= MAX_TREE_DEPTH {
                return Err(AppError::validation("Tree depth limit exceeded"));
            }

            for child in self.items.children_of(item_id).await? {
                if child.kind.is_folder() {
                    self.delete_subtree(child.id, depth + 1).await?;
                } else {
                    self.items.delete_by_id(child.id).await?;
                }
            }
            self.items.delete_by_id(item_id).await?;
            Ok(())
        }
        .boxed()
    }

    /// Remove every item a user owns, ignoring tree structure. Used for
    /// account reset.
    pub async fn delete_all(&self, user_id: i64) -> AppResult<u64> {
        let removed = self.items.delete_by_user(user_id).await?;
        info!(user_id, removed, "All items deleted");
        Ok(removed)
    }

    /// Aggregate counts and total size for a user's catalog.
    pub async fn profile(&self, user_id: i64) -> AppResult<ProfileSummary> {
        let items = self.items.list_by_user(user_id).await?;
        Ok(ProfileSummary::of(&items))
    }
}
