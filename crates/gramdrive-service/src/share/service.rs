//! Share resolution and the "save to own cloud" recursive copy.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::info;
use uuid::Uuid;

use gramdrive_core::error::AppError;
use gramdrive_core::result::AppResult;
use gramdrive_database::store::ItemStore;
use gramdrive_entity::item::{CreateItem, Item, ItemKind};

use crate::catalog::MAX_TREE_DEPTH;
use super::token::ShareToken;

/// Resolves share tokens and clones shared subtrees.
#[derive(Clone)]
pub struct ShareService {
    items: Arc<dyn ItemStore>,
}

impl ShareService {
    /// Create a new share service.
    pub fn new(items: Arc<dyn ItemStore>) -> Self {
        Self { items }
    }

    /// Resolve a share token to the catalog item it names.
    ///
    /// Access is public to link holders; no ownership check happens here.
    /// Folder tokens only resolve to folders.
    pub async fn resolve(&self, token: ShareToken) -> AppResult<Item> {
        match token {
            ShareToken::File(id) => self
                .items
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found("Shared file no longer exists")),
            ShareToken::Folder(id) => self
                .items
                .find_by_id(id)
                .await?
                .filter(|item| item.kind.is_folder())
                .ok_or_else(|| AppError::not_found("Shared folder no longer exists")),
        }
    }

    /// Depth-first clone of a folder subtree into another user's catalog.
    ///
    /// File clones reference the same provider handle — no byte
    /// duplication happens. A source folder deleted since the link was
    /// issued yields a no-op (`None`) rather than an error. The clone is
    /// not atomic across the subtree; a failure mid-recursion leaves a
    /// partial copy.
    pub async fn copy_folder_recursive(
        &self,
        source_folder_id: Uuid,
        target_user_id: i64,
        target_parent_id: Option<Uuid>,
    ) -> AppResult<Option<Item>> {
        let Some(source) = self.items.find_by_id(source_folder_id).await? else {
            return Ok(None);
        };
        if !source.kind.is_folder() {
            return Err(AppError::validation("Share source is not a folder"));
        }

        let root = self
            .copy_subtree(source, target_user_id, target_parent_id, 0)
            .await?;

        info!(
            source = %source_folder_id,
            target_user = target_user_id,
            copied_root = %root.id,
            "Shared folder copied"
        );
        Ok(Some(root))
    }

    fn copy_subtree(
        &self,
        source: Item,
        target_user_id: i64,
        target_parent_id: Option<Uuid>,
        depth: usize,
    ) -> BoxFuture<'_, AppResult<Item>> {
        async move {
            if depth >= MAX_TREE_DEPTH {
                return Err(AppError::validation("Tree depth limit exceeded"));
            }

            let clone = self
                .items
                .insert(&CreateItem::folder(
                    target_user_id,
                    source.name.clone(),
                    target_parent_id,
                ))
                .await?;

            for child in self.items.children_of(source.id).await? {
                match child.kind {
                    ItemKind::Folder => {
                        self.copy_subtree(child, target_user_id, Some(clone.id), depth + 1)
                            .await?;
                    }
                    ItemKind::File => {
                        self.items
                            .insert(&CreateItem {
                                user_id: target_user_id,
                                name: child.name,
                                kind: ItemKind::File,
                                file_handle: child.file_handle,
                                size: child.size,
                                parent_id: Some(clone.id),
                            })
                            .await?;
                    }
                }
            }

            Ok(clone)
        }
        .boxed()
    }
}
