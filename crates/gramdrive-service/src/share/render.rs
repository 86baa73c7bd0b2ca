//! Textual outline rendering of a catalog subtree.
//!
//! Produces the plain-text tree the bot shows for a shared folder.
//! Truncation to the chat message limit is the caller's concern.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use uuid::Uuid;

use gramdrive_core::error::AppError;
use gramdrive_core::result::AppResult;
use gramdrive_database::store::ItemStore;
use gramdrive_entity::item::Item;

use crate::catalog::MAX_TREE_DEPTH;

/// Renders a subtree as an indented, numbered outline.
#[derive(Clone)]
pub struct TreeRenderer {
    items: Arc<dyn ItemStore>,
}

impl TreeRenderer {
    /// Create a new tree renderer.
    pub fn new(items: Arc<dyn ItemStore>) -> Self {
        Self { items }
    }

    /// Render the subtree under `folder_id` (the whole forest root when
    /// `None`). Folders sort before files at each level, then
    /// alphabetically; siblings are numbered within their group and
    /// indented two spaces per nesting level, starting at `indent`.
    pub async fn render(
        &self,
        user_id: i64,
        folder_id: Option<Uuid>,
        indent: usize,
    ) -> AppResult<String> {
        let mut out = String::new();
        self.render_level(user_id, folder_id, indent, &mut out).await?;
        Ok(out)
    }

    fn render_level<'a>(
        &'a self,
        user_id: i64,
        folder_id: Option<Uuid>,
        depth: usize,
        out: &'a mut String,
    ) -> BoxFuture<'a, AppResult<()>> {
        async move {
            if depth >= MAX_TREE_DEPTH {
                return Err(AppError::validation("Tree depth limit exceeded"));
            }

            let mut children = match folder_id {
                Some(folder) => self.items.children_of(folder).await?,
                None => self.items.list_children(user_id, None).await?,
            };
            sort_for_display(&mut children);

            for (position, child) in children.iter().enumerate() {
                let icon = if child.kind.is_folder() { "📁" } else { "📄" };
                out.push_str(&format!(
                    "{}{}. {} {}\n",
                    "  ".repeat(depth),
                    position + 1,
                    icon,
                    child.name
                ));
                if child.kind.is_folder() {
                    self.render_level(user_id, Some(child.id), depth + 1, out)
                        .await?;
                }
            }
            Ok(())
        }
        .boxed()
    }
}

/// Folders before files, then case-insensitive name order.
fn sort_for_display(items: &mut [Item]) {
    items.sort_by(|a, b| {
        b.kind
            .cmp(&a.kind)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}

/// Truncate a rendered tree to a chat-safe character budget.
pub fn truncate_for_chat(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
