//! Best-effort distribution of a folder's contents to a chat.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::{info, warn};
use uuid::Uuid;

use gramdrive_core::error::AppError;
use gramdrive_core::result::AppResult;
use gramdrive_core::traits::transport::ChatTransport;
use gramdrive_database::store::ItemStore;

use crate::catalog::MAX_TREE_DEPTH;
use super::send_kind_for_name;

/// Sends every file in a folder subtree to a chat destination.
///
/// Distribution is explicitly best-effort: a failed send for one item is
/// logged and traversal continues. Store failures still abort, since
/// they mean the traversal itself can no longer be trusted. An
/// inter-send delay keeps the transport under its rate limit.
#[derive(Clone)]
pub struct Distributor {
    items: Arc<dyn ItemStore>,
    transport: Arc<dyn ChatTransport>,
    send_delay: Duration,
}

impl Distributor {
    /// Create a new distributor.
    pub fn new(
        items: Arc<dyn ItemStore>,
        transport: Arc<dyn ChatTransport>,
        send_delay: Duration,
    ) -> Self {
        Self {
            items,
            transport,
            send_delay,
        }
    }

    /// Send the contents of `folder_id` to `chat_id`, announcing each
    /// folder's name before descending into it.
    pub async fn distribute(&self, chat_id: i64, folder_id: Uuid) -> AppResult<()> {
        self.distribute_level(chat_id, folder_id, 0).await?;
        info!(chat_id, folder_id = %folder_id, "Folder distributed");
        Ok(())
    }

    fn distribute_level(
        &self,
        chat_id: i64,
        folder_id: Uuid,
        depth: usize,
    ) -> BoxFuture<'_, AppResult<()>> {
        async move {
            if depth >= MAX_TREE_DEPTH {
                return Err(AppError::validation("Tree depth limit exceeded"));
            }

            for child in self.items.children_of(folder_id).await? {
                if child.kind.is_folder() {
                    if let Err(e) = self
                        .transport
                        .send_text(chat_id, &format!("📁 {}", child.name))
                        .await
                    {
                        warn!(item = %child.id, error = %e, "Folder announcement failed");
                    }
                    tokio::time::sleep(self.send_delay).await;
                    self.distribute_level(chat_id, child.id, depth + 1).await?;
                    continue;
                }

                let Some(handle) = child.file_handle.as_deref() else {
                    warn!(item = %child.id, "File item without handle, skipping");
                    continue;
                };
                if let Err(e) = self
                    .transport
                    .send_file(
                        chat_id,
                        handle,
                        send_kind_for_name(&child.name),
                        Some(&child.name),
                    )
                    .await
                {
                    warn!(item = %child.id, error = %e, "Send failed, continuing");
                }
                tokio::time::sleep(self.send_delay).await;
            }
            Ok(())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{MemoryItemStore, RecordingTransport, SentMessage};
    use gramdrive_core::traits::transport::SendKind;
    use gramdrive_database::store::ItemStore as _;
    use gramdrive_entity::item::CreateItem;

    async fn setup() -> (Distributor, Arc<MemoryItemStore>, Arc<RecordingTransport>) {
        let store = Arc::new(MemoryItemStore::new());
        let transport = Arc::new(RecordingTransport::new());
        let distributor = Distributor::new(store.clone(), transport.clone(), Duration::ZERO);
        (distributor, store, transport)
    }

    #[tokio::test]
    async fn test_distributes_files_and_announces_folders() {
        let (distributor, store, transport) = setup().await;
        let root = store
            .insert(&CreateItem::folder(1, "Shared", None))
            .await
            .unwrap();
        let sub = store
            .insert(&CreateItem::folder(1, "Photos", Some(root.id)))
            .await
            .unwrap();
        let mut pic = CreateItem::root_file(1, "cat.png", "h1".to_string(), 1);
        pic.parent_id = Some(sub.id);
        store.insert(&pic).await.unwrap();

        distributor.distribute(99, root.id).await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 2);
        assert!(matches!(
            &sent[0],
            SentMessage::Text { chat_id: 99, text } if text.contains("Photos")
        ));
        assert!(matches!(
            &sent[1],
            SentMessage::File { chat_id: 99, handle, kind: SendKind::Photo, .. } if handle == "h1"
        ));
    }

    #[tokio::test]
    async fn test_send_failure_is_swallowed_and_traversal_continues() {
        let (distributor, store, transport) = setup().await;
        let root = store
            .insert(&CreateItem::folder(1, "Shared", None))
            .await
            .unwrap();
        let mut bad = CreateItem::root_file(1, "bad.pdf", "broken".to_string(), 1);
        bad.parent_id = Some(root.id);
        store.insert(&bad).await.unwrap();
        let mut good = CreateItem::root_file(1, "good.pdf", "ok".to_string(), 1);
        good.parent_id = Some(root.id);
        store.insert(&good).await.unwrap();

        transport.fail_handle("broken");
        distributor.distribute(5, root.id).await.unwrap();

        let delivered: Vec<_> = transport
            .sent()
            .into_iter()
            .filter_map(|m| match m {
                SentMessage::File { handle, .. } => Some(handle),
                _ => None,
            })
            .collect();
        assert_eq!(delivered, vec!["ok".to_string()]);
    }
}
