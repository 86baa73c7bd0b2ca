//! Catalogs inbound chat attachments as root-level file items.

use std::sync::Arc;

use tracing::info;

use gramdrive_core::result::AppResult;
use gramdrive_database::store::{ItemStore, UserStore};
use gramdrive_entity::attachment::Attachment;
use gramdrive_entity::item::{CreateItem, Item};
use gramdrive_entity::user::User;

/// Turns classified attachments into catalog entries.
#[derive(Clone)]
pub struct IngestService {
    users: Arc<dyn UserStore>,
    items: Arc<dyn ItemStore>,
}

impl IngestService {
    /// Create a new ingest service.
    pub fn new(users: Arc<dyn UserStore>, items: Arc<dyn ItemStore>) -> Self {
        Self { users, items }
    }

    /// Insert or refresh a user row. Called on every inbound interaction
    /// so the username stays current.
    pub async fn register_user(&self, user_id: i64, username: Option<&str>) -> AppResult<User> {
        self.users.upsert(user_id, username).await
    }

    /// Catalog an attachment as a root-level file for the sending user.
    ///
    /// The user row is upserted first so every item has a valid owner.
    pub async fn ingest(
        &self,
        user_id: i64,
        username: Option<&str>,
        attachment: Attachment,
    ) -> AppResult<Item> {
        self.register_user(user_id, username).await?;

        let item = self
            .items
            .insert(&CreateItem::root_file(
                user_id,
                attachment.name,
                attachment.handle,
                attachment.size.max(0),
            ))
            .await?;

        info!(
            user_id,
            item_id = %item.id,
            name = %item.name,
            kind = ?attachment.kind,
            size = item.size,
            "Attachment cataloged"
        );
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{MemoryItemStore, MemoryUserStore};
    use gramdrive_entity::attachment::AttachmentKind;

    fn service() -> (IngestService, Arc<MemoryUserStore>, Arc<MemoryItemStore>) {
        let users = Arc::new(MemoryUserStore::new());
        let items = Arc::new(MemoryItemStore::new());
        (IngestService::new(users.clone(), items.clone()), users, items)
    }

    #[tokio::test]
    async fn test_ingest_creates_root_file_and_user() {
        let (svc, users, _) = service();
        let attachment = Attachment {
            kind: AttachmentKind::Document,
            handle: "tg-file-1".to_string(),
            name: "report.pdf".to_string(),
            size: 1234,
        };

        let item = svc.ingest(7, Some("alice"), attachment).await.unwrap();

        assert_eq!(item.user_id, 7);
        assert_eq!(item.parent_id, None);
        assert!(!item.kind.is_folder());
        assert_eq!(item.file_handle.as_deref(), Some("tg-file-1"));
        assert_eq!(item.size, 1234);

        let user = users.find_by_id(7).await.unwrap().unwrap();
        assert_eq!(user.username.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_ingest_refreshes_username() {
        let (svc, users, _) = service();
        let attachment = |n: &str| Attachment {
            kind: AttachmentKind::Photo,
            handle: "h".to_string(),
            name: n.to_string(),
            size: 0,
        };

        svc.ingest(7, Some("old_name"), attachment("a.jpg")).await.unwrap();
        svc.ingest(7, Some("new_name"), attachment("b.jpg")).await.unwrap();

        let user = users.find_by_id(7).await.unwrap().unwrap();
        assert_eq!(user.username.as_deref(), Some("new_name"));
    }

    #[tokio::test]
    async fn test_negative_size_is_clamped() {
        let (svc, _, _) = service();
        let attachment = Attachment {
            kind: AttachmentKind::Unknown,
            handle: "h".to_string(),
            name: "odd".to_string(),
            size: -5,
        };
        let item = svc.ingest(7, None, attachment).await.unwrap();
        assert_eq!(item.size, 0);
    }
}
