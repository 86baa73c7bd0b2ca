//! In-memory store and transport doubles for service tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use gramdrive_core::error::AppError;
use gramdrive_core::result::AppResult;
use gramdrive_core::traits::transport::{ChatTransport, SendKind};
use gramdrive_database::store::{ItemStore, UserStore};
use gramdrive_entity::item::{CreateItem, Item, ItemKind};
use gramdrive_entity::user::User;

/// Folders before files, newest first — the repository listing order.
fn sort_listing(items: &mut [Item]) {
    items.sort_by(|a, b| {
        b.kind
            .cmp(&a.kind)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

/// In-memory `items` table.
#[derive(Default)]
pub struct MemoryItemStore {
    rows: Mutex<Vec<Item>>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect(&self, pred: impl Fn(&Item) -> bool) -> Vec<Item> {
        let mut matched: Vec<Item> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|i| pred(i))
            .cloned()
            .collect();
        sort_listing(&mut matched);
        matched
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn insert(&self, data: &CreateItem) -> AppResult<Item> {
        let item = Item {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            name: data.name.clone(),
            kind: data.kind,
            file_handle: data.file_handle.clone(),
            size: data.size,
            parent_id: data.parent_id,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Item>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn list_children(&self, user_id: i64, parent_id: Option<Uuid>) -> AppResult<Vec<Item>> {
        Ok(self.collect(|i| i.user_id == user_id && i.parent_id == parent_id))
    }

    async fn list_files(&self, user_id: i64) -> AppResult<Vec<Item>> {
        Ok(self.collect(|i| i.user_id == user_id && i.kind == ItemKind::File))
    }

    async fn list_folders(&self, user_id: i64) -> AppResult<Vec<Item>> {
        Ok(self.collect(|i| i.user_id == user_id && i.kind == ItemKind::Folder))
    }

    async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<Item>> {
        Ok(self.collect(|i| i.user_id == user_id))
    }

    async fn children_of(&self, parent_id: Uuid) -> AppResult<Vec<Item>> {
        Ok(self.collect(|i| i.parent_id == Some(parent_id)))
    }

    async fn set_name(&self, id: Uuid, name: &str) -> AppResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.name = name.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn set_parent(&self, id: Uuid, parent_id: Option<Uuid>) -> AppResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.parent_id = parent_id;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn reparent_children(
        &self,
        parent_id: Uuid,
        new_parent: Option<Uuid>,
    ) -> AppResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let mut affected = 0;
        for item in rows.iter_mut().filter(|i| i.parent_id == Some(parent_id)) {
            item.parent_id = new_parent;
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|i| i.id != id);
        Ok((before - rows.len()) as u64)
    }

    async fn delete_by_user(&self, user_id: i64) -> AppResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|i| i.user_id != user_id);
        Ok((before - rows.len()) as u64)
    }
}

/// In-memory `users` table.
#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn upsert(&self, id: i64, username: Option<&str>) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(user) = rows.iter_mut().find(|u| u.id == id) {
            user.username = username.map(str::to_string);
            return Ok(user.clone());
        }
        let user = User {
            id,
            username: username.map(str::to_string),
            is_blocked: false,
            created_at: Utc::now(),
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<User>> {
        let mut users = self.rows.lock().unwrap().clone();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn set_blocked(&self, id: i64, blocked: bool) -> AppResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.is_blocked = blocked;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> AppResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|u| u.id != id);
        Ok((before - rows.len()) as u64)
    }
}

/// What a [`RecordingTransport`] delivered.
#[derive(Debug, Clone, PartialEq)]
pub enum SentMessage {
    /// A plain text send.
    Text { chat_id: i64, text: String },
    /// A file send by provider handle.
    File {
        chat_id: i64,
        handle: String,
        kind: SendKind,
        caption: Option<String>,
    },
}

/// Transport double that records successful sends and can be told to
/// fail specific handles.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<SentMessage>>,
    failing_handles: Mutex<HashSet<String>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every send of this handle fail.
    pub fn fail_handle(&self, handle: &str) {
        self.failing_handles
            .lock()
            .unwrap()
            .insert(handle.to_string());
    }

    /// All successful sends, in order.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_text(&self, chat_id: i64, text: &str) -> AppResult<()> {
        self.sent.lock().unwrap().push(SentMessage::Text {
            chat_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_file(
        &self,
        chat_id: i64,
        handle: &str,
        kind: SendKind,
        caption: Option<&str>,
    ) -> AppResult<()> {
        if self.failing_handles.lock().unwrap().contains(handle) {
            return Err(AppError::transport("simulated send failure"));
        }
        self.sent.lock().unwrap().push(SentMessage::File {
            chat_id,
            handle: handle.to_string(),
            kind,
            caption: caption.map(str::to_string),
        });
        Ok(())
    }

    async fn fetch_file(&self, handle: &str) -> AppResult<Bytes> {
        if self.failing_handles.lock().unwrap().contains(handle) {
            return Err(AppError::transport("simulated fetch failure"));
        }
        Ok(Bytes::from(format!("bytes-of-{handle}")))
    }
}
