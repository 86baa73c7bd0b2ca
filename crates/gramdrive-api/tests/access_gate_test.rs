//! Router-level tests for blocked-user gating.
//!
//! Drives requests through the full router with `oneshot`, so the
//! handler gating, the error mapping, and the DTO parsing are all
//! exercised the way the web client sees them.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use bytes::Bytes;
use chrono::Utc;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use gramdrive_api::{build_router, AppState};
use gramdrive_core::config::AppConfig;
use gramdrive_core::result::AppResult;
use gramdrive_core::traits::transport::{ChatTransport, SendKind};
use gramdrive_database::store::{ItemStore, UserStore};
use gramdrive_entity::item::{CreateItem, Item, ItemKind};
use gramdrive_entity::user::User;
use gramdrive_service::{AccessService, CatalogService};

/// In-memory `items` table.
#[derive(Default)]
struct MemoryItemStore {
    rows: Mutex<Vec<Item>>,
}

impl MemoryItemStore {
    fn collect(&self, pred: impl Fn(&Item) -> bool) -> Vec<Item> {
        let mut matched: Vec<Item> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|i| pred(i))
            .cloned()
            .collect();
        // Folders before files, newest first.
        matched.sort_by(|a, b| {
            b.kind
                .cmp(&a.kind)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
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
struct MemoryUserStore {
    rows: Mutex<Vec<User>>,
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

/// Transport double; these tests never assert on deliveries.
struct NullTransport;

#[async_trait]
impl ChatTransport for NullTransport {
    async fn send_text(&self, _chat_id: i64, _text: &str) -> AppResult<()> {
        Ok(())
    }

    async fn send_file(
        &self,
        _chat_id: i64,
        _handle: &str,
        _kind: SendKind,
        _caption: Option<&str>,
    ) -> AppResult<()> {
        Ok(())
    }

    async fn fetch_file(&self, _handle: &str) -> AppResult<Bytes> {
        Ok(Bytes::new())
    }
}

/// Test application context over in-memory stores.
struct TestApp {
    router: Router,
    items: Arc<MemoryItemStore>,
    users: Arc<MemoryUserStore>,
}

impl TestApp {
    fn new() -> Self {
        let items = Arc::new(MemoryItemStore::default());
        let users = Arc::new(MemoryUserStore::default());
        let item_store: Arc<dyn ItemStore> = items.clone();
        let user_store: Arc<dyn UserStore> = users.clone();

        let catalog = Arc::new(CatalogService::new(item_store.clone()));
        let access = Arc::new(AccessService::new(user_store, item_store, "drive_admin"));
        let transport: Arc<dyn ChatTransport> = Arc::new(NullTransport);

        let config: AppConfig = serde_json::from_value(json!({
            "server": {},
            "database": { "url": "postgres://localhost/unused" },
            "telegram": { "bot_token": "unused" },
            "access": { "admin_username": "drive_admin" },
            "logging": {},
        }))
        .expect("test config");

        let state = AppState {
            config: Arc::new(config),
            catalog,
            access,
            transport,
        };

        Self {
            router: build_router(state),
            items,
            users,
        }
    }

    async fn register_blocked(&self, user_id: i64, username: &str) {
        self.users.upsert(user_id, Some(username)).await.unwrap();
        self.users.set_blocked(user_id, true).await.unwrap();
    }

    async fn get(&self, uri: &str) -> StatusCode {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.router
            .clone()
            .oneshot(request)
            .await
            .unwrap()
            .status()
    }

    async fn post_json(&self, uri: &str, body: serde_json::Value) -> StatusCode {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.router
            .clone()
            .oneshot(request)
            .await
            .unwrap()
            .status()
    }
}

#[tokio::test]
async fn test_liveness_is_ungated() {
    let app = TestApp::new();
    assert_eq!(app.get("/").await, StatusCode::OK);
}

#[tokio::test]
async fn test_blocked_user_cannot_list_files() {
    let app = TestApp::new();
    app.register_blocked(7, "bob").await;

    assert_eq!(app.get("/api/files?user_id=7").await, StatusCode::FORBIDDEN);
    assert_eq!(
        app.get("/api/profile?user_id=7").await,
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn test_blocked_user_cannot_mutate() {
    let app = TestApp::new();
    app.register_blocked(7, "bob").await;

    let status = app
        .post_json("/api/create_folder", json!({ "user_id": 7, "name": "docs" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let status = app
        .post_json("/api/delete_all", json!({ "user_id": 7 }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_blocked_owner_gates_item_addressed_routes() {
    let app = TestApp::new();
    app.register_blocked(7, "bob").await;
    let folder = app
        .items
        .insert(&CreateItem::folder(7, "docs", None))
        .await
        .unwrap();

    let status = app
        .post_json(
            "/api/rename",
            json!({ "item_id": folder.id, "new_name": "work" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let status = app
        .post_json("/api/delete", json!({ "item_id": folder.id }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Still there.
    let survivor = app.items.find_by_id(folder.id).await.unwrap().unwrap();
    assert_eq!(survivor.name, "docs");
}

#[tokio::test]
async fn test_active_user_passes_the_gate() {
    let app = TestApp::new();
    app.users.upsert(8, Some("alice")).await.unwrap();

    assert_eq!(app.get("/api/files?user_id=8").await, StatusCode::OK);

    let status = app
        .post_json("/api/create_folder", json!({ "user_id": 8, "name": "docs" }))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_blocked_admin_is_never_gated() {
    let app = TestApp::new();
    // The configured admin username wins over the blocked flag.
    app.register_blocked(1, "drive_admin").await;

    assert_eq!(app.get("/api/files?user_id=1").await, StatusCode::OK);
}
