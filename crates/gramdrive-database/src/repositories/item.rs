//! Item repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use gramdrive_core::error::{AppError, ErrorKind};
use gramdrive_core::result::AppResult;
use gramdrive_core::types::{FilterField, SortField};
use gramdrive_entity::item::{CreateItem, Item, ItemKind};

use crate::query::{push_filters, push_order};
use crate::store::ItemStore;

/// Repository for item CRUD and forest queries.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    /// Create a new item repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Default listing order: folders before files, newest first.
    fn list_order() -> Vec<SortField> {
        vec![SortField::desc("kind"), SortField::desc("created_at")]
    }

    async fn fetch_items(
        &self,
        mut qb: QueryBuilder<'_, Postgres>,
        context: &'static str,
    ) -> AppResult<Vec<Item>> {
        qb.build_query_as::<Item>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, context, e))
    }
}

#[async_trait]
impl ItemStore for ItemRepository {
    async fn insert(&self, data: &CreateItem) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(
            "INSERT INTO items (user_id, name, kind, file_handle, size, parent_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.name)
        .bind(data.kind)
        .bind(&data.file_handle)
        .bind(data.size)
        .bind(data.parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert item", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Item>> {
        sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find item", e))
    }

    async fn list_children(&self, user_id: i64, parent_id: Option<Uuid>) -> AppResult<Vec<Item>> {
        let mut filters = vec![FilterField::eq_int("user_id", user_id)];
        match parent_id {
            Some(parent) => filters.push(FilterField::eq_uuid("parent_id", parent)),
            None => filters.push(FilterField::is_null("parent_id")),
        }

        let mut qb = QueryBuilder::new("SELECT * FROM items");
        push_filters(&mut qb, &filters);
        push_order(&mut qb, &Self::list_order());
        self.fetch_items(qb, "Failed to list children").await
    }

    async fn list_files(&self, user_id: i64) -> AppResult<Vec<Item>> {
        let mut qb = QueryBuilder::new("SELECT * FROM items");
        push_filters(&mut qb, &[FilterField::eq_int("user_id", user_id)]);
        qb.push(" AND kind <> ");
        qb.push_bind(ItemKind::Folder);
        push_order(&mut qb, &Self::list_order());
        self.fetch_items(qb, "Failed to list files").await
    }

    async fn list_folders(&self, user_id: i64) -> AppResult<Vec<Item>> {
        let mut qb = QueryBuilder::new("SELECT * FROM items");
        push_filters(&mut qb, &[FilterField::eq_int("user_id", user_id)]);
        qb.push(" AND kind = ");
        qb.push_bind(ItemKind::Folder);
        push_order(&mut qb, &Self::list_order());
        self.fetch_items(qb, "Failed to list folders").await
    }

    async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<Item>> {
        let mut qb = QueryBuilder::new("SELECT * FROM items");
        push_filters(&mut qb, &[FilterField::eq_int("user_id", user_id)]);
        push_order(&mut qb, &Self::list_order());
        self.fetch_items(qb, "Failed to list user items").await
    }

    async fn children_of(&self, parent_id: Uuid) -> AppResult<Vec<Item>> {
        let mut qb = QueryBuilder::new("SELECT * FROM items");
        push_filters(&mut qb, &[FilterField::eq_uuid("parent_id", parent_id)]);
        push_order(&mut qb, &Self::list_order());
        self.fetch_items(qb, "Failed to list folder contents").await
    }

    async fn set_name(&self, id: Uuid, name: &str) -> AppResult<u64> {
        let result = sqlx::query("UPDATE items SET name = $2 WHERE id = $1")
            .bind(id)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename item", e))?;
        Ok(result.rows_affected())
    }

    async fn set_parent(&self, id: Uuid, parent_id: Option<Uuid>) -> AppResult<u64> {
        let result = sqlx::query("UPDATE items SET parent_id = $2 WHERE id = $1")
            .bind(id)
            .bind(parent_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to move item", e))?;
        Ok(result.rows_affected())
    }

    async fn reparent_children(
        &self,
        parent_id: Uuid,
        new_parent: Option<Uuid>,
    ) -> AppResult<u64> {
        let result = sqlx::query("UPDATE items SET parent_id = $2 WHERE parent_id = $1")
            .bind(parent_id)
            .bind(new_parent)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to re-parent children", e)
            })?;
        Ok(result.rows_affected())
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete item", e))?;
        Ok(result.rows_affected())
    }

    async fn delete_by_user(&self, user_id: i64) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM items WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete user items", e)
            })?;
        Ok(result.rows_affected())
    }
}
