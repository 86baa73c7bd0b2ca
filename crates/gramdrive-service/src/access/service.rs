//! Blocked-flag checks and admin account management.

use std::sync::Arc;

use tracing::info;

use gramdrive_core::error::AppError;
use gramdrive_core::result::AppResult;
use gramdrive_database::store::{ItemStore, UserStore};
use gramdrive_entity::user::User;

/// Per-user blocked state plus the single administrator identity.
///
/// The administrator is identified by username equality against a
/// configured constant and can never be blocked, even if the flag is
/// set on their row.
#[derive(Clone)]
pub struct AccessService {
    users: Arc<dyn UserStore>,
    items: Arc<dyn ItemStore>,
    admin_username: String,
}

impl AccessService {
    /// Create a new access service.
    pub fn new(
        users: Arc<dyn UserStore>,
        items: Arc<dyn ItemStore>,
        admin_username: impl Into<String>,
    ) -> Self {
        Self {
            users,
            items,
            admin_username: admin_username.into(),
        }
    }

    /// Whether this user is the configured administrator.
    pub async fn is_admin(&self, user_id: i64) -> AppResult<bool> {
        Ok(self
            .users
            .find_by_id(user_id)
            .await?
            .is_some_and(|u| u.has_username(&self.admin_username)))
    }

    /// Whether this user is blocked. The administrator is never blocked;
    /// unknown users are not blocked either (they simply own nothing yet).
    pub async fn is_blocked(&self, user_id: i64) -> AppResult<bool> {
        let Some(user) = self.users.find_by_id(user_id).await? else {
            return Ok(false);
        };
        if user.has_username(&self.admin_username) {
            return Ok(false);
        }
        Ok(user.is_blocked)
    }

    /// Reject blocked callers with `Forbidden`.
    pub async fn ensure_not_blocked(&self, user_id: i64) -> AppResult<()> {
        if self.is_blocked(user_id).await? {
            return Err(AppError::forbidden("User is blocked"));
        }
        Ok(())
    }

    /// Reject non-admin callers with `Forbidden`.
    pub async fn ensure_admin(&self, user_id: i64) -> AppResult<()> {
        if !self.is_admin(user_id).await? {
            return Err(AppError::forbidden("Administrator access required"));
        }
        Ok(())
    }

    /// List every registered user (admin only).
    pub async fn list_users(&self, admin_id: i64) -> AppResult<Vec<User>> {
        self.ensure_admin(admin_id).await?;
        self.users.list_all().await
    }

    /// Set another user's blocked flag (admin only). The administrator
    /// cannot target their own account.
    pub async fn set_blocked(&self, admin_id: i64, target_id: i64, blocked: bool) -> AppResult<()> {
        self.ensure_admin(admin_id).await?;
        self.ensure_not_self(admin_id, target_id).await?;

        let affected = self.users.set_blocked(target_id, blocked).await?;
        if affected == 0 {
            return Err(AppError::not_found(format!("User {target_id} not found")));
        }
        info!(admin_id, target_id, blocked, "Blocked flag updated");
        Ok(())
    }

    /// Delete another user's account and entire catalog (admin only).
    pub async fn delete_account(&self, admin_id: i64, target_id: i64) -> AppResult<()> {
        self.ensure_admin(admin_id).await?;
        self.ensure_not_self(admin_id, target_id).await?;

        let removed = self.items.delete_by_user(target_id).await?;
        let affected = self.users.delete(target_id).await?;
        if affected == 0 {
            return Err(AppError::not_found(format!("User {target_id} not found")));
        }
        info!(admin_id, target_id, removed_items = removed, "Account deleted");
        Ok(())
    }

    async fn ensure_not_self(&self, admin_id: i64, target_id: i64) -> AppResult<()> {
        if admin_id == target_id {
            return Err(AppError::self_action(
                "The administrator cannot target their own account",
            ));
        }
        // The admin row itself stays untouchable even when addressed by id
        // from a second admin session.
        if let Some(target) = self.users.find_by_id(target_id).await? {
            if target.has_username(&self.admin_username) {
                return Err(AppError::self_action(
                    "The administrator account cannot be targeted",
                ));
            }
        }
        Ok(())
    }
}
