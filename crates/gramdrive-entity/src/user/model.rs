//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered GramDrive user.
///
/// The id is the messaging identity (Telegram chat/user id) and is
/// stable across sessions. The username is refreshed opportunistically
/// on every inbound interaction.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Messaging identity.
    pub id: i64,
    /// Provider username, if the account has one.
    pub username: Option<String>,
    /// Whether the user is blocked from catalog access.
    pub is_blocked: bool,
    /// When the user row was first created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check whether this user carries the given admin username.
    pub fn has_username(&self, username: &str) -> bool {
        self.username.as_deref() == Some(username)
    }
}
