//! Access control configuration.

use serde::{Deserialize, Serialize};

/// Access control settings.
///
/// GramDrive has a single privileged identity, matched by username.
/// The matching user can never be blocked and may manage other accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Username of the administrator account.
    pub admin_username: String,
}
