//! Telegram transport configuration.

use serde::{Deserialize, Serialize};

/// Telegram Bot API transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather.
    pub bot_token: String,
    /// Bot API base URL (overridable for a self-hosted Bot API server).
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Long-poll timeout in seconds for `getUpdates`.
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_seconds: u64,
    /// Per-request timeout in seconds for all other Bot API calls.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Delay between consecutive sends during folder distribution,
    /// in milliseconds. The Bot API rate-limits outbound messages.
    #[serde(default = "default_send_delay")]
    pub send_delay_ms: u64,
}

fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_timeout() -> u64 {
    30
}

fn default_request_timeout() -> u64 {
    15
}

fn default_send_delay() -> u64 {
    300
}
