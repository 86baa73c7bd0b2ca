//! Telegram Bot API HTTP client.
//!
//! Every request carries a timeout; connectivity failures surface as
//! `ErrorKind::Transport` errors instead of hanging callers.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use gramdrive_core::config::telegram::TelegramConfig;
use gramdrive_core::error::{AppError, ErrorKind};
use gramdrive_core::result::AppResult;
use gramdrive_core::traits::transport::{ChatTransport, SendKind};

use crate::types::{ApiResponse, InlineKeyboardMarkup, Message, TgFile, Update};

/// Extra headroom over the long-poll timeout so the HTTP client does not
/// cut the connection before the server answers.
const LONG_POLL_SLACK_SECONDS: u64 = 10;

/// Bot API client. Cheap to clone is not needed; share via `Arc`.
pub struct TelegramClient {
    http: reqwest::Client,
    /// `{api_url}/bot{token}` — method calls are appended to this.
    base: String,
    /// `{api_url}/file/bot{token}` — file paths are appended to this.
    file_base: String,
    poll_timeout: Duration,
}

impl TelegramClient {
    pub fn new(config: &TelegramConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Transport, "Failed to build Bot API client", e)
            })?;

        let api_url = config.api_url.trim_end_matches('/');
        Ok(Self {
            http,
            base: format!("{}/bot{}", api_url, config.bot_token),
            file_base: format!("{}/file/bot{}", api_url, config.bot_token),
            poll_timeout: Duration::from_secs(config.poll_timeout_seconds),
        })
    }

    /// Invoke a Bot API method and unwrap its response envelope.
    async fn call<T: DeserializeOwned>(&self, method: &str, payload: Value) -> AppResult<T> {
        let url = format!("{}/{}", self.base, method);
        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Transport,
                    format!("Bot API request '{method}' failed"),
                    e,
                )
            })?;

        let body: ApiResponse<T> = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Transport,
                format!("Bot API response for '{method}' is malformed"),
                e,
            )
        })?;

        if !body.ok {
            return Err(AppError::transport(format!(
                "Bot API '{method}' rejected: {}",
                body.description.unwrap_or_else(|| "no description".to_string())
            )));
        }
        body.result.ok_or_else(|| {
            AppError::transport(format!("Bot API '{method}' returned an empty result"))
        })
    }

    /// Long-poll for updates past `offset`.
    ///
    /// The per-request timeout is stretched beyond the server-side poll
    /// timeout so an idle poll completes normally instead of erroring.
    pub async fn get_updates(&self, offset: i64) -> AppResult<Vec<Update>> {
        let url = format!("{}/getUpdates", self.base);
        let response = self
            .http
            .post(&url)
            .timeout(self.poll_timeout + Duration::from_secs(LONG_POLL_SLACK_SECONDS))
            .json(&json!({
                "offset": offset,
                "timeout": self.poll_timeout.as_secs(),
                "allowed_updates": ["message", "callback_query"],
            }))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Transport, "Bot API long poll failed", e)
            })?;

        let body: ApiResponse<Vec<Update>> = response.json().await.map_err(|e| {
            AppError::with_source(ErrorKind::Transport, "Bot API update batch is malformed", e)
        })?;

        if !body.ok {
            return Err(AppError::transport(format!(
                "Bot API 'getUpdates' rejected: {}",
                body.description.unwrap_or_else(|| "no description".to_string())
            )));
        }
        Ok(body.result.unwrap_or_default())
    }

    /// Send a text message, optionally with an inline keyboard.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> AppResult<Message> {
        let mut payload = json!({ "chat_id": chat_id, "text": text });
        if let Some(markup) = keyboard {
            payload["reply_markup"] = serde_json::to_value(markup)?;
        }
        self.call("sendMessage", payload).await
    }

    /// Acknowledge a callback query so the client stops its spinner.
    pub async fn answer_callback(&self, callback_id: &str) -> AppResult<bool> {
        self.call("answerCallbackQuery", json!({ "callback_query_id": callback_id }))
            .await
    }

    async fn get_file(&self, handle: &str) -> AppResult<TgFile> {
        self.call("getFile", json!({ "file_id": handle })).await
    }
}

#[async_trait]
impl ChatTransport for TelegramClient {
    async fn send_text(&self, chat_id: i64, text: &str) -> AppResult<()> {
        self.send_message(chat_id, text, None).await?;
        Ok(())
    }

    async fn send_file(
        &self,
        chat_id: i64,
        handle: &str,
        kind: SendKind,
        caption: Option<&str>,
    ) -> AppResult<()> {
        let (method, field) = match kind {
            SendKind::Document => ("sendDocument", "document"),
            SendKind::Photo => ("sendPhoto", "photo"),
            SendKind::Video => ("sendVideo", "video"),
            SendKind::Audio => ("sendAudio", "audio"),
        };
        let mut payload = json!({ "chat_id": chat_id, field: handle });
        if let Some(text) = caption {
            payload["caption"] = Value::String(text.to_string());
        }
        debug!(chat_id, method, "Sending stored file");
        let _: Message = self.call(method, payload).await?;
        Ok(())
    }

    async fn fetch_file(&self, handle: &str) -> AppResult<Bytes> {
        let file = self.get_file(handle).await?;
        let path = file
            .file_path
            .ok_or_else(|| AppError::transport("Bot API returned a file without a path"))?;

        let url = format!("{}/{}", self.file_base, path);
        let response = self.http.get(&url).send().await.map_err(|e| {
            AppError::with_source(ErrorKind::Transport, "File download failed", e)
        })?;

        if !response.status().is_success() {
            return Err(AppError::transport(format!(
                "File download returned HTTP {}",
                response.status()
            )));
        }
        response.bytes().await.map_err(|e| {
            AppError::with_source(ErrorKind::Transport, "File download body read failed", e)
        })
    }
}
