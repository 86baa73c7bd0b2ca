//! Bot-side update handlers.
//!
//! Routes long-poll updates into the services: /start (optionally with a
//! deep-link share token), inbound attachments into ingestion, and
//! inline-keyboard callbacks for shared folders.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use gramdrive_core::error::ErrorKind;
use gramdrive_core::result::AppResult;
use gramdrive_core::traits::transport::ChatTransport;
use gramdrive_entity::attachment::{Attachment, AttachmentKind};
use gramdrive_service::share::render::truncate_for_chat;
use gramdrive_service::share::send_kind_for_name;
use gramdrive_service::{AccessService, Distributor, IngestService, ShareService, ShareToken, TreeRenderer};

use crate::client::TelegramClient;
use crate::types::{CallbackQuery, InlineKeyboardButton, InlineKeyboardMarkup, Message, Update};

const GREETING: &str = "Привет! Отправь мне файл, фото или видео.";
const BLOCKED_REPLY: &str = "⛔ Доступ ограничен.";
const SAVE_FAILED_REPLY: &str = "Ошибка при сохранении в базу.";
const SHARE_GONE_REPLY: &str = "Папка больше недоступна.";

/// Telegram caps messages at 4096 chars; leave headroom for the header line.
const VIEW_CHAR_BUDGET: usize = 4000;

/// An inline-keyboard action on a shared folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    Save,
    Send,
    View,
}

/// Parse `save:<uuid>` / `send:<uuid>` / `view:<uuid>` callback data.
pub fn parse_callback(data: &str) -> Option<(CallbackAction, Uuid)> {
    let (action, raw_id) = data.split_once(':')?;
    let action = match action {
        "save" => CallbackAction::Save,
        "send" => CallbackAction::Send,
        "view" => CallbackAction::View,
        _ => return None,
    };
    let id = Uuid::parse_str(raw_id).ok()?;
    Some((action, id))
}

/// Classify the attachment in an inbound message.
///
/// Priority when several are present: document > photo > video > audio.
/// Photos take the largest rendition and a synthesized name from the
/// message timestamp.
pub fn classify_attachment(message: &Message) -> Option<Attachment> {
    if let Some(document) = &message.document {
        return Some(Attachment {
            kind: AttachmentKind::Document,
            handle: document.file_id.clone(),
            name: document
                .file_name
                .clone()
                .unwrap_or_else(|| "document".to_string()),
            size: document.file_size.unwrap_or(0),
        });
    }
    if let Some(photos) = &message.photo {
        let largest = photos.last()?;
        return Some(Attachment {
            kind: AttachmentKind::Photo,
            handle: largest.file_id.clone(),
            name: format!("photo_{}.jpg", message.date),
            size: largest.file_size.unwrap_or(0),
        });
    }
    if let Some(video) = &message.video {
        return Some(Attachment {
            kind: AttachmentKind::Video,
            handle: video.file_id.clone(),
            name: video
                .file_name
                .clone()
                .unwrap_or_else(|| "video.mp4".to_string()),
            size: video.file_size.unwrap_or(0),
        });
    }
    if let Some(audio) = &message.audio {
        return Some(Attachment {
            kind: AttachmentKind::Audio,
            handle: audio.file_id.clone(),
            name: audio
                .file_name
                .clone()
                .unwrap_or_else(|| "audio".to_string()),
            size: audio.file_size.unwrap_or(0),
        });
    }
    None
}

/// Update router wired over the services.
pub struct BotHandlers {
    client: Arc<TelegramClient>,
    access: Arc<AccessService>,
    ingest: Arc<IngestService>,
    shares: Arc<ShareService>,
    renderer: Arc<TreeRenderer>,
    distributor: Arc<Distributor>,
}

impl BotHandlers {
    pub fn new(
        client: Arc<TelegramClient>,
        access: Arc<AccessService>,
        ingest: Arc<IngestService>,
        shares: Arc<ShareService>,
        renderer: Arc<TreeRenderer>,
        distributor: Arc<Distributor>,
    ) -> Self {
        Self {
            client,
            access,
            ingest,
            shares,
            renderer,
            distributor,
        }
    }

    /// Route one update. Errors are handled here; the poll loop only logs.
    pub async fn handle(&self, update: Update) -> AppResult<()> {
        if let Some(message) = update.message {
            return self.handle_message(message).await;
        }
        if let Some(callback) = update.callback_query {
            return self.handle_callback(callback).await;
        }
        Ok(())
    }

    async fn handle_message(&self, message: Message) -> AppResult<()> {
        let Some(from) = message.from.clone() else {
            return Ok(());
        };
        let chat_id = message.chat.id;

        if self.access.is_blocked(from.id).await? {
            debug!(user_id = from.id, "Ignoring message from blocked user");
            self.client.send_text(chat_id, BLOCKED_REPLY).await?;
            return Ok(());
        }

        if let Some(text) = message.text.as_deref() {
            if let Some(rest) = text.strip_prefix("/start") {
                self.ingest
                    .register_user(from.id, from.username.as_deref())
                    .await?;

                let payload = rest.trim();
                if payload.is_empty() {
                    self.client.send_text(chat_id, GREETING).await?;
                } else {
                    self.handle_share_link(chat_id, payload).await?;
                }
                return Ok(());
            }
        }

        if let Some(attachment) = classify_attachment(&message) {
            match self
                .ingest
                .ingest(from.id, from.username.as_deref(), attachment)
                .await
            {
                Ok(item) => {
                    self.client
                        .send_text(chat_id, &format!("✅ Сохранено: {}", item.name))
                        .await?;
                }
                Err(e) => {
                    warn!(user_id = from.id, error = %e, "Ingestion failed");
                    self.client.send_text(chat_id, SAVE_FAILED_REPLY).await?;
                }
            }
        }
        Ok(())
    }

    /// Resolve a deep-link share token: send the file directly, or show a
    /// folder summary with save/send/view actions.
    async fn handle_share_link(&self, chat_id: i64, raw_token: &str) -> AppResult<()> {
        let token: ShareToken = match raw_token.parse() {
            Ok(token) => token,
            Err(_) => {
                self.client
                    .send_text(chat_id, "Ссылка не распознана.")
                    .await?;
                return Ok(());
            }
        };

        let item = match self.shares.resolve(token).await {
            Ok(item) => item,
            Err(e) if e.kind == ErrorKind::NotFound => {
                self.client.send_text(chat_id, SHARE_GONE_REPLY).await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        match token {
            ShareToken::File(_) => {
                let Some(handle) = item.file_handle.as_deref() else {
                    self.client.send_text(chat_id, SHARE_GONE_REPLY).await?;
                    return Ok(());
                };
                self.client
                    .send_file(
                        chat_id,
                        handle,
                        send_kind_for_name(&item.name),
                        Some(&item.name),
                    )
                    .await?;
            }
            ShareToken::Folder(folder_id) => {
                let keyboard = InlineKeyboardMarkup {
                    inline_keyboard: vec![
                        vec![InlineKeyboardButton::new(
                            "💾 Сохранить себе",
                            format!("save:{folder_id}"),
                        )],
                        vec![InlineKeyboardButton::new(
                            "📤 Отправить файлы",
                            format!("send:{folder_id}"),
                        )],
                        vec![InlineKeyboardButton::new(
                            "👀 Посмотреть структуру",
                            format!("view:{folder_id}"),
                        )],
                    ],
                };
                self.client
                    .send_message(
                        chat_id,
                        &format!("📁 С тобой поделились папкой «{}».", item.name),
                        Some(keyboard),
                    )
                    .await?;
            }
        }
        Ok(())
    }

    async fn handle_callback(&self, callback: CallbackQuery) -> AppResult<()> {
        // Acknowledge first so the client spinner stops even when the
        // action below fails.
        if let Err(e) = self.client.answer_callback(&callback.id).await {
            warn!(error = %e, "Callback acknowledgment failed");
        }

        let chat_id = callback
            .message
            .as_ref()
            .map(|m| m.chat.id)
            .unwrap_or(callback.from.id);

        let Some((action, folder_id)) = callback.data.as_deref().and_then(parse_callback) else {
            debug!(data = ?callback.data, "Unrecognized callback data");
            return Ok(());
        };

        if self.access.is_blocked(callback.from.id).await? {
            self.client.send_text(chat_id, BLOCKED_REPLY).await?;
            return Ok(());
        }

        let item = match self.shares.resolve(ShareToken::Folder(folder_id)).await {
            Ok(item) => item,
            Err(e) if e.kind == ErrorKind::NotFound => {
                self.client.send_text(chat_id, SHARE_GONE_REPLY).await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        match action {
            CallbackAction::Save => {
                match self
                    .shares
                    .copy_folder_recursive(folder_id, callback.from.id, None)
                    .await?
                {
                    Some(_) => {
                        self.client
                            .send_text(chat_id, "💾 Папка сохранена в твоё облако.")
                            .await?;
                    }
                    None => {
                        self.client.send_text(chat_id, SHARE_GONE_REPLY).await?;
                    }
                }
            }
            CallbackAction::Send => {
                self.distributor.distribute(chat_id, folder_id).await?;
            }
            CallbackAction::View => {
                let outline = self
                    .renderer
                    .render(item.user_id, Some(folder_id), 0)
                    .await?;
                let text = if outline.is_empty() {
                    format!("📁 {}\n(пусто)", item.name)
                } else {
                    format!("📁 {}\n{}", item.name, truncate_for_chat(&outline, VIEW_CHAR_BUDGET))
                };
                self.client.send_text(chat_id, &text).await?;
            }
        }
        Ok(())
    }
}
