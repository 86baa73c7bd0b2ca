//! Chat transport capability trait.
//!
//! GramDrive never stores file bytes itself. Uploading, storing, and
//! streaming content is delegated to the messaging provider, which the
//! services reach only through this trait. The concrete Telegram Bot API
//! client lives in `gramdrive-transport`; tests substitute an in-memory
//! double.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// The kind of send to perform for a file handle.
///
/// The provider exposes separate send methods per media kind; the kind is
/// chosen from the file name suffix, not from stored metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendKind {
    /// Generic document send.
    Document,
    /// Photo send.
    Photo,
    /// Video send.
    Video,
    /// Audio send.
    Audio,
}

/// Outbound chat capability used by the services.
///
/// Every call must be bounded by a timeout; on timeout or connectivity
/// loss implementations return an `ErrorKind::Transport` error rather
/// than hanging.
#[async_trait]
pub trait ChatTransport: Send + Sync + 'static {
    /// Send a plain text message to a chat.
    async fn send_text(&self, chat_id: i64, text: &str) -> AppResult<()>;

    /// Send a stored file (by provider handle) to a chat.
    async fn send_file(
        &self,
        chat_id: i64,
        handle: &str,
        kind: SendKind,
        caption: Option<&str>,
    ) -> AppResult<()>;

    /// Fetch the bytes behind a provider file handle.
    async fn fetch_file(&self, handle: &str) -> AppResult<Bytes>;
}
