//! # gramdrive-transport
//!
//! Telegram Bot API integration. Contains the HTTP client implementing
//! the [`ChatTransport`](gramdrive_core::traits::transport::ChatTransport)
//! capability, the long-poll update loop, the wire types, and the bot-side
//! handlers that route commands, uploads, and callbacks into the services.

pub mod client;
pub mod handlers;
pub mod poller;
pub mod types;

pub use client::TelegramClient;
pub use handlers::BotHandlers;
pub use poller::UpdatePoller;
