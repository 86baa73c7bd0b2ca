//! Long-poll update loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::client::TelegramClient;
use crate::handlers::BotHandlers;

/// Backoff after a failed poll so a dead network does not spin the loop.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Pulls updates from the Bot API and feeds them through [`BotHandlers`]
/// until the shutdown signal flips.
pub struct UpdatePoller {
    client: Arc<TelegramClient>,
    handlers: BotHandlers,
}

impl UpdatePoller {
    pub fn new(client: Arc<TelegramClient>, handlers: BotHandlers) -> Self {
        Self { client, handlers }
    }

    /// Run until `shutdown` becomes true. Updates are processed one at a
    /// time, in order; a handler failure is logged and the loop moves on.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut offset = 0i64;
        info!("Update poller started");

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                polled = self.client.get_updates(offset) => {
                    match polled {
                        Ok(updates) => {
                            for update in updates {
                                offset = offset.max(update.update_id + 1);
                                if let Err(e) = self.handlers.handle(update).await {
                                    warn!(error = %e, "Update handling failed");
                                }
                            }
                        }
                        Err(e) => {
                            warn!(error = %e, "Long poll failed, backing off");
                            tokio::time::sleep(POLL_RETRY_DELAY).await;
                        }
                    }
                }
            }
        }

        info!("Update poller stopped");
    }
}
