//! Inbound update listener
//!
//! Long-polls `getUpdates` and answers users who write to the bot: `/start`
//! gets their Telegram id (needed to register a phone number), any other
//! plain text gets a registration hint. Other commands are ignored.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::client::TelegramClient;
use super::types::{ChatId, Update};
use crate::InfrastructureError;

const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Reply text for an inbound message, `None` when the bot stays silent
pub fn reply_for(text: &str, user_id: i64) -> Option<String> {
    let text = text.trim();
    if let Some(command) = text.strip_prefix('/') {
        let name = command
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .split('@')
            .next()
            .unwrap_or_default();
        return (name == "start").then(|| {
            format!(
                "Welcome! Your Telegram user ID is {}. Please register your phone number with the app.",
                user_id
            )
        });
    }
    if text.is_empty() {
        return None;
    }
    Some("Please use the mobile app to register your phone number.".to_string())
}

/// Long-polling loop over the Bot API
pub struct BotListener {
    client: Arc<TelegramClient>,
    poll_timeout_secs: u64,
    offset: Option<i64>,
}

impl BotListener {
    pub fn new(client: Arc<TelegramClient>, poll_timeout_secs: u64) -> Self {
        Self {
            client,
            poll_timeout_secs,
            offset: None,
        }
    }

    /// Offset that will be acknowledged on the next poll
    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    /// Poll until the task is dropped, backing off after failures
    pub async fn run(mut self) {
        info!(poll_timeout_secs = self.poll_timeout_secs, "Telegram listener started");
        let mut backoff = INITIAL_BACKOFF;

        loop {
            match self.poll_once().await {
                Ok(_) => backoff = INITIAL_BACKOFF,
                Err(e) => {
                    warn!(error = %e, retry_in_secs = backoff.as_secs(), "Telegram polling failed");
                    tokio::time::sleep(backoff).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF);
                }
            }
        }
    }

    /// Fetch one batch of updates and answer each, returning the batch size
    ///
    /// Failing to answer one message does not stop the batch; only a failed
    /// `getUpdates` is returned as an error.
    pub async fn poll_once(&mut self) -> Result<usize, InfrastructureError> {
        let updates = self
            .client
            .get_updates(self.offset, self.poll_timeout_secs)
            .await?;

        for update in &updates {
            self.offset = Some(self.offset.map_or(update.update_id + 1, |o| o.max(update.update_id + 1)));

            let Some((chat_id, reply)) = reply_to(update) else {
                continue;
            };
            if let Err(e) = self.client.send_message(&chat_id, &reply).await {
                warn!(update_id = update.update_id, error = %e, "Failed to answer Telegram message");
            } else {
                debug!(update_id = update.update_id, "Answered Telegram message");
            }
        }

        Ok(updates.len())
    }
}

fn reply_to(update: &Update) -> Option<(ChatId, String)> {
    let message = update.message.as_ref()?;
    let text = message.text.as_deref()?;
    let user_id = message.from.as_ref().map_or(message.chat.id, |user| user.id);
    let reply = reply_for(text, user_id)?;
    Some((ChatId::Id(message.chat.id), reply))
}
