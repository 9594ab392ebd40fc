//! Passcode delivery through Telegram chat messages

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use tg_core::domain::value_objects::DeliveryTarget;
use tg_core::errors::DeliveryError;
use tg_core::services::verification::DeliveryChannel;

use super::client::TelegramClient;
use super::types::ChatId;

/// Delivery channel sending `sendMessage` to the subject's chat
pub struct TelegramDeliveryChannel {
    client: Arc<TelegramClient>,
}

impl TelegramDeliveryChannel {
    pub fn new(client: Arc<TelegramClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DeliveryChannel for TelegramDeliveryChannel {
    async fn send(&self, target: &DeliveryTarget, message: &str) -> Result<String, DeliveryError> {
        let chat_id = ChatId::from(target);
        match self.client.send_message(&chat_id, message).await {
            Ok(sent) => {
                info!(
                    chat = %target,
                    message_id = sent.message_id,
                    "Telegram message sent"
                );
                Ok(sent.message_id.to_string())
            }
            Err(e) => {
                error!(chat = %target, error = %e, "Telegram sendMessage failed");
                Err(e.into())
            }
        }
    }

    fn provider_name(&self) -> &str {
        "Telegram"
    }
}
