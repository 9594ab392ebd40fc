//! Telegram Bot API module
//!
//! - **Client**: thin JSON client over `sendMessage`, `getUpdates` and `getMe`
//! - **Channel**: `DeliveryChannel` implementation delivering passcodes as chat messages
//! - **Listener**: long-polling loop answering users who message the bot

pub mod channel;
pub mod client;
pub mod listener;
pub mod types;

pub use channel::TelegramDeliveryChannel;
pub use client::TelegramClient;
pub use listener::{reply_for, BotListener};
pub use types::{ChatId, Message, Update};
