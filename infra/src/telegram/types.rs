//! Bot API wire types, limited to the fields this service reads

use serde::{Deserialize, Serialize};

use tg_core::domain::value_objects::DeliveryTarget;

/// Envelope wrapping every Bot API response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

/// Target chat: numeric id or `@channelusername`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

impl From<&DeliveryTarget> for ChatId {
    fn from(target: &DeliveryTarget) -> Self {
        match target.as_str().trim().parse::<i64>() {
            Ok(id) => ChatId::Id(id),
            Err(_) => ChatId::Username(target.as_str().to_string()),
        }
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        ChatId::Id(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SendMessageParams<'a> {
    pub chat_id: &'a ChatId,
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetUpdatesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    pub timeout: u64,
    pub allowed_updates: &'static [&'static str],
}
