//! Telegram Bot API client
//!
//! Every call is a JSON `POST {api_base_url}/bot{token}/{method}`. The token
//! is part of the URL, so URLs are stripped from transport errors before
//! they reach logs or callers.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use tg_shared::config::TelegramConfig;

use super::types::{ApiResponse, ChatId, GetUpdatesParams, Message, SendMessageParams, Update, User};
use crate::InfrastructureError;

/// Client for the subset of the Bot API this service uses
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    request_timeout: Duration,
}

impl TelegramClient {
    /// Build a client from configuration
    ///
    /// # Errors
    ///
    /// `InfrastructureError::Config` if the bot token is empty or the HTTP
    /// client cannot be constructed.
    pub fn new(config: &TelegramConfig) -> Result<Self, InfrastructureError> {
        if config.bot_token.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "Telegram bot token is not set".to_string(),
            ));
        }

        let request_timeout = Duration::from_secs(config.request_timeout_secs.max(1));
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| InfrastructureError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.bot_token.trim().to_string(),
            request_timeout,
        })
    }

    /// Send a text message, returning the message Telegram created
    pub async fn send_message(&self, chat_id: &ChatId, text: &str) -> Result<Message, InfrastructureError> {
        self.call("sendMessage", &SendMessageParams { chat_id, text }, None)
            .await
    }

    /// Long-poll for new messages starting at `offset`
    ///
    /// The HTTP timeout is stretched past `timeout_secs` so an idle poll
    /// returns an empty batch rather than a transport error.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, InfrastructureError> {
        let params = GetUpdatesParams {
            offset,
            timeout: timeout_secs,
            allowed_updates: &["message"],
        };
        let http_timeout = self.request_timeout + Duration::from_secs(timeout_secs);
        self.call("getUpdates", &params, Some(http_timeout)).await
    }

    /// Identity of the bot owning the token
    pub async fn get_me(&self) -> Result<User, InfrastructureError> {
        self.call("getMe", &serde_json::json!({}), None).await
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    async fn call<P, R>(
        &self,
        method: &str,
        params: &P,
        timeout: Option<Duration>,
    ) -> Result<R, InfrastructureError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut request = self.http.post(self.method_url(method)).json(params);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(without_url)?;
        let status = response.status();
        let body: ApiResponse<R> = response.json().await.map_err(without_url)?;

        debug!(method = method, status = status.as_u16(), ok = body.ok, "Bot API call completed");

        match body.result {
            Some(result) if body.ok => Ok(result),
            _ => Err(InfrastructureError::Telegram {
                description: body
                    .description
                    .unwrap_or_else(|| format!("{} returned HTTP {}", method, status)),
            }),
        }
    }
}

fn without_url(error: reqwest::Error) -> InfrastructureError {
    InfrastructureError::Http(error.without_url())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token: &str) -> TelegramConfig {
        TelegramConfig {
            bot_token: token.to_string(),
            api_base_url: "http://127.0.0.1:9/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_requires_token() {
        match TelegramClient::new(&config("  ")) {
            Err(InfrastructureError::Config(message)) => assert!(message.contains("token")),
            _ => panic!("expected configuration error"),
        }
    }

    #[test]
    fn test_method_url() {
        let client = TelegramClient::new(&config("123:ABC")).unwrap();
        assert_eq!(
            client.method_url("sendMessage"),
            "http://127.0.0.1:9/bot123:ABC/sendMessage"
        );
    }

    #[tokio::test]
    async fn test_transport_error_hides_token() {
        let client = TelegramClient::new(&config("123:SECRET")).unwrap();
        let error = client
            .send_message(&ChatId::Id(1), "hello")
            .await
            .unwrap_err();

        assert!(matches!(error, InfrastructureError::Http(_)));
        assert!(!error.to_string().contains("SECRET"));
    }
}
