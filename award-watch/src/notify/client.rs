//! Telegram `sendMessage` client.

use serde::Serialize;
use tracing::info;

use crate::run::Notifier;

use super::error::NotifyError;

/// Default base URL for the Bot API.
const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Configuration for the Telegram client.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot token from BotFather
    pub bot_token: String,
    /// Chat the messages go to
    pub chat_id: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TelegramConfig {
    /// Create a new config for a bot and chat.
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Body of a `sendMessage` request.
#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
    disable_web_page_preview: bool,
}

/// Telegram Bot API client.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    endpoint: String,
    chat_id: String,
}

impl TelegramClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TelegramConfig) -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: send_message_url(&config.base_url, &config.bot_token),
            chat_id: config.chat_id,
        })
    }

    /// Send a Markdown message to the configured chat.
    pub async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        let body = SendMessage {
            chat_id: &self.chat_id,
            text,
            parse_mode: "Markdown",
            disable_web_page_preview: true,
        };

        let response = self.http.post(&self.endpoint).json(&body).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::NOT_FOUND {
            // The Bot API answers 404 for an unknown token.
            return Err(NotifyError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        info!("telegram message sent");
        Ok(())
    }
}

impl Notifier for TelegramClient {
    async fn deliver(&self, text: &str) -> Result<(), NotifyError> {
        self.send_message(text).await
    }
}

fn send_message_url(base_url: &str, bot_token: &str) -> String {
    format!("{}/bot{}/sendMessage", base_url.trim_end_matches('/'), bot_token)
}
