//! Telegram Bot API client module
//!
//! Issues the three outbound calls the webhooks need as URL-encoded form posts.
//! No retries: a transport failure is returned to the caller as-is.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info};

use crate::core::config::AppConfig;
use crate::core::models::{InlineKeyboard, Location};
use crate::errors::BotError;

/// Accuracy hint, in meters, attached to every location we send.
pub const LOCATION_ACCURACY_M: &str = "2";

/// Outbound side of the bot. Each call returns the raw response body.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<&InlineKeyboard>,
    ) -> Result<String, BotError>;

    async fn edit_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        reply_markup: &InlineKeyboard,
    ) -> Result<String, BotError>;

    async fn send_location(&self, chat_id: i64, location: &Location) -> Result<String, BotError>;
}

/// Form-encoding client for `sendMessage`, `editMessageText` and `sendLocation`.
pub struct TelegramClient {
    http: Client,
    send_message_url: String,
    edit_message_url: String,
    send_location_url: String,
}

impl TelegramClient {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    #[must_use]
    pub fn with_client(config: &AppConfig, http: Client) -> Self {
        Self {
            http,
            send_message_url: config.method_url("sendMessage"),
            edit_message_url: config.method_url("editMessageText"),
            send_location_url: config.method_url("sendLocation"),
        }
    }

    async fn post_form(
        &self,
        url: &str,
        method: &str,
        params: &[(&str, String)],
    ) -> Result<String, BotError> {
        // reqwest errors carry the request URL, which embeds the bot token.
        let resp = self.http.post(url).form(params).send().await.map_err(|e| {
            let e = e.without_url();
            error!(method, "Error when posting to Telegram: {}", e);
            BotError::Transport(format!("{method}: {e}"))
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            let e = e.without_url();
            error!(method, %status, "Error reading Telegram response: {}", e);
            BotError::Transport(format!("{method} response body: {e}"))
        })?;

        info!(method, %status, body = %body, "Telegram responded");
        Ok(body)
    }
}

#[async_trait]
impl MessageSender for TelegramClient {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<&InlineKeyboard>,
    ) -> Result<String, BotError> {
        info!(chat_id, "Sending text message");

        let mut params = vec![("chat_id", chat_id.to_string()), ("text", text.to_string())];
        if let Some(markup) = reply_markup {
            params.push(("reply_markup", markup.to_json()?));
        }

        self.post_form(&self.send_message_url, "sendMessage", &params)
            .await
    }

    async fn edit_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        reply_markup: &InlineKeyboard,
    ) -> Result<String, BotError> {
        info!(chat_id, message_id, "Editing message text");

        let params = [
            ("chat_id", chat_id.to_string()),
            ("message_id", message_id.to_string()),
            ("text", text.to_string()),
            ("reply_markup", reply_markup.to_json()?),
        ];

        self.post_form(&self.edit_message_url, "editMessageText", &params)
            .await
    }

    async fn send_location(&self, chat_id: i64, location: &Location) -> Result<String, BotError> {
        info!(chat_id, "Sending location message");

        let params = [
            ("chat_id", chat_id.to_string()),
            ("longitude", location.longitude.to_string()),
            ("latitude", location.latitude.to_string()),
            ("horizontal_accuracy", LOCATION_ACCURACY_M.to_string()),
        ];

        self.post_form(&self.send_location_url, "sendLocation", &params)
            .await
    }
}
