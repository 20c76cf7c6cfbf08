//! Telegram channel relay

use crate::infrastructure::entities::Content;
use crate::infrastructure::traits::{ChannelCredentials, NotifyError, Notifier};
use async_trait::async_trait;
use di::{inject, injectable};
use log::{info, warn};
use teloxide::prelude::*;
use teloxide::types::{ChatId, Recipient};

/// Sends through one pooled HTTP client. Tokens come per call, from settings.
pub struct TelegramNotifier {
    client: reqwest::Client,
}

#[injectable(Notifier)]
impl TelegramNotifier {
    #[inject]
    pub fn create() -> TelegramNotifier {
        let client = teloxide::net::default_reqwest_settings()
            .build()
            .unwrap_or_else(|e| {
                warn!("failed to build Telegram HTTP client with defaults: {e}");
                reqwest::Client::new()
            });

        TelegramNotifier { client }
    }
}

impl TelegramNotifier {
    /// A bot for `token` that shares this notifier's connection pool.
    pub fn bot(&self, token: &str) -> Bot {
        Bot::with_client(token.trim(), self.client.clone())
    }
}

/// The text posted to the channel: title, blank line, body.
pub fn format_message(content: &Content) -> String {
    format!("{}\n\n{}", content.title, content.body)
}

/// Numeric ids address a chat directly, anything else is a public channel username.
pub fn parse_recipient(channel_id: &str) -> Result<Recipient, NotifyError> {
    let channel_id = channel_id.trim();

    if let Ok(id) = channel_id.parse::<i64>() {
        return Ok(Recipient::Id(ChatId(id)));
    }

    let username = channel_id.trim_start_matches('@');
    if username.is_empty() || username.chars().any(char::is_whitespace) {
        return Err(NotifyError::InvalidChannel(channel_id.to_owned()));
    }

    Ok(Recipient::ChannelUsername(format!("@{username}")))
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(
        &self,
        credentials: &ChannelCredentials,
        content: &Content,
    ) -> Result<String, NotifyError> {
        if !credentials.is_complete() {
            return Err(NotifyError::NotConfigured);
        }

        let recipient = parse_recipient(&credentials.channel_id)?;
        let message = self
            .bot(&credentials.bot_token)
            .send_message(recipient, format_message(content)).await?;

        info!(
            "sent content {} to Telegram as message {}",
            content.id, message.id.0
        );
        Ok(message.id.0.to_string())
    }
}
