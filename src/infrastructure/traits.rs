//! Infrastructure traits, used for DI on higher levels

use crate::infrastructure::StoreError;
use crate::infrastructure::entities::{
    Content, ContentStats, ContentStatus, PortfolioItem, Setting, User,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Lists content newest-first, optionally restricted to one status.
    async fn list(&self, status: Option<ContentStatus>) -> Result<Vec<Content>, StoreError>;

    /// Published content that is meant for the website, newest-first.
    async fn list_public(&self) -> Result<Vec<Content>, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<Content>, StoreError>;

    async fn insert(&self, content: Content) -> Result<Content, StoreError>;

    /// Replaces the stored row with the same id. Returns `None` if there is no such row.
    async fn update(&self, content: Content) -> Result<Option<Content>, StoreError>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Marks the item as published at `at`, whatever its previous status.
    async fn publish(&self, id: Uuid, at: DateTime<Utc>) -> Result<Option<Content>, StoreError>;

    /// Scheduled items whose `scheduled_for` is at or before `now`.
    async fn due_scheduled(&self, now: DateTime<Utc>) -> Result<Vec<Content>, StoreError>;

    async fn set_telegram_message_id(
        &self,
        id: Uuid,
        message_id: &str,
    ) -> Result<bool, StoreError>;

    async fn stats(&self) -> Result<ContentStats, StoreError>;
}

#[async_trait]
pub trait PortfolioRepository: Send + Sync {
    /// All items by `sort_order`, newest first within the same order.
    async fn list(&self) -> Result<Vec<PortfolioItem>, StoreError>;

    async fn list_published(&self) -> Result<Vec<PortfolioItem>, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<PortfolioItem>, StoreError>;

    async fn insert(&self, item: PortfolioItem) -> Result<PortfolioItem, StoreError>;

    async fn update(&self, item: PortfolioItem) -> Result<Option<PortfolioItem>, StoreError>;

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Setting>, StoreError>;

    async fn get(&self, key: &str) -> Result<Option<Setting>, StoreError>;

    /// Inserts the key or replaces its value.
    async fn upsert(&self, key: &str, value: &str) -> Result<Setting, StoreError>;

    async fn delete(&self, key: &str) -> Result<bool, StoreError>;

    /// The value for `key`, with a missing key treated as an empty string.
    async fn value_of(&self, key: &str) -> Result<String, StoreError> {
        Ok(self
            .get(key)
            .await?
            .map(|setting| setting.value)
            .unwrap_or_default())
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Fails with [`StoreError::Conflict`] when the username is taken.
    async fn insert(&self, user: User) -> Result<User, StoreError>;
}

/// Bot credentials for the outbound channel, as stored in settings.
#[derive(Debug, Clone, Default)]
pub struct ChannelCredentials {
    pub bot_token: String,
    pub channel_id: String,
}

impl ChannelCredentials {
    pub fn is_complete(&self) -> bool {
        !self.bot_token.trim().is_empty() && !self.channel_id.trim().is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Telegram settings not configured")]
    NotConfigured,

    #[error("invalid channel id `{0}`")]
    InvalidChannel(String),

    #[error("Telegram API error: {0}")]
    Request(#[from] teloxide::RequestError),
}

/// Relays published content to an external messaging channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends the content and returns the external message id.
    async fn notify(
        &self,
        credentials: &ChannelCredentials,
        content: &Content,
    ) -> Result<String, NotifyError>;
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("AI generation is not available. Please configure OPENAI_API_KEY.")]
    NotConfigured,

    #[error("AI request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("AI provider returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
}

/// A chat-completion style text generation backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Whether credentials are present. Checked before any request is built.
    fn is_configured(&self) -> bool;

    async fn complete(&self, request: CompletionRequest) -> Result<String, GenerationError>;
}
