//! DI "Interfaces"

use crate::core::error::CoreError;
use crate::core::models::{
    ContentChanges, Credentials, GenerateRequest, GeneratedContent, NewContent,
    NewPortfolioItem, PortfolioChanges,
};
use crate::core::publishing::{PublishReport, SchedulerReport};
use crate::infrastructure::entities;
use crate::infrastructure::entities::ContentStatus;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait ContentService: Send + Sync {
    /// Lists content newest-first, optionally only the given status.
    async fn list(&self, status: Option<ContentStatus>)
    -> Result<Vec<entities::Content>, CoreError>;

    /// Published content meant for the website.
    async fn list_public(&self) -> Result<Vec<entities::Content>, CoreError>;

    /// Returns `NotFound` if there is no such item.
    async fn get(&self, id: Uuid) -> Result<entities::Content, CoreError>;

    /// Creates a new item.
    ///
    /// Unset fields default to draft status, website publishing on, Telegram relay off.
    async fn create(&self, content: NewContent) -> Result<entities::Content, CoreError>;

    /// Merges the given fields into an existing item.
    async fn update(
        &self,
        id: Uuid,
        changes: ContentChanges,
    ) -> Result<entities::Content, CoreError>;

    /// Returns `false` if the item did not exist.
    async fn delete(&self, id: Uuid) -> Result<bool, CoreError>;

    /// Scheduled items that are due now.
    async fn scheduled(&self) -> Result<Vec<entities::Content>, CoreError>;

    async fn stats(&self) -> Result<entities::ContentStats, CoreError>;
}

#[async_trait]
pub trait PublishingService: Send + Sync {
    /// Publishes an item regardless of its current status, then relays it if requested.
    ///
    /// A failing relay never fails the publish. It is reported in the returned outcome.
    async fn publish(&self, id: Uuid) -> Result<PublishReport, CoreError>;

    /// Publishes every scheduled item whose time has come. One scheduler tick.
    async fn run_due(&self) -> Result<SchedulerReport, CoreError>;
}

#[async_trait]
pub trait PortfolioService: Send + Sync {
    async fn list(&self) -> Result<Vec<entities::PortfolioItem>, CoreError>;

    async fn list_published(&self) -> Result<Vec<entities::PortfolioItem>, CoreError>;

    async fn get(&self, id: Uuid) -> Result<entities::PortfolioItem, CoreError>;

    async fn create(&self, item: NewPortfolioItem)
    -> Result<entities::PortfolioItem, CoreError>;

    async fn update(
        &self,
        id: Uuid,
        changes: PortfolioChanges,
    ) -> Result<entities::PortfolioItem, CoreError>;

    async fn delete(&self, id: Uuid) -> Result<bool, CoreError>;
}

#[async_trait]
pub trait SettingsService: Send + Sync {
    async fn list(&self) -> Result<Vec<entities::Setting>, CoreError>;

    async fn get(&self, key: &str) -> Result<entities::Setting, CoreError>;

    async fn upsert(&self, key: &str, value: &str) -> Result<entities::Setting, CoreError>;

    async fn delete(&self, key: &str) -> Result<bool, CoreError>;
}

#[async_trait]
pub trait UserService: Send + Sync {
    /// Creates an operator account. Fails with `Conflict` when the username is taken.
    async fn register(&self, credentials: Credentials) -> Result<entities::User, CoreError>;

    /// Checks a username/password pair.
    ///
    /// Unknown usernames and wrong passwords are both reported as `Unauthorized`.
    async fn authenticate(&self, credentials: Credentials)
    -> Result<entities::User, CoreError>;

    async fn get(&self, id: Uuid) -> Result<entities::User, CoreError>;
}

#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Drafts content with the text generation API. Nothing is persisted.
    async fn generate(&self, request: GenerateRequest) -> Result<GeneratedContent, CoreError>;
}
