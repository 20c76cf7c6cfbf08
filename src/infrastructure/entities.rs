//! Database entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ContentStatus {
    Draft,
    Scheduled,
    Published,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Scheduled => "scheduled",
            ContentStatus::Published => "published",
        }
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ContentStatus::Draft),
            "scheduled" => Ok(ContentStatus::Scheduled),
            "published" => Ok(ContentStatus::Published),
            other => Err(format!("unknown content status `{other}`")),
        }
    }
}

/// A publishable text item.
///
/// `published_at` is kept in step with `status`: it is set exactly when the item is published.
#[derive(Debug, Clone, FromRow)]
pub struct Content {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub category: Option<String>,
    pub status: ContentStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub publish_to_website: bool,
    pub publish_to_telegram: bool,
    pub telegram_message_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Content {
    /// Whether the item is due for a scheduled publish at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.status == ContentStatus::Scheduled
            && self.scheduled_for.is_some_and(|scheduled| scheduled <= now)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow)]
pub struct ContentStats {
    pub total: i64,
    pub published: i64,
    pub scheduled: i64,
    pub draft: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PortfolioStatus {
    Draft,
    Published,
}

#[derive(Debug, Clone, FromRow)]
pub struct PortfolioItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    #[sqlx(json)]
    pub technologies: Vec<String>,
    pub category: Option<String>,
    pub featured: bool,
    pub status: PortfolioStatus,
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Well-known settings keys, seeded into every store with their defaults.
pub mod setting_keys {
    pub const TELEGRAM_BOT_TOKEN: &str = "telegram_bot_token";
    pub const TELEGRAM_CHANNEL_ID: &str = "telegram_channel_id";
    pub const OPENAI_MODEL: &str = "openai_model";
    pub const DEFAULT_CATEGORY: &str = "default_category";

    pub const DEFAULTS: [(&str, &str); 4] = [
        (TELEGRAM_BOT_TOKEN, ""),
        (TELEGRAM_CHANNEL_ID, ""),
        (OPENAI_MODEL, "gpt-4o-mini"),
        (DEFAULT_CATEGORY, "Technology"),
    ];
}
