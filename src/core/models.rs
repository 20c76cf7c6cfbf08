//! Inputs accepted by the services.
//!
//! These are deserialized straight from request bodies, so field names follow the JSON API.

use crate::core::error::{CoreError, FieldErrors};
use crate::infrastructure::entities::{Content, ContentStatus, PortfolioItem, PortfolioStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn is_http_url(value: &str) -> bool {
    let value = value.trim();
    value.starts_with("http://") || value.starts_with("https://")
}

fn check_url(errors: &mut FieldErrors, field: &'static str, value: Option<&str>) {
    if let Some(value) = value {
        if !value.trim().is_empty() && !is_http_url(value) {
            errors.add(field, "must be an http(s) URL");
        }
    }
}

/// Empty strings become `None` so that optional text columns stay clean.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn clean_technologies(technologies: Vec<String>) -> Vec<String> {
    technologies
        .into_iter()
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
        .collect()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub category: Option<String>,
    pub status: Option<ContentStatus>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub publish_to_website: Option<bool>,
    pub publish_to_telegram: Option<bool>,
}

impl NewContent {
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::new();
        if self.title.trim().is_empty() {
            errors.add("title", "is required");
        }
        if self.body.trim().is_empty() {
            errors.add("body", "is required");
        }
        if self.status == Some(ContentStatus::Scheduled) && self.scheduled_for.is_none() {
            errors.add("scheduledFor", "is required for scheduled content");
        }
        errors.into_result()
    }

    /// Builds a new record. Unset fields take their defaults: draft, website on, Telegram off.
    pub fn into_content(self, now: DateTime<Utc>) -> Content {
        let status = self.status.unwrap_or(ContentStatus::Draft);

        Content {
            id: uuid::Uuid::new_v4(),
            title: self.title.trim().to_owned(),
            body: self.body,
            category: non_blank(self.category),
            status,
            published_at: (status == ContentStatus::Published).then_some(now),
            scheduled_for: self.scheduled_for,
            publish_to_website: self.publish_to_website.unwrap_or(true),
            publish_to_telegram: self.publish_to_telegram.unwrap_or(false),
            telegram_message_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentChanges {
    pub title: Option<String>,
    pub body: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub category: Option<Option<String>>,
    pub status: Option<ContentStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub scheduled_for: Option<Option<DateTime<Utc>>>,
    pub publish_to_website: Option<bool>,
    pub publish_to_telegram: Option<bool>,
}

impl ContentChanges {
    /// Merges the given fields into `content` and bumps `updated_at`.
    ///
    /// Moving into `published` stamps `published_at` if it is missing. Moving out of it clears it.
    pub fn apply(self, content: &mut Content, now: DateTime<Utc>) -> Result<(), CoreError> {
        let mut errors = FieldErrors::new();
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            errors.add("title", "must not be empty");
        }
        if self.body.as_deref().is_some_and(|b| b.trim().is_empty()) {
            errors.add("body", "must not be empty");
        }
        errors.into_result()?;

        if let Some(title) = self.title {
            content.title = title.trim().to_owned();
        }
        if let Some(body) = self.body {
            content.body = body;
        }
        if let Some(category) = self.category {
            content.category = non_blank(category);
        }
        if let Some(scheduled_for) = self.scheduled_for {
            content.scheduled_for = scheduled_for;
        }
        if let Some(flag) = self.publish_to_website {
            content.publish_to_website = flag;
        }
        if let Some(flag) = self.publish_to_telegram {
            content.publish_to_telegram = flag;
        }
        if let Some(status) = self.status {
            content.status = status;
        }

        match content.status {
            ContentStatus::Published => {
                content.published_at.get_or_insert(now);
            }
            ContentStatus::Scheduled if content.scheduled_for.is_none() => {
                return Err(CoreError::invalid(
                    "scheduledFor",
                    "is required for scheduled content",
                ));
            }
            _ => content.published_at = None,
        }

        content.updated_at = now;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPortfolioItem {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub status: Option<PortfolioStatus>,
    pub order: Option<i64>,
}

impl NewPortfolioItem {
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::new();
        if self.title.trim().is_empty() {
            errors.add("title", "is required");
        }
        check_url(&mut errors, "imageUrl", self.image_url.as_deref());
        check_url(&mut errors, "projectUrl", self.project_url.as_deref());
        check_url(&mut errors, "githubUrl", self.github_url.as_deref());
        errors.into_result()
    }

    pub fn into_item(self, now: DateTime<Utc>) -> PortfolioItem {
        PortfolioItem {
            id: uuid::Uuid::new_v4(),
            title: self.title.trim().to_owned(),
            description: self.description.unwrap_or_default(),
            image_url: non_blank(self.image_url),
            project_url: non_blank(self.project_url),
            github_url: non_blank(self.github_url),
            technologies: clean_technologies(self.technologies.unwrap_or_default()),
            category: non_blank(self.category),
            featured: self.featured.unwrap_or(false),
            status: self.status.unwrap_or(PortfolioStatus::Draft),
            sort_order: self.order.unwrap_or(0),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub project_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub github_url: Option<Option<String>>,
    pub technologies: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub category: Option<Option<String>>,
    pub featured: Option<bool>,
    pub status: Option<PortfolioStatus>,
    pub order: Option<i64>,
}

impl PortfolioChanges {
    pub fn apply(self, item: &mut PortfolioItem, now: DateTime<Utc>) -> Result<(), CoreError> {
        let mut errors = FieldErrors::new();
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            errors.add("title", "must not be empty");
        }
        check_url(&mut errors, "imageUrl", self.image_url.clone().flatten().as_deref());
        check_url(&mut errors, "projectUrl", self.project_url.clone().flatten().as_deref());
        check_url(&mut errors, "githubUrl", self.github_url.clone().flatten().as_deref());
        errors.into_result()?;

        if let Some(title) = self.title {
            item.title = title.trim().to_owned();
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(url) = self.image_url {
            item.image_url = non_blank(url);
        }
        if let Some(url) = self.project_url {
            item.project_url = non_blank(url);
        }
        if let Some(url) = self.github_url {
            item.github_url = non_blank(url);
        }
        if let Some(technologies) = self.technologies {
            item.technologies = clean_technologies(technologies);
        }
        if let Some(category) = self.category {
            item.category = non_blank(category);
        }
        if let Some(featured) = self.featured {
            item.featured = featured;
        }
        if let Some(status) = self.status {
            item.status = status;
        }
        if let Some(order) = self.order {
            item.sort_order = order;
        }

        item.updated_at = now;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequest {
    pub topic: Option<String>,
    pub category: Option<String>,
    pub language: Option<String>,
    pub template: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedContent {
    pub title: String,
    pub body: String,
    pub category: Option<String>,
}
