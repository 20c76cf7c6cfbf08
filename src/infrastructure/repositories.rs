//! SQLite-backed repositories

use crate::infrastructure::StoreError;
use crate::infrastructure::database::DatabaseConnection;
use crate::infrastructure::entities::{
    Content, ContentStats, ContentStatus, PortfolioItem, PortfolioStatus, Setting, User,
};
use crate::infrastructure::traits::{
    ContentRepository, PortfolioRepository, SettingsRepository, UserRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use di::{Ref, injectable};
use log::debug;
use sqlx::types::Json;
use uuid::Uuid;

#[injectable(ContentRepository)]
pub struct DbContentRepository {
    connection: Ref<DatabaseConnection>,
}

#[async_trait]
impl ContentRepository for DbContentRepository {
    async fn list(&self, status: Option<ContentStatus>) -> Result<Vec<Content>, StoreError> {
        let rows = match status {
            Some(status) => {
                sqlx::query_as(
                    "SELECT * FROM content WHERE status = ? ORDER BY julianday(created_at) DESC",
                )
                .bind(status)
                .fetch_all(&**self.connection)
                .await?
            }
            None => {
                sqlx::query_as("SELECT * FROM content ORDER BY julianday(created_at) DESC")
                    .fetch_all(&**self.connection)
                    .await?
            }
        };

        Ok(rows)
    }

    async fn list_public(&self) -> Result<Vec<Content>, StoreError> {
        Ok(sqlx::query_as(
            "SELECT * FROM content WHERE status = 'published' AND publish_to_website = 1 ORDER BY julianday(created_at) DESC",
        )
        .fetch_all(&**self.connection)
        .await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Content>, StoreError> {
        Ok(sqlx::query_as("SELECT * FROM content WHERE id = ?")
            .bind(id)
            .fetch_optional(&**self.connection)
            .await?)
    }

    async fn insert(&self, content: Content) -> Result<Content, StoreError> {
        Ok(sqlx::query_as(
            "INSERT INTO content (id, title, body, category, status, published_at, scheduled_for, publish_to_website, publish_to_telegram, telegram_message_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
            .bind(content.id)
            .bind(content.title)
            .bind(content.body)
            .bind(content.category)
            .bind(content.status)
            .bind(content.published_at)
            .bind(content.scheduled_for)
            .bind(content.publish_to_website)
            .bind(content.publish_to_telegram)
            .bind(content.telegram_message_id)
            .bind(content.created_at)
            .bind(content.updated_at)
            .fetch_one(&**self.connection)
            .await?)
    }

    async fn update(&self, content: Content) -> Result<Option<Content>, StoreError> {
        Ok(sqlx::query_as(
            "UPDATE content SET title = ?, body = ?, category = ?, status = ?, published_at = ?, scheduled_for = ?, publish_to_website = ?, publish_to_telegram = ?, telegram_message_id = ?, updated_at = ? WHERE id = ? RETURNING *",
        )
            .bind(content.title)
            .bind(content.body)
            .bind(content.category)
            .bind(content.status)
            .bind(content.published_at)
            .bind(content.scheduled_for)
            .bind(content.publish_to_website)
            .bind(content.publish_to_telegram)
            .bind(content.telegram_message_id)
            .bind(content.updated_at)
            .bind(content.id)
            .fetch_optional(&**self.connection)
            .await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM content WHERE id = ?")
            .bind(id)
            .execute(&**self.connection)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn publish(&self, id: Uuid, at: DateTime<Utc>) -> Result<Option<Content>, StoreError> {
        Ok(sqlx::query_as(
            "UPDATE content SET status = ?, published_at = ?, updated_at = ? WHERE id = ? RETURNING *",
        )
        .bind(ContentStatus::Published)
        .bind(at)
        .bind(at)
        .bind(id)
        .fetch_optional(&**self.connection)
        .await?)
    }

    async fn due_scheduled(&self, now: DateTime<Utc>) -> Result<Vec<Content>, StoreError> {
        let rows: Vec<Content> = sqlx::query_as(
            "SELECT * FROM content WHERE status = 'scheduled' AND scheduled_for IS NOT NULL AND julianday(scheduled_for) <= julianday(?) ORDER BY julianday(scheduled_for) ASC",
        )
        .bind(now)
        .fetch_all(&**self.connection)
        .await?;

        debug!("{} scheduled item(s) due at {now}", rows.len());
        Ok(rows)
    }

    async fn set_telegram_message_id(
        &self,
        id: Uuid,
        message_id: &str,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE content SET telegram_message_id = ? WHERE id = ?")
            .bind(message_id)
            .bind(id)
            .execute(&**self.connection)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn stats(&self) -> Result<ContentStats, StoreError> {
        Ok(sqlx::query_as(
            "SELECT COUNT(*) AS total, COUNT(CASE WHEN status = 'published' THEN 1 END) AS published, COUNT(CASE WHEN status = 'scheduled' THEN 1 END) AS scheduled, COUNT(CASE WHEN status = 'draft' THEN 1 END) AS draft FROM content",
        )
        .fetch_one(&**self.connection)
        .await?)
    }
}

#[injectable(PortfolioRepository)]
pub struct DbPortfolioRepository {
    connection: Ref<DatabaseConnection>,
}

#[async_trait]
impl PortfolioRepository for DbPortfolioRepository {
    async fn list(&self) -> Result<Vec<PortfolioItem>, StoreError> {
        Ok(sqlx::query_as(
            "SELECT * FROM portfolio ORDER BY sort_order ASC, julianday(created_at) DESC",
        )
        .fetch_all(&**self.connection)
        .await?)
    }

    async fn list_published(&self) -> Result<Vec<PortfolioItem>, StoreError> {
        Ok(sqlx::query_as(
            "SELECT * FROM portfolio WHERE status = ? ORDER BY sort_order ASC, julianday(created_at) DESC",
        )
        .bind(PortfolioStatus::Published)
        .fetch_all(&**self.connection)
        .await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<PortfolioItem>, StoreError> {
        Ok(sqlx::query_as("SELECT * FROM portfolio WHERE id = ?")
            .bind(id)
            .fetch_optional(&**self.connection)
            .await?)
    }

    async fn insert(&self, item: PortfolioItem) -> Result<PortfolioItem, StoreError> {
        Ok(sqlx::query_as(
            "INSERT INTO portfolio (id, title, description, image_url, project_url, github_url, technologies, category, featured, status, sort_order, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
            .bind(item.id)
            .bind(item.title)
            .bind(item.description)
            .bind(item.image_url)
            .bind(item.project_url)
            .bind(item.github_url)
            .bind(Json(item.technologies))
            .bind(item.category)
            .bind(item.featured)
            .bind(item.status)
            .bind(item.sort_order)
            .bind(item.created_at)
            .bind(item.updated_at)
            .fetch_one(&**self.connection)
            .await?)
    }

    async fn update(&self, item: PortfolioItem) -> Result<Option<PortfolioItem>, StoreError> {
        Ok(sqlx::query_as(
            "UPDATE portfolio SET title = ?, description = ?, image_url = ?, project_url = ?, github_url = ?, technologies = ?, category = ?, featured = ?, status = ?, sort_order = ?, updated_at = ? WHERE id = ? RETURNING *",
        )
            .bind(item.title)
            .bind(item.description)
            .bind(item.image_url)
            .bind(item.project_url)
            .bind(item.github_url)
            .bind(Json(item.technologies))
            .bind(item.category)
            .bind(item.featured)
            .bind(item.status)
            .bind(item.sort_order)
            .bind(item.updated_at)
            .bind(item.id)
            .fetch_optional(&**self.connection)
            .await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM portfolio WHERE id = ?")
            .bind(id)
            .execute(&**self.connection)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[injectable(SettingsRepository)]
pub struct DbSettingsRepository {
    connection: Ref<DatabaseConnection>,
}

#[async_trait]
impl SettingsRepository for DbSettingsRepository {
    async fn list(&self) -> Result<Vec<Setting>, StoreError> {
        Ok(sqlx::query_as("SELECT * FROM settings ORDER BY key ASC")
            .fetch_all(&**self.connection)
            .await?)
    }

    async fn get(&self, key: &str) -> Result<Option<Setting>, StoreError> {
        Ok(sqlx::query_as("SELECT * FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&**self.connection)
            .await?)
    }

    async fn upsert(&self, key: &str, value: &str) -> Result<Setting, StoreError> {
        Ok(sqlx::query_as(
            "INSERT INTO settings (key, value, updated_at) VALUES (?, ?, ?) ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at RETURNING *",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .fetch_one(&**self.connection)
        .await?)
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM settings WHERE key = ?")
            .bind(key)
            .execute(&**self.connection)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[injectable(UserRepository)]
pub struct DbUserRepository {
    connection: Ref<DatabaseConnection>,
}

#[async_trait]
impl UserRepository for DbUserRepository {
    async fn get(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(sqlx::query_as("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&**self.connection)
            .await?)
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(sqlx::query_as("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&**self.connection)
            .await?)
    }

    async fn insert(&self, user: User) -> Result<User, StoreError> {
        let username = user.username.clone();

        sqlx::query_as(
            "INSERT INTO users (id, username, password_hash, created_at) VALUES (?, ?, ?, ?) RETURNING *",
        )
        .bind(user.id)
        .bind(user.username)
        .bind(user.password_hash)
        .bind(user.created_at)
        .fetch_one(&**self.connection)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::Conflict(format!("username `{username}` is already taken"))
            }
            other => StoreError::Database(other),
        })
    }
}
