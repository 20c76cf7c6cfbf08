//! Implementations for the services the app needs.
//!

use crate::core::error::{CoreError, FieldErrors};
use crate::core::models::{
    ContentChanges, Credentials, NewContent, NewPortfolioItem, PortfolioChanges,
};
use crate::core::password::{MIN_PASSWORD_LENGTH, hash_password, verify_password};
use crate::core::traits::{ContentService, PortfolioService, SettingsService, UserService};
use crate::infrastructure::entities::{
    Content, ContentStats, ContentStatus, PortfolioItem, Setting, User,
};
use crate::infrastructure::traits::{
    ContentRepository, PortfolioRepository, SettingsRepository, UserRepository,
};
use async_trait::async_trait;
use chrono::Utc;
use di::{Ref, injectable};
use log::{info, warn};
use uuid::Uuid;

const MAX_USERNAME_LENGTH: usize = 64;
const MAX_SETTING_KEY_LENGTH: usize = 128;

#[injectable(ContentService)]
pub struct AppContentService {
    repo: Ref<dyn ContentRepository>,
}

#[async_trait]
impl ContentService for AppContentService {
    async fn list(&self, status: Option<ContentStatus>) -> Result<Vec<Content>, CoreError> {
        Ok(self.repo.list(status).await?)
    }

    async fn list_public(&self) -> Result<Vec<Content>, CoreError> {
        Ok(self.repo.list_public().await?)
    }

    async fn get(&self, id: Uuid) -> Result<Content, CoreError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| CoreError::not_found("content", id))
    }

    async fn create(&self, content: NewContent) -> Result<Content, CoreError> {
        content.validate()?;
        let created = self.repo.insert(content.into_content(Utc::now())).await?;

        info!("created content {} ({})", created.id, created.status);
        Ok(created)
    }

    async fn update(&self, id: Uuid, changes: ContentChanges) -> Result<Content, CoreError> {
        let mut content = self.get(id).await?;
        changes.apply(&mut content, Utc::now())?;

        // The row may have been deleted between the read and this write.
        self.repo
            .update(content)
            .await?
            .ok_or_else(|| CoreError::not_found("content", id))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CoreError> {
        let deleted = self.repo.delete(id).await?;
        if deleted {
            info!("deleted content {id}");
        }
        Ok(deleted)
    }

    async fn scheduled(&self) -> Result<Vec<Content>, CoreError> {
        Ok(self.repo.due_scheduled(Utc::now()).await?)
    }

    async fn stats(&self) -> Result<ContentStats, CoreError> {
        Ok(self.repo.stats().await?)
    }
}

#[injectable(PortfolioService)]
pub struct AppPortfolioService {
    repo: Ref<dyn PortfolioRepository>,
}

#[async_trait]
impl PortfolioService for AppPortfolioService {
    async fn list(&self) -> Result<Vec<PortfolioItem>, CoreError> {
        Ok(self.repo.list().await?)
    }

    async fn list_published(&self) -> Result<Vec<PortfolioItem>, CoreError> {
        Ok(self.repo.list_published().await?)
    }

    async fn get(&self, id: Uuid) -> Result<PortfolioItem, CoreError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| CoreError::not_found("portfolio item", id))
    }

    async fn create(&self, item: NewPortfolioItem) -> Result<PortfolioItem, CoreError> {
        item.validate()?;
        Ok(self.repo.insert(item.into_item(Utc::now())).await?)
    }

    async fn update(&self, id: Uuid, changes: PortfolioChanges) -> Result<PortfolioItem, CoreError> {
        let mut item = self.get(id).await?;
        changes.apply(&mut item, Utc::now())?;

        self.repo
            .update(item)
            .await?
            .ok_or_else(|| CoreError::not_found("portfolio item", id))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CoreError> {
        Ok(self.repo.delete(id).await?)
    }
}

#[injectable(SettingsService)]
pub struct AppSettingsService {
    repo: Ref<dyn SettingsRepository>,
}

#[async_trait]
impl SettingsService for AppSettingsService {
    async fn list(&self) -> Result<Vec<Setting>, CoreError> {
        Ok(self.repo.list().await?)
    }

    async fn get(&self, key: &str) -> Result<Setting, CoreError> {
        self.repo
            .get(key)
            .await?
            .ok_or_else(|| CoreError::not_found("setting", key))
    }

    async fn upsert(&self, key: &str, value: &str) -> Result<Setting, CoreError> {
        let key = key.trim();
        if key.is_empty() || key.len() > MAX_SETTING_KEY_LENGTH {
            return Err(CoreError::invalid(
                "key",
                format!("must be between 1 and {MAX_SETTING_KEY_LENGTH} characters"),
            ));
        }

        let setting = self.repo.upsert(key, value.trim()).await?;
        info!("setting `{key}` updated");
        Ok(setting)
    }

    async fn delete(&self, key: &str) -> Result<bool, CoreError> {
        Ok(self.repo.delete(key).await?)
    }
}

#[injectable(UserService)]
pub struct AppUserService {
    repo: Ref<dyn UserRepository>,
}

#[async_trait]
impl UserService for AppUserService {
    async fn register(&self, credentials: Credentials) -> Result<User, CoreError> {
        let username = credentials.username.trim().to_owned();

        let mut errors = FieldErrors::new();
        if username.is_empty() || username.len() > MAX_USERNAME_LENGTH {
            errors.add(
                "username",
                format!("must be between 1 and {MAX_USERNAME_LENGTH} characters"),
            );
        }
        if credentials.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.add(
                "password",
                format!("must be at least {MIN_PASSWORD_LENGTH} characters long"),
            );
        }
        errors.into_result()?;

        let password_hash = hash_password(&credentials.password)
            .map_err(|e| CoreError::Internal(format!("password hashing failed: {e}")))?;

        let user = self
            .repo
            .insert(User {
                id: Uuid::new_v4(),
                username,
                password_hash,
                created_at: Utc::now(),
            })
            .await?;

        info!("registered operator `{}`", user.username);
        Ok(user)
    }

    async fn authenticate(&self, credentials: Credentials) -> Result<User, CoreError> {
        let rejected = || CoreError::Unauthorized("invalid username or password".to_owned());

        let Some(user) = self
            .repo
            .get_by_username(credentials.username.trim())
            .await?
        else {
            return Err(rejected());
        };

        match verify_password(&credentials.password, &user.password_hash) {
            Ok(true) => Ok(user),
            Ok(false) => Err(rejected()),
            Err(e) => {
                warn!("stored password hash for `{}` is unreadable: {e}", user.username);
                Err(rejected())
            }
        }
    }

    async fn get(&self, id: Uuid) -> Result<User, CoreError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| CoreError::not_found("user", id))
    }
}
