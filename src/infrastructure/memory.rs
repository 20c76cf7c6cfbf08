//! In-memory repositories
//!
//! Each repository owns its map behind a `RwLock`, so a single call is atomic but a
//! read-then-write sequence across calls is not.

use crate::infrastructure::StoreError;
use crate::infrastructure::entities::{
    Content, ContentStats, ContentStatus, PortfolioItem, PortfolioStatus, Setting, User,
    setting_keys,
};
use crate::infrastructure::traits::{
    ContentRepository, PortfolioRepository, SettingsRepository, UserRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use di::{inject, injectable};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

pub struct InMemoryContentRepository {
    items: RwLock<HashMap<Uuid, Content>>,
}

#[injectable(ContentRepository)]
impl InMemoryContentRepository {
    #[inject]
    pub fn create() -> InMemoryContentRepository {
        InMemoryContentRepository {
            items: RwLock::new(HashMap::new()),
        }
    }
}

fn newest_first(mut items: Vec<Content>) -> Vec<Content> {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn list(&self, status: Option<ContentStatus>) -> Result<Vec<Content>, StoreError> {
        let items = self.items.read().await;
        Ok(newest_first(
            items
                .values()
                .filter(|c| status.is_none_or(|status| c.status == status))
                .cloned()
                .collect(),
        ))
    }

    async fn list_public(&self) -> Result<Vec<Content>, StoreError> {
        let items = self.items.read().await;
        Ok(newest_first(
            items
                .values()
                .filter(|c| c.status == ContentStatus::Published && c.publish_to_website)
                .cloned()
                .collect(),
        ))
    }

    async fn get(&self, id: Uuid) -> Result<Option<Content>, StoreError> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn insert(&self, content: Content) -> Result<Content, StoreError> {
        self.items.write().await.insert(content.id, content.clone());
        Ok(content)
    }

    async fn update(&self, content: Content) -> Result<Option<Content>, StoreError> {
        let mut items = self.items.write().await;
        match items.get_mut(&content.id) {
            Some(stored) => {
                *stored = content.clone();
                Ok(Some(content))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.items.write().await.remove(&id).is_some())
    }

    async fn publish(&self, id: Uuid, at: DateTime<Utc>) -> Result<Option<Content>, StoreError> {
        let mut items = self.items.write().await;
        Ok(items.get_mut(&id).map(|content| {
            content.status = ContentStatus::Published;
            content.published_at = Some(at);
            content.updated_at = at;
            content.clone()
        }))
    }

    async fn due_scheduled(&self, now: DateTime<Utc>) -> Result<Vec<Content>, StoreError> {
        let items = self.items.read().await;
        let mut due: Vec<Content> = items.values().filter(|c| c.is_due(now)).cloned().collect();
        due.sort_by_key(|c| c.scheduled_for);
        Ok(due)
    }

    async fn set_telegram_message_id(
        &self,
        id: Uuid,
        message_id: &str,
    ) -> Result<bool, StoreError> {
        let mut items = self.items.write().await;
        Ok(match items.get_mut(&id) {
            Some(content) => {
                content.telegram_message_id = Some(message_id.to_owned());
                true
            }
            None => false,
        })
    }

    async fn stats(&self) -> Result<ContentStats, StoreError> {
        let items = self.items.read().await;
        let count = |status: ContentStatus| {
            items.values().filter(|c| c.status == status).count() as i64
        };

        Ok(ContentStats {
            total: items.len() as i64,
            published: count(ContentStatus::Published),
            scheduled: count(ContentStatus::Scheduled),
            draft: count(ContentStatus::Draft),
        })
    }
}

pub struct InMemoryPortfolioRepository {
    items: RwLock<HashMap<Uuid, PortfolioItem>>,
}

#[injectable(PortfolioRepository)]
impl InMemoryPortfolioRepository {
    #[inject]
    pub fn create() -> InMemoryPortfolioRepository {
        InMemoryPortfolioRepository {
            items: RwLock::new(HashMap::new()),
        }
    }
}

impl InMemoryPortfolioRepository {
    async fn sorted(&self, only_published: bool) -> Vec<PortfolioItem> {
        let items = self.items.read().await;
        let mut list: Vec<PortfolioItem> = items
            .values()
            .filter(|item| !only_published || item.status == PortfolioStatus::Published)
            .cloned()
            .collect();
        list.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        list
    }
}

#[async_trait]
impl PortfolioRepository for InMemoryPortfolioRepository {
    async fn list(&self) -> Result<Vec<PortfolioItem>, StoreError> {
        Ok(self.sorted(false).await)
    }

    async fn list_published(&self) -> Result<Vec<PortfolioItem>, StoreError> {
        Ok(self.sorted(true).await)
    }

    async fn get(&self, id: Uuid) -> Result<Option<PortfolioItem>, StoreError> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn insert(&self, item: PortfolioItem) -> Result<PortfolioItem, StoreError> {
        self.items.write().await.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update(&self, item: PortfolioItem) -> Result<Option<PortfolioItem>, StoreError> {
        let mut items = self.items.write().await;
        match items.get_mut(&item.id) {
            Some(stored) => {
                *stored = item.clone();
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.items.write().await.remove(&id).is_some())
    }
}

pub struct InMemorySettingsRepository {
    settings: RwLock<HashMap<String, Setting>>,
}

#[injectable(SettingsRepository)]
impl InMemorySettingsRepository {
    #[inject]
    pub fn create() -> InMemorySettingsRepository {
        let now = Utc::now();
        let settings = setting_keys::DEFAULTS
            .iter()
            .map(|(key, value)| {
                (
                    key.to_string(),
                    Setting {
                        key: key.to_string(),
                        value: value.to_string(),
                        updated_at: now,
                    },
                )
            })
            .collect();

        InMemorySettingsRepository {
            settings: RwLock::new(settings),
        }
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn list(&self) -> Result<Vec<Setting>, StoreError> {
        let mut settings: Vec<Setting> = self.settings.read().await.values().cloned().collect();
        settings.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(settings)
    }

    async fn get(&self, key: &str) -> Result<Option<Setting>, StoreError> {
        Ok(self.settings.read().await.get(key).cloned())
    }

    async fn upsert(&self, key: &str, value: &str) -> Result<Setting, StoreError> {
        let setting = Setting {
            key: key.to_owned(),
            value: value.to_owned(),
            updated_at: Utc::now(),
        };
        self.settings
            .write()
            .await
            .insert(key.to_owned(), setting.clone());
        Ok(setting)
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.settings.write().await.remove(key).is_some())
    }
}

pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

#[injectable(UserRepository)]
impl InMemoryUserRepository {
    #[inject]
    pub fn create() -> InMemoryUserRepository {
        InMemoryUserRepository {
            users: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn insert(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|existing| existing.username == user.username) {
            return Err(StoreError::Conflict(format!(
                "username `{}` is already taken",
                user.username
            )));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }
}
