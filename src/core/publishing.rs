//! Publishing and channel relay.

use crate::core::error::CoreError;
use crate::core::traits::PublishingService;
use crate::infrastructure::entities::{Content, setting_keys};
use crate::infrastructure::traits::{
    ChannelCredentials, ContentRepository, Notifier, SettingsRepository,
};
use async_trait::async_trait;
use chrono::Utc;
use di::{Ref, injectable};
use log::{error, info, warn};
use uuid::Uuid;

/// What happened to the channel relay of a published item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The item does not ask to be relayed.
    NotRequested,
    /// Published and relayed.
    Notified { message_id: String },
    /// Published, but the relay failed. The publish itself stands.
    NotificationFailed { reason: String },
}

#[derive(Debug, Clone)]
pub struct PublishReport {
    pub content: Content,
    pub outcome: PublishOutcome,
}

/// Result of one scheduler tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerReport {
    pub published: usize,
    pub notified: usize,
    pub notification_failures: usize,
    pub failed: usize,
}

#[injectable(PublishingService)]
pub struct ContentPublisher {
    content: Ref<dyn ContentRepository>,
    settings: Ref<dyn SettingsRepository>,
    notifier: Ref<dyn Notifier>,
}

impl ContentPublisher {
    async fn credentials(&self) -> Result<ChannelCredentials, CoreError> {
        Ok(ChannelCredentials {
            bot_token: self
                .settings
                .value_of(setting_keys::TELEGRAM_BOT_TOKEN)
                .await?,
            channel_id: self
                .settings
                .value_of(setting_keys::TELEGRAM_CHANNEL_ID)
                .await?,
        })
    }

    async fn relay(&self, content: &mut Content) -> PublishOutcome {
        if !content.publish_to_telegram {
            return PublishOutcome::NotRequested;
        }

        let credentials = match self.credentials().await {
            Ok(credentials) => credentials,
            Err(e) => {
                error!("failed to read Telegram settings for content {}: {e}", content.id);
                return PublishOutcome::NotificationFailed {
                    reason: e.to_string(),
                };
            }
        };

        match self.notifier.notify(&credentials, content).await {
            Ok(message_id) => {
                match self
                    .content
                    .set_telegram_message_id(content.id, &message_id)
                    .await
                {
                    Ok(true) => content.telegram_message_id = Some(message_id.clone()),
                    Ok(false) => warn!(
                        "content {} disappeared before its Telegram message id was stored",
                        content.id
                    ),
                    Err(e) => warn!(
                        "failed to store Telegram message id for content {}: {e}",
                        content.id
                    ),
                }
                PublishOutcome::Notified { message_id }
            }
            Err(e) => {
                error!("failed to publish content {} to Telegram: {e}", content.id);
                PublishOutcome::NotificationFailed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[async_trait]
impl PublishingService for ContentPublisher {
    async fn publish(&self, id: Uuid) -> Result<PublishReport, CoreError> {
        let mut content = self
            .content
            .publish(id, Utc::now())
            .await?
            .ok_or_else(|| CoreError::not_found("content", id))?;

        info!("published content {}: {}", content.id, content.title);

        let outcome = self.relay(&mut content).await;
        Ok(PublishReport { content, outcome })
    }

    async fn run_due(&self) -> Result<SchedulerReport, CoreError> {
        let due = self.content.due_scheduled(Utc::now()).await?;
        if !due.is_empty() {
            info!("found {} scheduled content item(s) to publish", due.len());
        }

        let mut report = SchedulerReport::default();
        for item in due {
            match self.publish(item.id).await {
                Ok(published) => {
                    report.published += 1;
                    match published.outcome {
                        PublishOutcome::Notified { .. } => report.notified += 1,
                        PublishOutcome::NotificationFailed { .. } => {
                            report.notification_failures += 1
                        }
                        PublishOutcome::NotRequested => {}
                    }
                }
                Err(e) => {
                    error!("failed to publish scheduled content {}: {e}", item.id);
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }
}
