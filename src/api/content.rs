//! Content endpoints

use crate::api::{JsonBody, PathParam, QueryParams};
use crate::api::error::{AppError, AppResult};
use crate::core::error::CoreError;
use crate::core::models::{ContentChanges, NewContent};
use crate::core::traits::{ContentService, PublishingService};
use crate::infrastructure::entities::ContentStatus;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use di_axum::Inject;
use serde::Deserialize;
use uuid::Uuid;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_content).post(create_content))
        .route("/published", get(list_public_content))
        .route(
            "/:id",
            get(get_content).patch(update_content).delete(delete_content),
        )
        .route("/:id/publish", post(publish_content))
}

#[derive(Deserialize, Debug)]
struct ListQuery {
    status: Option<ContentStatus>,
}

async fn list_content(
    Inject(content_service): Inject<dyn ContentService>,
    QueryParams(query): QueryParams<ListQuery>,
) -> AppResult<Json<Vec<schemas::Content>>> {
    let content = content_service.list(query.status).await?;
    Ok(Json(content.into_iter().map(schemas::Content::from).collect()))
}

async fn list_public_content(
    Inject(content_service): Inject<dyn ContentService>,
) -> AppResult<Json<Vec<schemas::Content>>> {
    let content = content_service.list_public().await?;
    Ok(Json(content.into_iter().map(schemas::Content::from).collect()))
}

async fn get_content(
    Inject(content_service): Inject<dyn ContentService>,
    PathParam(id): PathParam<Uuid>,
) -> AppResult<Json<schemas::Content>> {
    Ok(Json(content_service.get(id).await?.into()))
}

async fn create_content(
    Inject(content_service): Inject<dyn ContentService>,
    JsonBody(new_content): JsonBody<NewContent>,
) -> AppResult<(StatusCode, Json<schemas::Content>)> {
    let content = content_service.create(new_content).await?;
    Ok((StatusCode::CREATED, Json(content.into())))
}

async fn update_content(
    Inject(content_service): Inject<dyn ContentService>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(changes): JsonBody<ContentChanges>,
) -> AppResult<Json<schemas::Content>> {
    Ok(Json(content_service.update(id, changes).await?.into()))
}

async fn delete_content(
    Inject(content_service): Inject<dyn ContentService>,
    PathParam(id): PathParam<Uuid>,
) -> AppResult<Json<schemas::Success>> {
    if content_service.delete(id).await? {
        Ok(Json(schemas::Success { success: true }))
    } else {
        Err(AppError::from(CoreError::not_found("content", id)))
    }
}

async fn publish_content(
    Inject(publisher): Inject<dyn PublishingService>,
    PathParam(id): PathParam<Uuid>,
) -> AppResult<Json<schemas::PublishedContent>> {
    Ok(Json(publisher.publish(id).await?.into()))
}

pub mod schemas {
    use crate::core::publishing::{PublishOutcome, PublishReport};
    use crate::infrastructure::entities;
    use crate::infrastructure::entities::ContentStatus;
    use chrono::{DateTime, Utc};
    use serde::Serialize;
    use uuid::Uuid;

    #[derive(Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
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

    impl From<entities::Content> for Content {
        fn from(content: entities::Content) -> Self {
            Content {
                id: content.id,
                title: content.title,
                body: content.body,
                category: content.category,
                status: content.status,
                published_at: content.published_at,
                scheduled_for: content.scheduled_for,
                publish_to_website: content.publish_to_website,
                publish_to_telegram: content.publish_to_telegram,
                telegram_message_id: content.telegram_message_id,
                created_at: content.created_at,
                updated_at: content.updated_at,
            }
        }
    }

    #[derive(Serialize, Debug)]
    pub struct Success {
        pub success: bool,
    }

    #[derive(Serialize, Debug, PartialEq, Eq)]
    #[serde(tag = "status", rename_all = "snake_case")]
    pub enum Notification {
        NotRequested,
        Notified {
            #[serde(rename = "messageId")]
            message_id: String,
        },
        Failed {
            reason: String,
        },
    }

    impl From<PublishOutcome> for Notification {
        fn from(outcome: PublishOutcome) -> Self {
            match outcome {
                PublishOutcome::NotRequested => Notification::NotRequested,
                PublishOutcome::Notified { message_id } => Notification::Notified { message_id },
                PublishOutcome::NotificationFailed { reason } => Notification::Failed { reason },
            }
        }
    }

    /// The published item plus what happened to its channel relay.
    #[derive(Serialize, Debug)]
    pub struct PublishedContent {
        #[serde(flatten)]
        pub content: Content,
        pub notification: Notification,
    }

    impl From<PublishReport> for PublishedContent {
        fn from(report: PublishReport) -> Self {
            PublishedContent {
                content: report.content.into(),
                notification: report.outcome.into(),
            }
        }
    }
}
