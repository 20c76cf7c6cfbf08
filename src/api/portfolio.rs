use crate::api::{JsonBody, PathParam};
use crate::api::content::schemas::Success;
use crate::api::error::{AppError, AppResult};
use crate::core::error::CoreError;
use crate::core::models::{NewPortfolioItem, PortfolioChanges};
use crate::core::traits::PortfolioService;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use di_axum::Inject;
use uuid::Uuid;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/published", get(list_published_items))
        .route(
            "/:id",
            get(get_item).patch(update_item).delete(delete_item),
        )
}

async fn list_items(
    Inject(portfolio): Inject<dyn PortfolioService>,
) -> AppResult<Json<Vec<schemas::PortfolioItem>>> {
    let items = portfolio.list().await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

async fn list_published_items(
    Inject(portfolio): Inject<dyn PortfolioService>,
) -> AppResult<Json<Vec<schemas::PortfolioItem>>> {
    let items = portfolio.list_published().await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

async fn get_item(
    Inject(portfolio): Inject<dyn PortfolioService>,
    PathParam(id): PathParam<Uuid>,
) -> AppResult<Json<schemas::PortfolioItem>> {
    Ok(Json(portfolio.get(id).await?.into()))
}

async fn create_item(
    Inject(portfolio): Inject<dyn PortfolioService>,
    JsonBody(item): JsonBody<NewPortfolioItem>,
) -> AppResult<(StatusCode, Json<schemas::PortfolioItem>)> {
    let item = portfolio.create(item).await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

async fn update_item(
    Inject(portfolio): Inject<dyn PortfolioService>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(changes): JsonBody<PortfolioChanges>,
) -> AppResult<Json<schemas::PortfolioItem>> {
    Ok(Json(portfolio.update(id, changes).await?.into()))
}

async fn delete_item(
    Inject(portfolio): Inject<dyn PortfolioService>,
    PathParam(id): PathParam<Uuid>,
) -> AppResult<Json<Success>> {
    if portfolio.delete(id).await? {
        Ok(Json(Success { success: true }))
    } else {
        Err(AppError::from(CoreError::not_found("portfolio item", id)))
    }
}

pub mod schemas {
    use crate::infrastructure::entities;
    use crate::infrastructure::entities::PortfolioStatus;
    use chrono::{DateTime, Utc};
    use serde::Serialize;
    use uuid::Uuid;

    #[derive(Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct PortfolioItem {
        pub id: Uuid,
        pub title: String,
        pub description: String,
        pub image_url: Option<String>,
        pub project_url: Option<String>,
        pub github_url: Option<String>,
        pub technologies: Vec<String>,
        pub category: Option<String>,
        pub featured: bool,
        pub status: PortfolioStatus,
        pub order: i64,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    impl From<entities::PortfolioItem> for PortfolioItem {
        fn from(item: entities::PortfolioItem) -> Self {
            PortfolioItem {
                id: item.id,
                title: item.title,
                description: item.description,
                image_url: item.image_url,
                project_url: item.project_url,
                github_url: item.github_url,
                technologies: item.technologies,
                category: item.category,
                featured: item.featured,
                status: item.status,
                order: item.sort_order,
                created_at: item.created_at,
                updated_at: item.updated_at,
            }
        }
    }
}
