use async_trait::async_trait;
use axum::Json;
use axum::Router;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use std::str::FromStr;
use uuid::Uuid;

pub mod content;
pub mod dashboard;
pub mod error;
pub mod generation;
pub mod portfolio;
pub mod settings;
pub mod users;

use crate::core::error::CoreError;
use error::AppError;

const X_OPERATOR_ID: &str = "X-Operator-ID";

/// All JSON endpoints, to be nested under `/api`.
pub fn router() -> Router {
    Router::new()
        .nest("/content", content::router())
        .nest("/portfolio", portfolio::router())
        .nest("/settings", settings::router())
        .nest("/ai", generation::router())
        .merge(dashboard::router())
        .merge(users::router())
}

/// The operator making the request, identified by the `X-Operator-ID` header.
#[derive(Debug)]
pub struct ExtractOperator(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for ExtractOperator
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, AppError> {
        if let Some(operator_id) = parts.headers.get(X_OPERATOR_ID) {
            let operator_id = operator_id
                .to_str()
                .map_err(|_| AppError::BadRequest("invalid operator id".to_owned()))?;
            let operator_id = Uuid::from_str(operator_id.trim())
                .map_err(|_| AppError::BadRequest("invalid operator id".to_owned()))?;
            Ok(ExtractOperator(operator_id))
        } else {
            Err(AppError::from(CoreError::Unauthorized(
                "`X-Operator-ID` header is missing".to_owned(),
            )))
        }
    }
}

/// `Json` with its rejections turned into [`AppError::BadRequest`].
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, AppError> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}

/// `Path` with its rejections turned into [`AppError::BadRequest`].
#[derive(Debug)]
pub struct PathParam<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, AppError> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(PathParam(value)),
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}

/// `Query` with its rejections turned into [`AppError::BadRequest`].
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, AppError> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(QueryParams(value)),
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}
