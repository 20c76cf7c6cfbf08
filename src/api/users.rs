use crate::api::content::schemas::Success;
use crate::api::error::AppResult;
use crate::api::{ExtractOperator, JsonBody};
use crate::core::models::Credentials;
use crate::core::traits::UserService;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use di_axum::Inject;

pub fn router() -> Router {
    Router::new()
        .route("/users", post(create_user))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/user", get(get_user))
}

async fn create_user(
    Inject(users): Inject<dyn UserService>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> AppResult<(StatusCode, Json<schemas::User>)> {
    let user = users.register(credentials).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

async fn login(
    Inject(users): Inject<dyn UserService>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> AppResult<Json<schemas::User>> {
    Ok(Json(users.authenticate(credentials).await?.into()))
}

/// There is no server-side session, so this only acknowledges the client dropping its own.
async fn logout() -> Json<Success> {
    Json(Success { success: true })
}

async fn get_user(
    Inject(users): Inject<dyn UserService>,
    ExtractOperator(operator_id): ExtractOperator,
) -> AppResult<Json<schemas::User>> {
    Ok(Json(users.get(operator_id).await?.into()))
}

pub mod schemas {
    use crate::infrastructure::entities;
    use chrono::{DateTime, Utc};
    use serde::Serialize;
    use uuid::Uuid;

    /// An operator account as shown to clients. The password hash never leaves the server.
    #[derive(Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct User {
        pub id: Uuid,
        pub username: String,
        pub created_at: DateTime<Utc>,
    }

    impl From<entities::User> for User {
        fn from(user: entities::User) -> Self {
            User {
                id: user.id,
                username: user.username,
                created_at: user.created_at,
            }
        }
    }
}
