use crate::api::{JsonBody, PathParam};
use crate::api::content::schemas::Success;
use crate::api::error::{AppError, AppResult};
use crate::core::error::CoreError;
use crate::core::traits::SettingsService;
use axum::routing::get;
use axum::{Json, Router};
use di_axum::Inject;
use serde::Deserialize;

pub fn router() -> Router {
    Router::new().route("/", get(list_settings)).route(
        "/:key",
        get(get_setting)
            .put(upsert_setting)
            .patch(upsert_setting)
            .delete(delete_setting),
    )
}

#[derive(Deserialize, Debug)]
struct SettingValue {
    value: Option<String>,
}

async fn list_settings(
    Inject(settings): Inject<dyn SettingsService>,
) -> AppResult<Json<Vec<schemas::Setting>>> {
    let all = settings.list().await?;
    Ok(Json(all.into_iter().map(Into::into).collect()))
}

async fn get_setting(
    Inject(settings): Inject<dyn SettingsService>,
    PathParam(key): PathParam<String>,
) -> AppResult<Json<schemas::Setting>> {
    Ok(Json(settings.get(&key).await?.into()))
}

async fn upsert_setting(
    Inject(settings): Inject<dyn SettingsService>,
    PathParam(key): PathParam<String>,
    JsonBody(body): JsonBody<SettingValue>,
) -> AppResult<Json<schemas::Setting>> {
    let value = body
        .value
        .ok_or_else(|| CoreError::invalid("value", "is required"))?;
    Ok(Json(settings.upsert(&key, &value).await?.into()))
}

async fn delete_setting(
    Inject(settings): Inject<dyn SettingsService>,
    PathParam(key): PathParam<String>,
) -> AppResult<Json<Success>> {
    if settings.delete(&key).await? {
        Ok(Json(Success { success: true }))
    } else {
        Err(AppError::from(CoreError::not_found("setting", key)))
    }
}

pub mod schemas {
    use crate::infrastructure::entities;
    use chrono::{DateTime, Utc};
    use serde::Serialize;

    #[derive(Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct Setting {
        pub key: String,
        pub value: String,
        pub updated_at: DateTime<Utc>,
    }

    impl From<entities::Setting> for Setting {
        fn from(setting: entities::Setting) -> Self {
            Setting {
                key: setting.key,
                value: setting.value,
                updated_at: setting.updated_at,
            }
        }
    }
}
