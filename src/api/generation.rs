use crate::api::JsonBody;
use crate::api::error::AppResult;
use crate::core::models::GenerateRequest;
use crate::core::traits::GenerationService;
use axum::routing::post;
use axum::{Json, Router};
use di_axum::Inject;

pub fn router() -> Router {
    Router::new().route("/generate", post(generate))
}

async fn generate(
    Inject(generation): Inject<dyn GenerationService>,
    JsonBody(request): JsonBody<GenerateRequest>,
) -> AppResult<Json<schemas::GeneratedContent>> {
    Ok(Json(generation.generate(request).await?.into()))
}

pub mod schemas {
    use crate::core::models;
    use serde::Serialize;

    /// A draft returned to the editor. It is not saved.
    #[derive(Serialize, Debug)]
    pub struct GeneratedContent {
        pub title: String,
        pub body: String,
        pub category: Option<String>,
    }

    impl From<models::GeneratedContent> for GeneratedContent {
        fn from(generated: models::GeneratedContent) -> Self {
            GeneratedContent {
                title: generated.title,
                body: generated.body,
                category: generated.category,
            }
        }
    }
}
