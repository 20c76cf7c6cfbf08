use crate::core::error::CoreError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use serde_json::{Map, Value, json};

/// Error type for HTTP handlers, rendered as `{"error": .., "code": .., "fields"?: ..}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request could not be read, e.g. malformed JSON.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut fields = None;

        let (status, code, message) = match self {
            AppError::Core(core) => match core {
                CoreError::Validation(errors) => {
                    let message = errors.to_string();
                    fields = Some(
                        errors
                            .0
                            .into_iter()
                            .map(|(field, message)| (field.to_owned(), Value::String(message)))
                            .collect::<Map<String, Value>>(),
                    );
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
                }
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} `{id}` not found"),
                ),
                CoreError::Conflict(message) => (StatusCode::CONFLICT, "CONFLICT", message),
                CoreError::Unauthorized(message) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
                }
                CoreError::ServiceUnavailable(message) => {
                    (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE", message)
                }
                CoreError::Upstream(message) => {
                    error!("upstream error: {message}");
                    (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR", message)
                }
                CoreError::Store(e) => {
                    error!("store error: {e}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_owned(),
                    )
                }
                CoreError::Internal(message) => {
                    error!("internal error: {message}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_owned(),
                    )
                }
            },
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", message),
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(fields) = fields {
            body["fields"] = Value::Object(fields);
        }

        (status, Json(body)).into_response()
    }
}
