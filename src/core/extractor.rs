use axum::extract::{rejection::JsonRejection, FromRequest};

use crate::core::error::AppError;

/// `Json` extractor that reports malformed bodies through [`AppError`]
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match rejection {
            JsonRejection::JsonDataError(err) => format!("Invalid location payload: {}", err),
            JsonRejection::JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err),
            JsonRejection::MissingJsonContentType(_) => {
                "Expected a request with `Content-Type: application/json`".to_string()
            }
            other => other.body_text(),
        };

        AppError::BadRequest(message)
    }
}
