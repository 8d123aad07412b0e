pub mod health;
pub mod tags;

use crate::error::TagError;
use axum::http::StatusCode;

pub fn status_for(error: &TagError) -> StatusCode {
    match error {
        TagError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TagError::Conflict(_) => StatusCode::CONFLICT,
        TagError::Infrastructure(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

pub fn error_response(error: TagError) -> (StatusCode, String) {
    (status_for(&error), error.to_string())
}
