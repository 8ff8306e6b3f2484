//! # API Errors
//!
//! Maps parse and store failures to HTTP status codes. The response body is
//! actix-web's default: the error's `Display` text as `text/plain`.

use actix_web::http::StatusCode;
use actix_web::ResponseError;

use crate::services::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Path segment is not a 32-bit integer.
    #[error("Invalid scheme id \"{0}\": expected an integer")]
    MalformedId(String),

    /// Path segment is not a `YYYY-MM-DD` calendar date.
    #[error("Invalid launch date \"{0}\": expected YYYY-MM-DD")]
    MalformedDate(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedId(_) | ApiError::MalformedDate(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::MissingId) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::IdsExhausted | StoreError::Database(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
