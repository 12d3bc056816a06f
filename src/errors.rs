use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

use crate::services::completion::GenerationError;
use crate::services::trip_store::PersistenceError;

pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate itinerary. Check backend logs.";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save trip";

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Errors surfaced by the HTTP handlers. The message is what the caller sees.
#[derive(Debug)]
pub enum ApiError {
    InvalidRequest(String),
    GenerationFailure(String),
    PersistenceFailure(String),
    NotFound(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidRequest(msg)
            | ApiError::GenerationFailure(msg)
            | ApiError::PersistenceFailure(msg)
            | ApiError::NotFound(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::GenerationFailure(_) | ApiError::PersistenceFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        log::error!("AI error: {}", err);
        ApiError::GenerationFailure(GENERATION_FAILED_MESSAGE.to_string())
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::InvalidId(id) => {
                ApiError::InvalidRequest(format!("Invalid trip id: {}", id))
            }
            other => {
                log::error!("Save error: {}", other);
                ApiError::PersistenceFailure(SAVE_FAILED_MESSAGE.to_string())
            }
        }
    }
}
