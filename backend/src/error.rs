//! Per-request error type shared by the engine, the stores and the HTTP layer.

use crate::engine::zones::ZoneError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::responses::ErrorResponse;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Required placeholders without a value. Lists every missing label.
    #[error("missing required fields: {}", .missing.join(", "))]
    Validation { missing: Vec<String> },

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("document {document_id} changed concurrently (expected version {expected}, found {found})")]
    Conflict {
        document_id: String,
        expected: i64,
        found: i64,
    },

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("wrong or missing API password")]
    Unauthorized,

    #[error(transparent)]
    Zone(#[from] ZoneError),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("processing failed: {0}")]
    Upstream(String),
}

impl ServiceError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        ServiceError::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Short machine-friendly name used as the `error` field of responses.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Validation { .. } => "ValidationError",
            ServiceError::NotFound { .. } => "NotFoundError",
            ServiceError::Conflict { .. } => "ConflictError",
            ServiceError::BadRequest(_) => "BadRequest",
            ServiceError::Unauthorized => "Unauthorized",
            ServiceError::Zone(_)
            | ServiceError::Storage(_)
            | ServiceError::Serialization(_)
            | ServiceError::Upstream(_) => "UpstreamError",
        }
    }
}

impl From<actix_web::error::BlockingError> for ServiceError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        ServiceError::Upstream(err.to_string())
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation { .. } | ServiceError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::Conflict { .. } => StatusCode::CONFLICT,
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
        })
    }
}
