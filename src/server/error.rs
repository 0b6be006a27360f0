//! Uniform JSON error envelope for the HTTP API.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::conversation::{SummarizationError, ValidationError};
use crate::translation::TranslationError;

/// Error body returned by every failing endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// Status reason phrase.
    pub error: String,
    /// Human-readable detail.
    pub message: String,
    /// HTTP status code.
    pub status_code: u16,
    /// When the error was produced.
    pub timestamp: DateTime<Utc>,
}

/// Failure of an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller sent an invalid request.
    #[error("{0}")]
    BadRequest(String),
    /// No route matched.
    #[error("{0}")]
    NotFound(String),
    /// The operation failed server-side.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the envelope for this error.
    #[must_use]
    pub fn envelope(&self) -> ErrorEnvelope {
        let status = self.status();
        ErrorEnvelope {
            error: status
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
            timestamp: Utc::now(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {self}");
        } else {
            tracing::debug!("Request rejected ({status}): {self}");
        }

        (status, Json(self.envelope())).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        Self::BadRequest(error.to_string())
    }
}

impl From<SummarizationError> for ApiError {
    fn from(error: SummarizationError) -> Self {
        Self::Internal(error.to_string())
    }
}

impl From<TranslationError> for ApiError {
    fn from(error: TranslationError) -> Self {
        Self::Internal(error.to_string())
    }
}
