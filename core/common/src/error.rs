// core/common/src/error.rs
// Standardized error responses and handling

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            reason: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    /// No upstream API key; raised before any outbound call.
    #[error("YouTube API key not configured")]
    MissingApiKey,

    /// The upstream could not be reached or its body could not be decoded.
    #[error("{error}: {details}")]
    Upstream { error: String, details: String },

    /// The upstream answered with a structured `error` object.
    #[error("{error}: {message}")]
    UpstreamApi {
        error: String,
        message: String,
        reason: Option<String>,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ServiceError {
    pub fn upstream(error: impl Into<String>, details: impl ToString) -> Self {
        ServiceError::Upstream {
            error: error.into(),
            details: details.to_string(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::MissingApiKey => "missing_api_key",
            ServiceError::Upstream { .. } => "upstream_unreachable",
            ServiceError::UpstreamApi { .. } => "upstream_api_error",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::InternalError(_) => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::MissingApiKey
            | ServiceError::Upstream { .. }
            | ServiceError::UpstreamApi { .. }
            | ServiceError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            ServiceError::MissingApiKey => ErrorResponse::new(self.to_string()),
            ServiceError::Upstream { error, details } => {
                ErrorResponse::new(error.as_str()).with_details(details.as_str())
            }
            ServiceError::UpstreamApi {
                error,
                message,
                reason,
            } => {
                let mut response = ErrorResponse::new(error.as_str()).with_details(message.as_str());
                if let Some(reason) = reason.as_deref().filter(|r| !r.is_empty()) {
                    response = response.with_reason(reason);
                }
                response
            }
            ServiceError::NotFound(msg) => ErrorResponse::new(msg.as_str()),
            ServiceError::InternalError(msg) => {
                ErrorResponse::new("Internal server error").with_details(msg.as_str())
            }
        }
    }
}

impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_error_response())
    }

    fn status_code(&self) -> StatusCode {
        self.status_code()
    }
}
