use crate::models::ErrorBody;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt;

/// Generic caller-facing messages. Upstream detail never goes past the log.
pub const CREDENTIALS_MISSING: &str = "API credentials missing";
pub const TOKEN_FETCH_FAILED: &str = "Token fetch failed";
pub const NO_ACCESS_TOKEN: &str = "No access token received";
pub const INVALID_TOKEN_RESPONSE: &str = "Invalid token response";
pub const LOOKUP_FAILED: &str = "Sirene lookup failed";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Application-specific error types.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Client id or secret absent from the environment.
    Configuration(String),
    /// The token endpoint refused us or answered something unusable.
    UpstreamAuth {
        /// Status mirrored to the caller.
        status: StatusCode,
        /// Generic message surfaced to the caller.
        message: String,
    },
    /// The establishment endpoint returned a non-success status.
    UpstreamLookup { status: StatusCode },
    /// Transport failure or unexpected payload. Holds the full diagnostic.
    Internal(String),
}

impl AppError {
    pub fn token_rejected(status: StatusCode) -> Self {
        AppError::UpstreamAuth {
            status,
            message: TOKEN_FETCH_FAILED.to_string(),
        }
    }

    pub fn missing_token() -> Self {
        AppError::UpstreamAuth {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: NO_ACCESS_TOKEN.to_string(),
        }
    }

    pub fn invalid_token_response() -> Self {
        AppError::UpstreamAuth {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: INVALID_TOKEN_RESPONSE.to_string(),
        }
    }

    /// Status code the caller sees.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Configuration(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::UpstreamAuth { status, .. } | AppError::UpstreamLookup { status } => *status,
        }
    }

    /// Message the caller sees.
    pub fn detail(&self) -> &str {
        match self {
            AppError::Configuration(_) => CREDENTIALS_MISSING,
            AppError::UpstreamAuth { message, .. } => message.as_str(),
            AppError::UpstreamLookup { .. } => LOOKUP_FAILED,
            AppError::Internal(_) => INTERNAL_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            AppError::UpstreamAuth { status, message } => {
                write!(f, "Upstream auth error ({}): {}", status, message)
            }
            AppError::UpstreamLookup { status } => {
                write!(f, "Upstream lookup error ({})", status)
            }
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Maps the error to its status and a `{"detail": ...}` body.
    fn into_response(self) -> Response {
        match &self {
            AppError::Configuration(msg) => tracing::error!("Configuration error: {}", msg),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            AppError::UpstreamAuth { status, message } => {
                tracing::warn!("Upstream auth failure {}: {}", status, message)
            }
            AppError::UpstreamLookup { status } => {
                tracing::warn!("Upstream lookup failure {}", status)
            }
        }

        let body = Json(ErrorBody {
            detail: self.detail().to_string(),
        });

        (self.status(), body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Internal(format!("{:?}", err))
    }
}
