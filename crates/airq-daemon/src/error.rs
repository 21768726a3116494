//! Error types for airq-daemon

use airq_forecast::ForecastError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Daemon-level errors
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server runtime error
    #[error("Server error: {0}")]
    Server(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// API-specific errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body is not a well-formed forecast request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request parsed but readings are outside their domain
    #[error("Validation error: {0}")]
    Validation(String),

    /// No classifier was loaded at startup
    #[error("Model not loaded: {0}")]
    ModelUnavailable(String),

    /// The classifier failed while scoring the series
    #[error("Classification error: {0}")]
    Classification(String),
}

impl From<ForecastError> for ApiError {
    fn from(err: ForecastError) -> Self {
        match err {
            ForecastError::InvalidSnapshot(message) => ApiError::Validation(message),
            err @ ForecastError::Classification { .. } => ApiError::Classification(err.to_string()),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::ModelUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "MODEL_UNAVAILABLE"),
            ApiError::Classification(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CLASSIFICATION_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type alias for daemon operations
pub type DaemonResult<T> = Result<T, DaemonError>;

#[cfg(test)]
mod tests {
    use super::*;
    use airq_forecast::ClassifierError;

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            ApiError::BadRequest("test".to_string())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );

        assert_eq!(
            ApiError::Validation("test".to_string())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );

        assert_eq!(
            ApiError::ModelUnavailable("test".to_string())
                .into_response()
                .status(),
            StatusCode::SERVICE_UNAVAILABLE
        );

        assert_eq!(
            ApiError::Classification("test".to_string())
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_forecast_error_mapping() {
        let err: ApiError = ForecastError::InvalidSnapshot("humidity".to_string()).into();
        assert!(matches!(err, ApiError::Validation(_)));

        let err: ApiError = ForecastError::Classification {
            offset_hours: 3,
            source: ClassifierError::Unavailable("gone".to_string()),
        }
        .into();
        assert!(matches!(err, ApiError::Classification(ref m) if m.contains("gone")));
    }
}
