use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use crate::models::ErrorResponse;
use crate::predictor::PredictionError;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Requested resource does not exist
    NotFound(String),
    /// Invalid request data
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<PredictionError> for AppError {
    fn from(err: PredictionError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            AppError::NotFound(msg) => ("not_found", msg.clone()),
            AppError::ValidationError(msg) => ("validation_error", msg.clone()),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: error_code.to_string(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::ValidationError("test error".to_string());
        assert!(err.to_string().contains("Validation error"));

        let err = AppError::NotFound("Race hr9".to_string());
        assert_eq!(err.to_string(), "Not found: Race hr9");
    }

    #[test]
    fn test_prediction_error_is_caller_error() {
        let err: AppError = PredictionError::NoRunners("hr9".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err: AppError = PredictionError::EmptyQuery.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::NotFound("".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::ValidationError("".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
