//! HTTP-facing error type.
//!
//! Service errors are mapped onto client or server errors here; the JSON body
//! shape is `{"error": {"code", "message", "details"}}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::application::services::ServiceError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Error payload returned to API clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let info = self.to_error_info();
        write!(f, "{}: {}", info.code, info.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(reason) => {
                AppError::bad_request("Invalid input", json!({ "reason": reason }))
            }
            ServiceError::NotFound { slug } => {
                AppError::not_found("Slug not found", json!({ "slug": slug }))
            }
            ServiceError::SlugExhausted { attempts } => AppError::internal(
                "Failed to generate unique slug",
                json!({ "attempts": attempts }),
            ),
            // Backend details stay in the logs.
            ServiceError::Generator(_) | ServiceError::Store { .. } => {
                AppError::internal("Internal server error", json!({}))
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request("Validation failed", json!(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::StoreError;

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let err = AppError::from(ServiceError::InvalidInput("empty slug"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_error_info().code, "validation_error");
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = AppError::from(ServiceError::NotFound {
            slug: "missing".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_error_info().details["slug"], "missing");
    }

    #[test]
    fn test_other_errors_map_to_internal() {
        let exhausted = AppError::from(ServiceError::SlugExhausted { attempts: 5 });
        assert_eq!(exhausted.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let store = AppError::from(ServiceError::Store {
            operation: "create",
            source: StoreError::Backend("connection reset".to_string()),
        });
        assert_eq!(store.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(store.to_error_info().details, json!({}));
    }
}
