//! Unified API error handling
//!
//! This module provides a consistent error response format across all API endpoints.

use actix_web::{HttpResponse, ResponseError, error::JsonPayloadError, http::StatusCode, web};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::DbError;
use crate::service::classification::ClassificationError;
use crate::service::supplier::SupplierServiceError;

/// Standard error response format
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
///
/// All API endpoints should return `Result<T, ApiError>` for consistent error handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Supplier assessment not found (404)
    #[error("Supplier assessment not found: {0}")]
    AssessmentNotFound(String),

    /// Categorical answer outside its domain (400)
    #[error("Invalid value '{value}' for field '{field}'")]
    InvalidInput { field: String, value: String },

    /// Malformed request body (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Database error (500)
    #[error("Database error: {0}")]
    Database(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) | ApiError::AssessmentNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidInput { .. } | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::AssessmentNotFound(_) => "assessment_not_found",
            ApiError::InvalidInput { .. } => "invalid_input",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Internal(_) => "internal_error",
            ApiError::Database(_) => "database_error",
        };

        if status.is_server_error() {
            tracing::error!(
                error_type = error_type,
                status = status.as_u16(),
                message = %self,
                "API error"
            );
        } else {
            tracing::warn!(
                error_type = error_type,
                status = status.as_u16(),
                message = %self,
                "API error"
            );
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

/// JSON extractor config reporting malformed bodies in the standard format
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req| {
        ApiError::BadRequest(err.to_string()).into()
    })
}

// ============================================================================
// From conversions for service errors
// ============================================================================

impl From<ClassificationError> for ApiError {
    fn from(err: ClassificationError) -> Self {
        match err {
            ClassificationError::InvalidInput { field, value } => {
                ApiError::InvalidInput { field, value }
            }
            other @ ClassificationError::IncompleteConfiguration(_) => {
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl From<SupplierServiceError> for ApiError {
    fn from(err: SupplierServiceError) -> Self {
        match err {
            SupplierServiceError::Classification(e) => e.into(),
            SupplierServiceError::DbError(DbError::NotFound(id)) => {
                ApiError::AssessmentNotFound(id)
            }
            SupplierServiceError::DbError(e) => e.into(),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(id) => ApiError::NotFound(id),
            _ => ApiError::Database(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_invalid_input_response() {
        let err: ApiError = ClassificationError::invalid("data_volume", "gigantic").into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "invalid_input");
        assert!(json["message"].as_str().unwrap().contains("data_volume"));
        assert!(Uuid::parse_str(json["request_id"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn test_incomplete_configuration_is_internal() {
        let err: ApiError =
            ClassificationError::IncompleteConfiguration("no documents for tier C".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_missing_assessment_is_not_found() {
        let err: ApiError =
            SupplierServiceError::DbError(DbError::NotFound("abc".to_string())).into();
        assert!(matches!(err, ApiError::AssessmentNotFound(ref id) if id == "abc"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
