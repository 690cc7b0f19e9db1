//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Settings API                       │
//! │                                                                         │
//! │  Handler                                                                │
//! │  Result<HttpResponse, ApiError>                                         │
//! │         │                                                               │
//! │         ├── DbError::NotFound ──────────────┐                           │
//! │         ├── ValidationError::Required ──────┤                           │
//! │         ├── CoreError::InvalidArgument ─────┼──► ApiError ──► envelope  │
//! │         └── Bad JSON / path / query ────────┘                           │
//! │                                                                         │
//! │  { "status": false, "code": "NOT_FOUND", "message": "..." }            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;

use bountip_core::{CoreError, ValidationError};
use bountip_db::DbError;

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// {
///   "status": false,
///   "code": "VALIDATION_ERROR",
///   "message": "Price tier must have either a markup or discount rule."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Argument could not be interpreted, e.g. a non-numeric base price (400)
    InvalidArgument,

    /// Request carries no business context (400)
    MissingContext,

    /// Database operation failed (500)
    DatabaseError,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError
            | ErrorCode::InvalidArgument
            | ErrorCode::MissingContext => StatusCode::BAD_REQUEST,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, id),
            DbError::ForeignKeyViolation { message } => {
                tracing::warn!("Foreign key violation: {}", message);
                ApiError::validation("Invalid reference")
            }
            DbError::CorruptRow { entity, id, reason } => {
                tracing::error!(entity = %entity, id, reason = %reason, "Corrupt row");
                ApiError::new(ErrorCode::DatabaseError, "Stored data is invalid")
            }
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidArgument(message) => {
                ApiError::new(ErrorCode::InvalidArgument, message)
            }
            CoreError::OutletNotFound(id) => ApiError::not_found("Outlet", id),
            CoreError::TierNotFound(id) => ApiError::not_found("PriceTier", id),
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.code.status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "status": false,
            "code": self.code,
            "message": self.message,
        }))
    }
}

// =============================================================================
// Extractor Error Handlers
// =============================================================================

/// Renders malformed JSON bodies in the standard envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::validation(format!("Invalid request body: {}", err)).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::validation(format!("Invalid query string: {}", err)).into()
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::validation(format!("Invalid path: {}", err)).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_not_found_maps_to_404() {
        let err: ApiError = DbError::not_found("PriceTier", 9).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "PriceTier not found: 9");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_argument_keeps_message() {
        let err: ApiError = CoreError::invalid_argument("Invalid basePrice: not a number").into();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert_eq!(err.message, "Invalid basePrice: not a number");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_validation_message() {
        let err: ApiError = CoreError::from(ValidationError::MissingPricingRule).into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Price tier must have either a markup or discount rule.");
    }

    #[test]
    fn test_internal_db_errors_are_generic() {
        let err: ApiError = DbError::QueryFailed("no such table: price_tiers".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database operation failed");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
