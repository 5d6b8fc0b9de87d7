//! # API Error Type
//!
//! Unified error type for bridge operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Velvet POS                             │
//! │                                                                         │
//! │  Renderer                      Host                                     │
//! │  ────────                      ────                                     │
//! │                                                                         │
//! │  POST /api/make-bill                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Handler Function                                                │  │
//! │  │  Result<Json<Reply<T>>, ApiError>                                │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Validation Error? ─── CoreError ──────────────┐                 │  │
//! │  │         │                                      │                 │  │
//! │  │         ▼                                      ▼                 │  │
//! │  │  Database Error? ───── DbError ─────────── ApiError ───────────► │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────► │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄──────────────────────────────────────────────────────────────────── │
//! │                                                                         │
//! │  const res = await fetch('/api/make-bill', ...);                        │
//! │  const body = await res.json();                                         │
//! │  // body = { success: false, code: "NOT_FOUND",                         │
//! │  //          message: "Employee not found: 7" }                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! Failures are the failure half of the response envelope and additionally
//! carry a matching HTTP status; a renderer may branch on either.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use velvet_core::{CoreError, ValidationError};
use velvet_db::DbError;

/// API error returned from bridge operations.
///
/// ## Serialization
/// This is what the renderer receives when an operation fails:
/// ```json
/// {
///   "success": false,
///   "code": "NOT_FOUND",
///   "message": "Employee not found: 7"
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

/// Error codes for bridge responses.
///
/// ## Usage in Renderer
/// ```typescript
/// const body = await res.json();
/// if (!body.success) {
///   switch (body.code) {
///     case 'NOT_FOUND':
///       showNotification('Not found');
///       break;
///     case 'VALIDATION_ERROR':
///       showFormErrors(body.message);
///       break;
///     default:
///       showError('An error occurred');
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Unique constraint conflict, e.g. duplicate employee email (409)
    Conflict,

    /// Database operation failed (500)
    DatabaseError,

    /// Printer transport failed (502)
    PrinterError,

    /// Internal server error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{resource} not found: {id}"))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a printer error.
    pub fn printer(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::PrinterError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// The HTTP status paired with the envelope.
    pub fn status(&self) -> StatusCode {
        match self.code {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::PrinterError => StatusCode::BAD_GATEWAY,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, id),

            DbError::UniqueViolation { field } => {
                ApiError::new(ErrorCode::Conflict, format!("{field} already exists"))
            }

            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::validation("Invalid reference")
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
///
/// Every core error is a problem with renderer input, so they all map to
/// validation failures.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Makes ApiError usable as an axum handler error.
///
/// The body matches the failure envelope exactly so a renderer that ignores
/// HTTP status codes still sees `success: false` with a code.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "success": false,
            "code": self.code,
            "message": self.message,
        }));

        (status, body).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::not_found("Bill", 9).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::validation("bad").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::printer("down").status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            ApiError::new(ErrorCode::Conflict, "email already exists").status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_db_errors_map_to_codes() {
        let err: ApiError = DbError::not_found("Employee", 7).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Employee not found: 7");

        let err: ApiError = DbError::UniqueViolation {
            field: "email".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::Conflict);

        let err: ApiError = DbError::QueryFailed("syntax error".to_string()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        // Internal detail must not leak to the renderer
        assert!(!err.message.contains("syntax error"));
    }

    #[test]
    fn test_core_errors_are_validation() {
        let err: ApiError = CoreError::EmptyBill.into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "A bill needs at least one product");
    }

    #[test]
    fn test_error_code_serializes_screaming_snake() {
        let json = serde_json::to_value(ErrorCode::NotFound).unwrap();
        assert_eq!(json, "NOT_FOUND");

        let json = serde_json::to_value(ErrorCode::ValidationError).unwrap();
        assert_eq!(json, "VALIDATION_ERROR");
    }
}
