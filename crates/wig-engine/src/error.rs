//! # API Error Type
//!
//! The (code, error) pair every service returns on failure.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in WIG                                    │
//! │                                                                         │
//! │  ValidationError ──► CoreError::InvalidInput ─────────┐                │
//! │                                                       │                │
//! │  Lookup combinators ─► CoreError::NotFound / Conflict ├──► ApiError    │
//! │                                                       │    (code,      │
//! │  sqlx::Error ──► DbError::UniqueViolation ── Conflict ┤     message)   │
//! │                  DbError::*  ─────────── StoreFailure ┘                │
//! │                                                                         │
//! │  Boundary layer maps ApiError::status() to the response code.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! ```json
//! { "code": "NOT_FOUND", "message": "Ownership does not exist" }
//! ```

use serde::Serialize;
use wig_core::{CoreError, ValidationError};
use wig_db::DbError;

/// Message shown for any store failure; the cause is logged instead.
pub const STORE_FAILURE_MESSAGE: &str = "Error with database connection";

/// API error returned from every service operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    #[serde(skip)]
    status: u16,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed, missing or out-of-range request field (400)
    InvalidInput,

    /// Referenced entity absent under the caller's scope (404)
    NotFound,

    /// Uniqueness violation (400)
    Conflict,

    /// Unexpected persistence-layer error (400)
    StoreFailure,

    /// Token / identity mismatch (401)
    AuthFailure,
}

impl ErrorCode {
    /// Default response status for this code.
    pub fn status(&self) -> u16 {
        match self {
            ErrorCode::InvalidInput => 400,
            ErrorCode::NotFound => 404,
            ErrorCode::Conflict => 400,
            ErrorCode::StoreFailure => 400,
            ErrorCode::AuthFailure => 401,
        }
    }
}

impl ApiError {
    /// Creates a new API error with the code's default status.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            status: code.status(),
        }
    }

    /// Overrides the response status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Response status the boundary should use.
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidInput, message)
    }

    pub fn not_found(entity: &str) -> Self {
        CoreError::not_found(entity).into()
    }

    pub fn conflict(field: &str, value: &str) -> Self {
        CoreError::conflict(field, value).into()
    }

    pub fn auth(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::AuthFailure, message)
    }

    /// Logs `cause` and returns the opaque store failure.
    pub fn store(cause: impl std::fmt::Display) -> Self {
        tracing::error!(error = %cause, "Store operation failed");
        ApiError::new(ErrorCode::StoreFailure, STORE_FAILURE_MESSAGE)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidInput(e) => ApiError::invalid_input(e.to_string()),
            e @ CoreError::NotFound { .. } => ApiError::new(ErrorCode::NotFound, e.to_string()),
            e @ CoreError::Conflict { .. } => ApiError::new(ErrorCode::Conflict, e.to_string()),
            CoreError::StoreFailure(cause) => ApiError::store(cause),
            CoreError::AuthFailure(msg) => ApiError::auth(msg),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::invalid_input(err.to_string())
    }
}

/// Converts database errors to API errors.
///
/// A UNIQUE violation is the store's verdict on a uniqueness race and
/// surfaces as `CONFLICT`, same as the application-level check.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, .. } => ApiError::not_found(&entity),
            DbError::UniqueViolation { field, value } => {
                let columns: Vec<&str> = field
                    .split(',')
                    .filter_map(|c| c.trim().rsplit('.').next())
                    .filter(|c| *c != "owner_id")
                    .collect();
                ApiError::conflict(&columns.join(", "), &value)
            }
            other => ApiError::store(other),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for service operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::invalid_input("x").status(), 400);
        assert_eq!(ApiError::not_found("Borrower").status(), 404);
        assert_eq!(ApiError::conflict("Location QR", "Q1").status(), 400);
        assert_eq!(ApiError::auth("bad token").status(), 401);
        assert_eq!(ApiError::store("boom").with_status(500).status(), 500);
    }

    #[test]
    fn test_unique_violation_becomes_conflict() {
        let err: ApiError =
            DbError::duplicate("locations.owner_id, locations.qr_code", "Q1").into();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "qr_code 'Q1' is already in use");
    }

    #[test]
    fn test_store_errors_are_opaque() {
        let err: ApiError = DbError::QueryFailed("disk I/O error".to_string()).into();
        assert_eq!(err.code, ErrorCode::StoreFailure);
        assert_eq!(err.message, STORE_FAILURE_MESSAGE);
    }

    #[test]
    fn test_core_error_mapping() {
        let err: ApiError = CoreError::from(ValidationError::Required {
            field: "barcode".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.message, "barcode is required");

        let err: ApiError = CoreError::not_found("Ownership").into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Ownership does not exist");
    }

    #[test]
    fn test_serializes_code_and_message() {
        let json = serde_json::to_value(ApiError::not_found("Location")).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Location does not exist");
        assert!(json.get("status").is_none());
    }
}
