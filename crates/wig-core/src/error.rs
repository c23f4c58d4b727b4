//! # Error Types
//!
//! Domain-specific error types for wig-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  wig-core errors (this file)                                           │
//! │  ├── CoreError        - The engine's outcome taxonomy                  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  wig-db errors (separate crate)                                        │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  wig-engine errors                                                     │
//! │  └── ApiError         - (code, message) pair handed to the boundary    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError ← DbError                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Outcome taxonomy shared by every component.
///
/// Each variant corresponds to one response class at the boundary layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Malformed, missing or out-of-range request field.
    #[error("{0}")]
    InvalidInput(#[from] ValidationError),

    /// Referenced entity is absent under the caller's owner scope.
    ///
    /// ## When This Occurs
    /// - Id doesn't exist
    /// - Id exists but belongs to another owner
    /// - Location QR has not been registered
    #[error("{entity} does not exist")]
    NotFound { entity: String },

    /// Uniqueness violation (`(name, owner)`, `(qr, owner)`, ...).
    #[error("{field} '{value}' is already in use")]
    Conflict { field: String, value: String },

    /// Unexpected persistence-layer error.
    #[error("Store failure: {0}")]
    StoreFailure(String),

    /// Owner identity and token did not match.
    #[error("Authentication failed: {0}")]
    AuthFailure(String),
}

impl CoreError {
    /// Creates a NotFound error for the given entity label.
    pub fn not_found(entity: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: entity.into(),
        }
    }

    /// Creates a Conflict error.
    pub fn conflict(field: impl Into<String>, value: impl Into<String>) -> Self {
        CoreError::Conflict {
            field: field.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when request input doesn't meet requirements.
/// Raised before any store access.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., non-numeric barcode).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// A location was asked to contain itself, directly or through its ancestors.
    #[error("Location {location_id} cannot be placed inside {container_id}: containment cycle")]
    ContainmentCycle {
        location_id: String,
        container_id: String,
    },

    /// A bulk operation where no item could be processed.
    #[error("Failed to {operation} ownerships")]
    NothingProcessed { operation: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
