//! # Validation Module
//!
//! Lookup combinators and input validators shared by every component.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Field validators (this module)                               │
//! │  ├── Empty / format / sign checks                                      │
//! │  └── Run before any store access                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Lookup combinators (this module)                             │
//! │  ├── require_exists     → NotFound / StoreFailure                      │
//! │  └── require_not_in_use → Conflict / StoreFailure (advisory)           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── UNIQUE constraints  ← authoritative uniqueness guard              │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `require_not_in_use` runs before an insert and can race with a concurrent
//! request. The UNIQUE index is what actually rejects the duplicate; the
//! combinator only produces the nicer error in the common case.
//!
//! ## Usage
//! ```rust
//! use wig_core::validation::{require_exists, require_not_in_use};
//!
//! let found: Result<Option<u32>, String> = Ok(Some(7));
//! assert_eq!(require_exists("Ownership", found).unwrap(), 7);
//!
//! let free: Result<Option<u32>, String> = Ok(None);
//! assert!(require_not_in_use("Location QR", "QR-1", free).is_ok());
//! ```

use std::fmt::Display;

use crate::error::{CoreError, CoreResult, ValidationError};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Lookup Combinators
// =============================================================================

/// Requires that a single-record lookup matched.
///
/// ## Mapping
/// ```text
/// Ok(Some(record)) → Ok(record)
/// Ok(None)         → NotFound { entity }
/// Err(e)           → StoreFailure(e)
/// ```
pub fn require_exists<T, E: Display>(entity: &str, lookup: Result<Option<T>, E>) -> CoreResult<T> {
    match lookup {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(CoreError::not_found(entity)),
        Err(e) => Err(CoreError::StoreFailure(e.to_string())),
    }
}

/// Requires that a uniqueness lookup matched nothing.
///
/// ## Mapping
/// ```text
/// Ok(None)    → Ok(())
/// Ok(Some(_)) → Conflict { field, value }
/// Err(e)      → StoreFailure(e)
/// ```
pub fn require_not_in_use<T, E: Display>(
    field: &str,
    value: &str,
    lookup: Result<Option<T>, E>,
) -> CoreResult<()> {
    match lookup {
        Ok(None) => Ok(()),
        Ok(Some(_)) => Err(CoreError::conflict(field, value)),
        Err(e) => Err(CoreError::StoreFailure(e.to_string())),
    }
}

// =============================================================================
// Field Validators
// =============================================================================

/// Requires a non-blank value. Returns it untrimmed.
pub fn validate_required<'a>(field: &str, value: &'a str) -> ValidationResult<&'a str> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(value)
}

/// Validates a catalog barcode.
///
/// ## Rules
/// - Must not be empty
/// - Must be a non-negative integer: ASCII digits only
///
/// The barcode stays a string so leading zeros (UPC-A, EAN-13) survive.
///
/// ## Example
/// ```rust
/// use wig_core::validation::validate_barcode;
///
/// assert!(validate_barcode("012345678905").is_ok());
/// assert!(validate_barcode("-12").is_err());
/// assert!(validate_barcode("abc").is_err());
/// ```
pub fn validate_barcode(barcode: &str) -> ValidationResult<&str> {
    if barcode.is_empty() {
        return Err(ValidationError::Required {
            field: "barcode".to_string(),
        });
    }

    if !barcode.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "barcode".to_string(),
            reason: "must be a non-negative integer".to_string(),
        });
    }

    Ok(barcode)
}

/// Validates a quantity change amount.
pub fn validate_amount(amount: i64) -> ValidationResult<i64> {
    if amount < 0 {
        return Err(ValidationError::Negative {
            field: "amount".to_string(),
        });
    }

    Ok(amount)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_exists() {
        let found: Result<Option<&str>, String> = Ok(Some("row"));
        assert_eq!(require_exists("Borrower", found).unwrap(), "row");

        let missing: Result<Option<&str>, String> = Ok(None);
        let err = require_exists("Borrower", missing).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { ref entity } if entity == "Borrower"));

        let broken: Result<Option<&str>, String> = Err("disk I/O error".to_string());
        let err = require_exists("Borrower", broken).unwrap_err();
        assert!(matches!(err, CoreError::StoreFailure(ref msg) if msg == "disk I/O error"));
    }

    #[test]
    fn test_require_not_in_use() {
        let free: Result<Option<u8>, String> = Ok(None);
        assert!(require_not_in_use("Location Name", "Garage", free).is_ok());

        let taken: Result<Option<u8>, String> = Ok(Some(1));
        let err = require_not_in_use("Location Name", "Garage", taken).unwrap_err();
        assert!(matches!(err, CoreError::Conflict { .. }));
        assert_eq!(err.to_string(), "Location Name 'Garage' is already in use");

        let broken: Result<Option<u8>, String> = Err("locked".to_string());
        assert!(matches!(
            require_not_in_use("Location Name", "Garage", broken),
            Err(CoreError::StoreFailure(_))
        ));
    }

    #[test]
    fn test_validate_required() {
        assert_eq!(validate_required("name", "Alice").unwrap(), "Alice");
        assert!(validate_required("name", "").is_err());
        assert!(validate_required("name", "   ").is_err());
    }

    #[test]
    fn test_validate_barcode() {
        assert!(validate_barcode("0").is_ok());
        assert!(validate_barcode("012345678905").is_ok());

        assert!(validate_barcode("").is_err());
        assert!(validate_barcode("-1").is_err());
        assert!(validate_barcode("12a").is_err());
        assert!(validate_barcode(" 12").is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert_eq!(validate_amount(0).unwrap(), 0);
        assert_eq!(validate_amount(5).unwrap(), 5);
        assert!(validate_amount(-1).is_err());
    }
}
