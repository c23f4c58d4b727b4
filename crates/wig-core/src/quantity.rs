//! # Quantity Arithmetic
//!
//! How an Ownership's quantity moves under increment / decrement / set.
//!
//! ```text
//! current = 3
//!   increment 2 → 5
//!   decrement 5 → 0   (floor at zero, never negative)
//!   set 9       → 9
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::validation::{validate_amount, ValidationResult};

/// The kind of quantity change requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityMode {
    Increment,
    Decrement,
    Set,
}

impl QuantityMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuantityMode::Increment => "increment",
            QuantityMode::Decrement => "decrement",
            QuantityMode::Set => "set",
        }
    }

    /// Applies the change to `current`.
    ///
    /// `amount` must be non-negative; the result is never negative.
    pub fn apply(&self, current: i64, amount: i64) -> ValidationResult<i64> {
        let amount = validate_amount(amount)?;

        let next = match self {
            QuantityMode::Increment => current.saturating_add(amount),
            QuantityMode::Decrement => current.saturating_sub(amount).max(0),
            QuantityMode::Set => amount,
        };

        Ok(next)
    }
}

impl FromStr for QuantityMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "increment" => Ok(QuantityMode::Increment),
            "decrement" => Ok(QuantityMode::Decrement),
            "set" => Ok(QuantityMode::Set),
            _ => Err(ValidationError::NotAllowed {
                field: "change type".to_string(),
                allowed: vec![
                    "increment".to_string(),
                    "decrement".to_string(),
                    "set".to_string(),
                ],
            }),
        }
    }
}

impl fmt::Display for QuantityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
