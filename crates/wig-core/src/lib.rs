//! # wig-core: Pure Domain Logic for the WIG Inventory Engine
//!
//! Entity types and the rules that do not need a database: lookup
//! validation, quantity arithmetic and location containment.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        WIG Architecture                                 │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Boundary layer (HTTP, auth tokens) - external        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    wig-engine (services)                        │   │
//! │  │  classify_code, resolve_barcode, checkout, change_quantity ...  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ wig-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌──────────┐   │   │
//! │  │   │   types   │  │ quantity  │  │containment │  │validation│   │   │
//! │  │   │ Ownership │  │   modes   │  │   cycles   │  │  lookups │   │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └──────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    wig-db (Database Layer)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use wig_core::QuantityMode;
//!
//! // Decrement floors at zero
//! let next = QuantityMode::Decrement.apply(2, 5).unwrap();
//! assert_eq!(next, 0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod containment;
pub mod error;
pub mod quantity;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use quantity::QuantityMode;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Location name shown in an Ownership view when the location does not resolve.
pub const LOCATION_NOT_FOUND_PLACEHOLDER: &str = "Not found";
