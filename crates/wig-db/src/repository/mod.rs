//! # Repository Module
//!
//! Database repository implementations for the WIG store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Engine service                                                        │
//! │       │                                                                 │
//! │       │  db.locations().find_by_qr(&owner, "QR-1")                     │
//! │       ▼                                                                 │
//! │  LocationRepository                                                    │
//! │  ├── find_by_qr / find_by_name / find_by_id   → Option<Location>       │
//! │  ├── insert(&location)                                                 │
//! │  └── save(&location)                                                   │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookups return `Ok(None)` for "no rows" so callers can tell a miss from
//! a store failure. Every owner-scoped query filters on `owner_id`.
//!
//! ## Available Repositories
//!
//! - [`BorrowerRepository`](borrower::BorrowerRepository) - Borrower registry
//! - [`LocationRepository`](location::LocationRepository) - Locations and containment
//! - [`CatalogRepository`](catalog::CatalogRepository) - Shared barcode catalog
//! - [`OwnershipRepository`](ownership::OwnershipRepository) - Owned item instances

pub mod borrower;
pub mod catalog;
pub mod location;
pub mod ownership;

/// Generates a new entity ID.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
