//! # wig-db: Database Layer for the WIG Inventory Engine
//!
//! The Store: SQLite through sqlx, one repository per entity.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        WIG Data Flow                                    │
//! │                                                                         │
//! │  wig-engine service (resolve_barcode, checkout, ...)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     wig-db (THIS CRATE)                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │   │   │
//! │  │   │               │    │ BorrowerRepo   │   │              │   │   │
//! │  │   │ SqlitePool    │◄───│ LocationRepo   │   │ 001_initial  │   │   │
//! │  │   │               │    │ CatalogRepo    │   │  _schema.sql │   │   │
//! │  │   │               │    │ OwnershipRepo  │   │              │   │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (UNIQUE / CHECK / FOREIGN KEY constraints)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wig_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/wig.db")).await?;
//! let ownerships = db.ownerships().list_by_barcode(&owner, "012345678905").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::borrower::BorrowerRepository;
pub use repository::catalog::CatalogRepository;
pub use repository::location::LocationRepository;
pub use repository::ownership::OwnershipRepository;
