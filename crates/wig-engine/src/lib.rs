//! # wig-engine: Possessions Tracker Services
//!
//! Entity resolution and state transitions over the WIG store.
//!
//! ## Module Organization
//! ```text
//! wig_engine/
//! ├── lib.rs          ◄─── You are here
//! ├── services/
//! │   ├── mod.rs      ◄─── Inventory (store + collaborators), views
//! │   ├── borrowers.rs
//! │   ├── locations.rs
//! │   ├── scan.rs
//! │   ├── barcode.rs
//! │   ├── ownerships.rs
//! │   └── checkout.rs
//! ├── auth.rs         ◄─── Authorized proof, Authenticator trait, JWT
//! ├── catalog.rs      ◄─── CatalogClient trait, UPCitemdb implementation
//! ├── config.rs       ◄─── EngineConfig from the environment
//! ├── response.rs     ◄─── { success, message, ...payload } envelope
//! ├── telemetry.rs    ◄─── tracing subscriber setup
//! └── error.rs        ◄─── ApiError (code + message)
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use wig_engine::{EngineConfig, Inventory};
//! use wig_core::OwnerId;
//!
//! let inventory = Inventory::from_config(&EngineConfig::load()?).await?;
//! let owner = OwnerId::from("owner-1");
//!
//! let caller = inventory.authorize(&owner, token).await?;
//! let scan = inventory.resolve_barcode(&caller, "012345678905").await?;
//! ```

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod response;
pub mod services;
pub mod telemetry;

pub use auth::{Authenticator, Authorized, JwtAuthenticator};
pub use catalog::{CatalogClient, CatalogError, CatalogProduct, UpcItemDbClient};
pub use config::{ConfigError, EngineConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use response::Envelope;
pub use services::Inventory;
