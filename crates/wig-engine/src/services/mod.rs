//! # Inventory Services
//!
//! [`Inventory`] holds the store and both collaborators. Each submodule
//! adds one component's operations to it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  borrowers.rs   create_borrower, list_borrowers                        │
//! │  locations.rs   create_location, set_container, edit_location          │
//! │  scan.rs        classify_code                                          │
//! │  barcode.rs     resolve_barcode                                        │
//! │  ownerships.rs  create / change_quantity / edit / delete / relocate,   │
//! │                 assign_scan_qr, get_ownership, list_ownerships_at      │
//! │  checkout.rs    checkout, checkin                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation takes the caller as an [`Authorized`], which only
//! [`Inventory::authorize`] hands out. Each request
//! runs its store calls in sequence with no transaction around them; the
//! store's constraints settle races.

mod barcode;
mod borrowers;
mod checkout;
mod locations;
mod ownerships;
mod scan;

use std::sync::Arc;

use tracing::{debug, warn};
use wig_core::{OwnerId, Ownership, OwnershipView};
use wig_db::Database;

use crate::auth::{Authenticator, Authorized, JwtAuthenticator};
use crate::catalog::{CatalogClient, UpcItemDbClient};
use crate::config::EngineConfig;
use crate::error::{ApiError, ApiResult};

/// The possessions tracker engine.
#[derive(Clone)]
pub struct Inventory {
    db: Database,
    catalog: Arc<dyn CatalogClient>,
    auth: Arc<dyn Authenticator>,
}

impl Inventory {
    pub fn new(
        db: Database,
        catalog: Arc<dyn CatalogClient>,
        auth: Arc<dyn Authenticator>,
    ) -> Self {
        Inventory { db, catalog, auth }
    }

    /// Opens the configured store and wires the UPCitemdb and JWT collaborators.
    pub async fn from_config(config: &EngineConfig) -> ApiResult<Self> {
        let db = Database::new(config.db_config()).await?;
        let catalog = UpcItemDbClient::new(&config.catalog_url, config.catalog_timeout())
            .map_err(ApiError::store)?;
        let auth = JwtAuthenticator::new(&config.jwt_secret);

        Ok(Inventory::new(db, Arc::new(catalog), Arc::new(auth)))
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Checks the caller's token for `owner` and returns the proof the
    /// other operations require.
    ///
    /// An empty owner or token fails without consulting the authenticator.
    pub async fn authorize(&self, owner: &OwnerId, token: &str) -> ApiResult<Authorized> {
        if owner.is_empty() {
            return Err(ApiError::auth("Owner id is required"));
        }
        if token.trim().is_empty() {
            return Err(ApiError::auth("Token is required"));
        }

        if !self.auth.validate(owner.as_str(), token).await {
            warn!(owner = %owner, "Token rejected");
            return Err(ApiError::auth("Invalid token"));
        }

        Ok(Authorized::new(owner.clone()))
    }

    /// Projects an ownership, resolving its location name best-effort.
    pub(crate) async fn view(&self, owner: &OwnerId, ownership: &Ownership) -> OwnershipView {
        let name = match &ownership.location_id {
            Some(location_id) => match self.db.locations().find_by_id(owner, location_id).await {
                Ok(found) => found.map(|location| location.name),
                Err(e) => {
                    debug!(location_id = %location_id, error = %e, "Location name lookup failed");
                    None
                }
            },
            None => None,
        };

        OwnershipView::project(ownership, name.as_deref())
    }

    pub(crate) async fn views(
        &self,
        owner: &OwnerId,
        ownerships: &[Ownership],
    ) -> Vec<OwnershipView> {
        let mut views = Vec::with_capacity(ownerships.len());
        for ownership in ownerships {
            views.push(self.view(owner, ownership).await);
        }
        views
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use crate::error::ErrorCode;
    use crate::response::{render, Empty};
    use wig_core::{OwnerId, LOCATION_NOT_FOUND_PLACEHOLDER};

    #[tokio::test]
    async fn test_authorize() {
        let inv = inventory().await;

        let caller = inv.authorize(&OwnerId::from("owner-1"), "valid").await.unwrap();
        assert_eq!(caller, owner());

        let err = inv.authorize(&owner(), "forged").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthFailure);
        assert_eq!(err.status(), 401);

        let err = inv.authorize(&OwnerId::from(""), "valid").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthFailure);

        let err = inv.authorize(&owner(), "").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthFailure);
    }

    #[tokio::test]
    async fn test_rejected_token_blocks_mutation() {
        let inv = inventory().await;
        let caller = OwnerId::from("owner-1");

        let err = inv.authorize(&caller, "forged").await.unwrap_err();
        let (status, body) = render::<Empty>(&Err(err));
        assert_eq!(status, 401);
        assert_eq!(body["code"], "AUTH_FAILURE");
        assert!(inv.db().borrowers().list(&caller).await.unwrap().is_empty());

        let session = inv.authorize(&caller, "valid").await.unwrap();
        inv.create_borrower(&session, "Alice").await.unwrap();
        assert_eq!(inv.db().borrowers().list(&caller).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_view_uses_placeholder_for_unresolved_location() {
        let inv = inventory().await;
        let mut own = inv.db().ownerships().create(&owner(), "111").await.unwrap();

        let view = inv.view(&owner(), &own).await;
        assert_eq!(view.location, LOCATION_NOT_FOUND_PLACEHOLDER);

        // a location id that does not resolve under the owner
        own.location_id = Some("gone".to_string());
        let view = inv.view(&owner(), &own).await;
        assert_eq!(view.location, LOCATION_NOT_FOUND_PLACEHOLDER);
        assert_eq!(view.ownership_id, own.id);
    }
}
