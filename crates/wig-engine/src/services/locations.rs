//! # Location Graph Manager
//!
//! Locations form a containment forest per owner. A placement is refused
//! when the container is the location itself or sits anywhere below it,
//! so the forest never gains a cycle.
//!
//! ```text
//!   set_container(garage, bin)          bin ─► shelf ─► garage
//!                                        ▲                 │
//!                                        └──── refused ────┘
//! ```

use std::str::FromStr;

use tracing::info;
use wig_core::containment::{check_not_self, check_placement};
use wig_core::validation::{require_exists, require_not_in_use, validate_required};
use wig_core::LocationKind;
use wig_db::DbError;

use super::Inventory;
use crate::auth::Authorized;
use crate::error::{ApiError, ApiResult};
use crate::response::{Envelope, LocationPayload};

impl Inventory {
    /// Creates a top-level location.
    ///
    /// QR is checked before name; the first conflict wins. A QR already
    /// used as an ownership's scan code conflicts too.
    pub async fn create_location(
        &self,
        owner: &Authorized,
        qr: &str,
        name: &str,
        kind: &str,
    ) -> ApiResult<Envelope<LocationPayload>> {
        let kind = LocationKind::from_str(kind)?;
        let qr = validate_required("Location QR", qr)?;
        let name = validate_required("Location name", name)?;

        let locations = self.db.locations();
        require_not_in_use("Location QR", qr, locations.find_by_qr(owner, qr).await)?;
        require_not_in_use("Location name", name, locations.find_by_name(owner, name).await)?;
        require_not_in_use(
            "Location QR",
            qr,
            self.db.ownerships().find_by_scan_qr(owner, qr).await,
        )?;

        let location = locations
            .create(owner, qr, name, kind)
            .await
            .map_err(|e| location_conflict(e, qr, name))?;

        info!(owner = %owner, location = %location.id, kind = %kind, "Location created");
        Ok(Envelope::ok(
            "Location added successfully",
            LocationPayload { location },
        ))
    }

    /// Places `location_id` inside `container_id`.
    pub async fn set_container(
        &self,
        owner: &Authorized,
        location_id: &str,
        container_id: &str,
    ) -> ApiResult<Envelope<LocationPayload>> {
        check_not_self(location_id, container_id)?;

        let locations = self.db.locations();
        let mut location =
            require_exists("Location", locations.find_by_id(owner, location_id).await)?;
        let container =
            require_exists("Container location", locations.find_by_id(owner, container_id).await)?;

        let ancestors = locations.ancestors(owner, &container.id).await?;
        check_placement(
            &location.id,
            &container.id,
            ancestors.iter().map(String::as_str),
        )?;

        location.container_id = Some(container.id.clone());
        locations.save(&location).await?;

        info!(
            owner = %owner,
            location = %location.id,
            container = %container.id,
            "Location placed"
        );
        Ok(Envelope::ok(
            format!("{} set in {}", location.name, container.name),
            LocationPayload { location },
        ))
    }

    /// Overwrites name, description and tags. Empty values are stored as given.
    pub async fn edit_location(
        &self,
        owner: &Authorized,
        location_id: &str,
        name: &str,
        description: &str,
        tags: &str,
    ) -> ApiResult<Envelope<LocationPayload>> {
        let locations = self.db.locations();
        let mut location =
            require_exists("Location", locations.find_by_id(owner, location_id).await)?;

        location.name = name.to_string();
        location.description = description.to_string();
        location.tags = tags.to_string();

        locations
            .save(&location)
            .await
            .map_err(|e| location_conflict(e, &location.qr_code, name))?;

        Ok(Envelope::ok("Location updated", LocationPayload { location }))
    }
}

/// Names the column a location UNIQUE violation hit.
fn location_conflict(err: DbError, qr: &str, name: &str) -> ApiError {
    if err.violates_column("qr_code") {
        ApiError::conflict("Location QR", qr)
    } else if err.violates_column("name") {
        ApiError::conflict("Location name", name)
    } else {
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::location_conflict;
    use crate::error::ErrorCode;
    use crate::services::testing::*;
    use crate::services::Inventory;
    use wig_core::LocationKind;
    use wig_db::{Database, DbConfig};

    async fn location(inv: &Inventory, qr: &str, name: &str) -> String {
        inv.create_location(&owner(), qr, name, "location")
            .await
            .unwrap()
            .payload
            .location
            .id
    }

    #[tokio::test]
    async fn test_create_location() {
        let inv = inventory().await;

        let created = inv.create_location(&owner(), "Q1", "Garage", "bin").await.unwrap();
        assert_eq!(created.message, "Location added successfully");
        assert_eq!(created.payload.location.kind, LocationKind::Bin);
        assert!(created.payload.location.container_id.is_none());
    }

    #[tokio::test]
    async fn test_create_location_validation() {
        let inv = inventory().await;

        let err = inv.create_location(&owner(), "Q1", "Garage", "drawer").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        let err = inv.create_location(&owner(), "", "Garage", "bin").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        let err = inv.create_location(&owner(), "Q1", "", "bin").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[tokio::test]
    async fn test_duplicate_qr_or_name_conflicts() {
        let inv = inventory().await;
        location(&inv, "Q1", "Garage").await;

        let err = inv.create_location(&owner(), "Q1", "Shed", "bag").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert!(err.message.starts_with("Location QR"));

        let err = inv.create_location(&owner(), "Q2", "Garage", "bag").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert!(err.message.starts_with("Location name"));

        // qr is checked first
        let err = inv.create_location(&owner(), "Q1", "Garage", "bag").await.unwrap_err();
        assert!(err.message.starts_with("Location QR"));

        assert_eq!(inv.db().locations().list(&owner()).await.unwrap().len(), 1);

        // another owner may reuse both
        let other = other_owner();
        assert!(inv.create_location(&other, "Q1", "Garage", "bag").await.is_ok());
    }

    #[tokio::test]
    async fn test_set_container() {
        let inv = inventory().await;
        let garage = location(&inv, "Q1", "Garage").await;
        let shelf = location(&inv, "Q2", "Shelf").await;

        let placed = inv.set_container(&owner(), &shelf, &garage).await.unwrap();
        assert_eq!(placed.message, "Shelf set in Garage");
        assert_eq!(placed.payload.location.container_id.as_deref(), Some(garage.as_str()));

        let stored = inv.db().locations().find_by_id(&owner(), &shelf).await.unwrap().unwrap();
        assert_eq!(stored.container_id, Some(garage));
    }

    #[tokio::test]
    async fn test_self_containment_is_invalid_even_for_unknown_ids() {
        let inv = inventory().await;
        let garage = location(&inv, "Q1", "Garage").await;

        let err = inv.set_container(&owner(), &garage, &garage).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        let err = inv.set_container(&owner(), "nope", "nope").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[tokio::test]
    async fn test_deeper_cycle_is_refused() {
        let inv = inventory().await;
        let garage = location(&inv, "Q1", "Garage").await;
        let shelf = location(&inv, "Q2", "Shelf").await;
        let bin = location(&inv, "Q3", "Bin").await;

        inv.set_container(&owner(), &shelf, &garage).await.unwrap();
        inv.set_container(&owner(), &bin, &shelf).await.unwrap();

        let err = inv.set_container(&owner(), &garage, &bin).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        let err = inv.set_container(&owner(), &garage, &shelf).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        let stored = inv.db().locations().find_by_id(&owner(), &garage).await.unwrap().unwrap();
        assert!(stored.container_id.is_none());
    }

    #[tokio::test]
    async fn test_set_container_requires_both_under_owner() {
        let inv = inventory().await;
        let garage = location(&inv, "Q1", "Garage").await;
        let foreign = inv
            .create_location(&other_owner(), "Q9", "Attic", "location")
            .await
            .unwrap()
            .payload
            .location
            .id;

        let err = inv.set_container(&owner(), &garage, &foreign).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = inv.set_container(&owner(), "missing", &garage).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_edit_location_is_full_replace_and_idempotent() {
        let inv = inventory().await;
        let garage = location(&inv, "Q1", "Garage").await;

        inv.edit_location(&owner(), &garage, "Workshop", "", "tools").await.unwrap();
        let once = inv.db().locations().find_by_id(&owner(), &garage).await.unwrap().unwrap();

        inv.edit_location(&owner(), &garage, "Workshop", "", "tools").await.unwrap();
        let twice = inv.db().locations().find_by_id(&owner(), &garage).await.unwrap().unwrap();

        assert_eq!(once.name, "Workshop");
        assert_eq!(once.description, "");
        assert_eq!(once.tags, "tools");
        assert_eq!(
            (once.name, once.description, once.tags, once.container_id),
            (twice.name, twice.description, twice.tags, twice.container_id)
        );
    }

    #[tokio::test]
    async fn test_edit_location_errors() {
        let inv = inventory().await;
        location(&inv, "Q1", "Garage").await;
        let shed = location(&inv, "Q2", "Shed").await;

        let err = inv.edit_location(&owner(), "missing", "X", "", "").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = inv.edit_location(&owner(), &shed, "Garage", "", "").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn test_ownership_scan_code_cannot_become_location_qr() {
        let inv = inventory().await;
        let id = inv.create_ownership(&owner(), "111").await.unwrap().payload.ownership_uid;
        inv.assign_scan_qr(&owner(), &id, "TAG-1").await.unwrap();

        let err = inv
            .create_location(&owner(), "TAG-1", "Garage", "location")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert!(err.message.starts_with("Location QR"));
        assert!(inv.db().locations().list(&owner()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_index_conflicts_name_the_column() {
        let inv = inventory().await;
        let locations = inv.db().locations();
        locations.create(&owner(), "Q1", "Garage", LocationKind::Location).await.unwrap();

        let raced = locations
            .create(&owner(), "Q1", "Shed", LocationKind::Location)
            .await
            .unwrap_err();
        let err = location_conflict(raced, "Q1", "Shed");
        assert_eq!(err.code, ErrorCode::Conflict);
        assert!(err.message.starts_with("Location QR"));

        let raced = locations
            .create(&owner(), "Q2", "Garage", LocationKind::Location)
            .await
            .unwrap_err();
        let err = location_conflict(raced, "Q2", "Garage");
        assert_eq!(err.code, ErrorCode::Conflict);
        assert!(err.message.starts_with("Location name"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_creates_leave_one_location() {
        let dir = tempfile::tempdir().unwrap();
        let config = DbConfig::new(dir.path().join("wig.db")).max_connections(8);
        let db = Database::new(config).await.unwrap();
        let inv = Inventory::new(db, Arc::new(CountingCatalog::default()), Arc::new(StaticAuth));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let inv = inv.clone();
            handles.push(tokio::spawn(async move {
                inv.create_location(&owner(), "Q1", "Garage", "location").await
            }));
        }

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(err) => assert_eq!(err.code, ErrorCode::Conflict),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(inv.db().locations().list(&owner()).await.unwrap().len(), 1);
        inv.db().close().await;
    }
}
