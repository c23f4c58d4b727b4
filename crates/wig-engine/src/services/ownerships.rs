//! # Ownership Ledger
//!
//! Every read or write is scoped by `(id, owner)`: an ownership that
//! belongs to someone else is indistinguishable from one that does not
//! exist.

use std::str::FromStr;

use tracing::{error, info};
use wig_core::validation::{
    require_exists, validate_amount, validate_barcode, validate_required,
};
use wig_core::{CodeKind, OwnershipEdit, QuantityMode};

use super::Inventory;
use crate::auth::Authorized;
use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::response::{
    CreatedOwnershipPayload, Empty, Envelope, OwnershipListPayload, OwnershipPayload,
};

impl Inventory {
    /// Registers another physical copy of `barcode`. Never deduplicated.
    pub async fn create_ownership(
        &self,
        owner: &Authorized,
        barcode: &str,
    ) -> ApiResult<Envelope<CreatedOwnershipPayload>> {
        let barcode = validate_barcode(barcode)?;
        let ownership = self.db.ownerships().create(owner, barcode).await?;

        info!(
            owner = %owner,
            barcode = %barcode,
            ownership = %ownership.id,
            "Ownership created"
        );
        Ok(Envelope::ok(
            "Ownership created",
            CreatedOwnershipPayload {
                ownership_uid: ownership.id,
            },
        ))
    }

    /// Applies `mode` (`increment`, `decrement` or `set`) with `amount`.
    ///
    /// Decrement floors at zero.
    pub async fn change_quantity(
        &self,
        owner: &Authorized,
        ownership_id: &str,
        mode: &str,
        amount: i64,
    ) -> ApiResult<Envelope<OwnershipPayload>> {
        let amount = validate_amount(amount)?;

        let ownerships = self.db.ownerships();
        let mut ownership =
            require_exists("Ownership", ownerships.find_by_id(owner, ownership_id).await)?;

        let mode = QuantityMode::from_str(mode)?;
        ownership.quantity = mode.apply(ownership.quantity, amount)?;
        ownerships.save(&ownership).await?;

        let ownership = self.view(owner, &ownership).await;
        Ok(Envelope::ok("Ownership updated", OwnershipPayload { ownership }))
    }

    /// Replaces the four editable fields; empty values clear them.
    pub async fn edit_ownership(
        &self,
        owner: &Authorized,
        ownership_id: &str,
        edit: &OwnershipEdit,
    ) -> ApiResult<Envelope<OwnershipPayload>> {
        let ownerships = self.db.ownerships();
        let mut ownership =
            require_exists("Ownership", ownerships.find_by_id(owner, ownership_id).await)?;

        edit.apply_to(&mut ownership);
        ownerships.save(&ownership).await?;

        let ownership = self.view(owner, &ownership).await;
        Ok(Envelope::ok("Ownership updated", OwnershipPayload { ownership }))
    }

    pub async fn delete_ownership(
        &self,
        owner: &Authorized,
        ownership_id: &str,
    ) -> ApiResult<Envelope<Empty>> {
        let ownerships = self.db.ownerships();
        let ownership =
            require_exists("Ownership", ownerships.find_by_id(owner, ownership_id).await)?;

        if let Err(e) = ownerships.delete(owner, &ownership.id).await {
            error!(ownership = %ownership.id, error = %e, "Error deleting ownership");
            return Err(
                ApiError::new(ErrorCode::StoreFailure, "Error deleting ownership").with_status(500)
            );
        }

        info!(owner = %owner, ownership = %ownership.id, "Ownership deleted");
        Ok(Envelope::ok("Ownership deleted successfully", Empty {}))
    }

    /// Moves an ownership into the location whose QR code is `location_qr`.
    pub async fn relocate_ownership(
        &self,
        owner: &Authorized,
        ownership_id: &str,
        location_qr: &str,
    ) -> ApiResult<Envelope<OwnershipPayload>> {
        let location = require_exists(
            "Location QR",
            self.db.locations().find_by_qr(owner, location_qr).await,
        )?;

        let ownerships = self.db.ownerships();
        let mut ownership =
            require_exists("Ownership", ownerships.find_by_id(owner, ownership_id).await)?;

        ownership.location_id = Some(location.id.clone());
        ownerships.save(&ownership).await?;

        let message = format!("Ownership set in {}", location.name);
        let ownership = self.view(owner, &ownership).await;
        Ok(Envelope::ok(message, OwnershipPayload { ownership }))
    }

    /// Gives an ownership a scan code so [`Inventory::classify_code`] can find it.
    ///
    /// The code must not already identify anything for this owner.
    pub async fn assign_scan_qr(
        &self,
        owner: &Authorized,
        ownership_id: &str,
        qr: &str,
    ) -> ApiResult<Envelope<OwnershipPayload>> {
        let qr = validate_required("Scan QR", qr)?;

        let ownerships = self.db.ownerships();
        let mut ownership =
            require_exists("Ownership", ownerships.find_by_id(owner, ownership_id).await)?;

        if self.classify(owner, qr).await? != CodeKind::New {
            return Err(ApiError::conflict("Scan QR", qr));
        }

        ownership.scan_qr = Some(qr.to_string());
        ownerships.save(&ownership).await.map_err(|e| {
            if e.is_unique_violation() {
                ApiError::conflict("Scan QR", qr)
            } else {
                e.into()
            }
        })?;

        let ownership = self.view(owner, &ownership).await;
        Ok(Envelope::ok("Scan QR assigned", OwnershipPayload { ownership }))
    }

    pub async fn get_ownership(
        &self,
        owner: &Authorized,
        ownership_id: &str,
    ) -> ApiResult<Envelope<OwnershipPayload>> {
        let ownership = require_exists(
            "Ownership",
            self.db.ownerships().find_by_id(owner, ownership_id).await,
        )?;

        let ownership = self.view(owner, &ownership).await;
        Ok(Envelope::ok("Ownership found", OwnershipPayload { ownership }))
    }

    /// Ownerships stored directly in a location (not in nested ones).
    pub async fn list_ownerships_at(
        &self,
        owner: &Authorized,
        location_id: &str,
    ) -> ApiResult<Envelope<OwnershipListPayload>> {
        let location = require_exists(
            "Location",
            self.db.locations().find_by_id(owner, location_id).await,
        )?;

        let ownerships = self.db.ownerships().list_by_location(owner, &location.id).await?;
        let ownerships = self.views(owner, &ownerships).await;

        Ok(Envelope::ok(
            format!("Ownerships in {}", location.name),
            OwnershipListPayload { ownerships },
        ))
    }
}
