//! # Catalog-Backed Resolver
//!
//! ## Resolution Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  resolve_barcode(owner, "012345678905")                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  local catalog hit? ── yes ──────────────────────────► cached           │
//! │       │ no                                                              │
//! │       ▼                                                                 │
//! │  external catalog (once)                                                │
//! │       ├── ok ──► upsert, re-read ────────────────────► fetched          │
//! │       └── err ─► empty item, NOT stored ─────────────► unavailable      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  owner's ownerships of the barcode                                      │
//! │       ├── none ──► create one ───────────────────────► Created          │
//! │       └── some ──► project each through the view ────► Found            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{info, warn};
use wig_core::validation::validate_barcode;
use wig_core::{CatalogItem, CatalogStatus};

use super::Inventory;
use crate::auth::Authorized;
use crate::error::{ApiError, ApiResult};
use crate::response::{BarcodePayload, Envelope};

impl Inventory {
    pub async fn resolve_barcode(
        &self,
        owner: &Authorized,
        barcode: &str,
    ) -> ApiResult<Envelope<BarcodePayload>> {
        let barcode = validate_barcode(barcode)?;
        let (item, catalog_status) = self.catalog_item(barcode).await?;

        let ownerships = self
            .db
            .ownerships()
            .list_by_barcode(owner, barcode)
            .await
            .map_err(ApiError::store)?;

        if ownerships.is_empty() {
            let created = self.db.ownerships().create(owner, barcode).await?;
            info!(
                owner = %owner,
                barcode = %barcode,
                ownership = %created.id,
                "Ownership created on first scan"
            );

            let ownership = self.view(owner, &created).await;
            return Ok(Envelope::ok(
                "Created new ownership",
                BarcodePayload::Created {
                    title: item.name,
                    barcode: item.barcode,
                    brand: item.brand,
                    image: item.image_url,
                    owner: owner.to_string(),
                    ownership,
                    catalog_status,
                },
            ));
        }

        let ownership = self.views(owner, &ownerships).await;
        Ok(Envelope::ok(
            "Item found",
            BarcodePayload::Found {
                item: item.name,
                brand: item.brand,
                image: item.image_url,
                owner: owner.to_string(),
                ownership,
                catalog_status,
            },
        ))
    }

    /// Local catalog first, external catalog at most once on a miss.
    async fn catalog_item(&self, barcode: &str) -> ApiResult<(CatalogItem, CatalogStatus)> {
        let catalog = self.db.catalog();

        if let Some(item) = catalog.find(barcode).await.map_err(ApiError::store)? {
            return Ok((item, CatalogStatus::Cached));
        }

        let product = match self.catalog.lookup(barcode).await {
            Ok(product) => product,
            Err(e) => {
                warn!(barcode = %barcode, error = %e, "Catalog lookup failed");
                let empty = CatalogItem {
                    barcode: barcode.to_string(),
                    ..CatalogItem::default()
                };
                return Ok((empty, CatalogStatus::Unavailable));
            }
        };

        let fetched = CatalogItem {
            barcode: barcode.to_string(),
            name: product.name,
            brand: product.brand,
            image_url: product.image_url,
        };
        catalog.upsert(&fetched).await.map_err(ApiError::store)?;

        let stored = catalog.find(barcode).await.map_err(ApiError::store)?;
        Ok((stored.unwrap_or(fetched), CatalogStatus::Fetched))
    }
}
