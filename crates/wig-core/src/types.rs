//! # Domain Types
//!
//! Core domain types used throughout the WIG engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   CatalogItem   │   │    Ownership    │   │    Location     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  barcode (PK)   │◄──│  barcode        │   │  id (UUID)      │       │
//! │  │  name, brand    │   │  owner_id       │──►│  qr_code        │       │
//! │  │  image_url      │   │  location_id    │   │  container_id ──┼─┐     │
//! │  └─────────────────┘   │  borrower_id ─┐ │   └─────────────────┘ │     │
//! │     (global)           └───────────────┼─┘            ▲          │     │
//! │                                        ▼              └──────────┘     │
//! │                        ┌─────────────────┐      (containment forest)   │
//! │                        │    Borrower     │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything except [`CatalogItem`] is scoped by `owner_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::LOCATION_NOT_FOUND_PLACEHOLDER;

// =============================================================================
// Owner
// =============================================================================

/// Opaque identity every other entity is partitioned by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        OwnerId(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OwnerId {
    fn from(id: &str) -> Self {
        OwnerId(id.to_string())
    }
}

// =============================================================================
// Borrower
// =============================================================================

/// A person who may temporarily hold an Ownership.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Borrower {
    pub id: String,
    pub owner_id: String,
    /// Unique per owner.
    pub name: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Location
// =============================================================================

/// What sort of container a location is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum LocationKind {
    Bin,
    Bag,
    Location,
}

impl LocationKind {
    pub const ALL: [LocationKind; 3] =
        [LocationKind::Bin, LocationKind::Bag, LocationKind::Location];

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationKind::Bin => "bin",
            LocationKind::Bag => "bag",
            LocationKind::Location => "location",
        }
    }
}

impl FromStr for LocationKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bin" => Ok(LocationKind::Bin),
            "bag" => Ok(LocationKind::Bag),
            "location" => Ok(LocationKind::Location),
            _ => Err(ValidationError::NotAllowed {
                field: "location type".to_string(),
                allowed: LocationKind::ALL.iter().map(|k| k.as_str().to_string()).collect(),
            }),
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named place Ownerships are stored in. May sit inside another location.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Location {
    pub id: String,
    pub owner_id: String,
    /// Unique per owner.
    pub name: String,
    pub kind: LocationKind,
    /// Unique per owner.
    pub qr_code: String,
    /// The location this one sits inside, if any.
    pub container_id: Option<String>,
    pub description: String,
    pub tags: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Catalog Item
// =============================================================================

/// Shared, barcode-keyed product metadata. Not owner scoped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogItem {
    pub barcode: String,
    pub name: String,
    pub brand: String,
    pub image_url: String,
}

/// Where the catalog data returned alongside a barcode resolution came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum CatalogStatus {
    /// Found in the local catalog.
    Cached,
    /// Fetched from the external catalog and persisted.
    Fetched,
    /// The external catalog failed; an empty item stands in.
    Unavailable,
}

// =============================================================================
// Ownership
// =============================================================================

/// One owner's claim on one physical copy of a catalog item.
///
/// `borrower_id == None` means the item is held by its owner.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Ownership {
    pub id: String,
    pub owner_id: String,
    pub barcode: String,
    pub custom_name: Option<String>,
    pub custom_image: Option<String>,
    pub custom_description: Option<String>,
    pub tags: String,
    /// Never negative.
    pub quantity: i64,
    pub scan_qr: Option<String>,
    pub location_id: Option<String>,
    pub borrower_id: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Ownership {
    #[inline]
    pub fn is_checked_out(&self) -> bool {
        self.borrower_id.is_some()
    }
}

/// The four editable Ownership fields. Applied as a full replace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipEdit {
    pub custom_name: String,
    pub custom_image: String,
    pub custom_description: String,
    pub tags: String,
}

impl OwnershipEdit {
    /// Overwrites the editable fields of `ownership`. Empty strings clear.
    pub fn apply_to(&self, ownership: &mut Ownership) {
        ownership.custom_name = non_empty(&self.custom_name);
        ownership.custom_image = non_empty(&self.custom_image);
        ownership.custom_description = non_empty(&self.custom_description);
        ownership.tags = self.tags.clone();
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Response projection of an Ownership, with its location resolved to a name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OwnershipView {
    pub ownership_id: String,
    pub barcode: String,
    pub custom_name: Option<String>,
    pub custom_image: Option<String>,
    pub custom_description: Option<String>,
    /// Location name, or the "Not found" placeholder.
    pub location: String,
    pub scan_qr: Option<String>,
    pub tags: String,
    pub quantity: i64,
    pub checked_out: bool,
    pub borrower_id: Option<String>,
}

impl OwnershipView {
    /// Builds the view. A location that did not resolve renders as the placeholder.
    pub fn project(ownership: &Ownership, location_name: Option<&str>) -> Self {
        OwnershipView {
            ownership_id: ownership.id.clone(),
            barcode: ownership.barcode.clone(),
            custom_name: ownership.custom_name.clone(),
            custom_image: ownership.custom_image.clone(),
            custom_description: ownership.custom_description.clone(),
            location: location_name
                .unwrap_or(LOCATION_NOT_FOUND_PLACEHOLDER)
                .to_string(),
            scan_qr: ownership.scan_qr.clone(),
            tags: ownership.tags.clone(),
            quantity: ownership.quantity,
            checked_out: ownership.is_checked_out(),
            borrower_id: ownership.borrower_id.clone(),
        }
    }
}

// =============================================================================
// Code Classification
// =============================================================================

/// What a scanned code identifies for a given owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum CodeKind {
    Location,
    Ownership,
    /// Not registered anywhere for this owner.
    New,
}

impl CodeKind {
    /// The message the scanning app switches on.
    pub fn message(&self) -> &'static str {
        match self {
            CodeKind::Location => "Location",
            CodeKind::Ownership => "Ownership",
            CodeKind::New => "New",
        }
    }
}

// =============================================================================
// Bulk Outcomes
// =============================================================================

/// Result of processing one id in a checkout or checkin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", content = "detail", rename_all = "camelCase")]
#[ts(export)]
pub enum BulkOutcome {
    Updated,
    NotFound,
    StoreFailure(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemOutcome {
    pub id: String,
    pub outcome: BulkOutcome,
}

/// Per-id outcomes of a bulk transition. Partial success is a success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BulkResult {
    pub results: Vec<ItemOutcome>,
}

impl BulkResult {
    pub fn record(&mut self, id: impl Into<String>, outcome: BulkOutcome) {
        self.results.push(ItemOutcome {
            id: id.into(),
            outcome,
        });
    }

    /// Ids whose transition was persisted, in processing order.
    pub fn succeeded(&self) -> Vec<String> {
        self.results
            .iter()
            .filter(|r| r.outcome == BulkOutcome::Updated)
            .map(|r| r.id.clone())
            .collect()
    }

    pub fn success_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome == BulkOutcome::Updated)
            .count()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ownership() -> Ownership {
        let now = Utc::now();
        Ownership {
            id: "own-1".to_string(),
            owner_id: "owner-1".to_string(),
            barcode: "012345678905".to_string(),
            custom_name: Some("Old name".to_string()),
            custom_image: None,
            custom_description: Some("desc".to_string()),
            tags: "camping".to_string(),
            quantity: 2,
            scan_qr: None,
            location_id: Some("loc-1".to_string()),
            borrower_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_location_kind_parse() {
        assert_eq!("bin".parse::<LocationKind>().unwrap(), LocationKind::Bin);
        assert_eq!("bag".parse::<LocationKind>().unwrap(), LocationKind::Bag);
        assert_eq!(
            "location".parse::<LocationKind>().unwrap(),
            LocationKind::Location
        );
        assert!("shelf".parse::<LocationKind>().is_err());
        assert!("BIN".parse::<LocationKind>().is_err());
    }

    #[test]
    fn test_view_uses_placeholder_for_unresolved_location() {
        let view = OwnershipView::project(&ownership(), None);
        assert_eq!(view.location, "Not found");

        let view = OwnershipView::project(&ownership(), Some("Garage"));
        assert_eq!(view.location, "Garage");
        assert!(!view.checked_out);
    }

    #[test]
    fn test_edit_is_full_replace() {
        let mut own = ownership();
        let edit = OwnershipEdit {
            custom_name: "Tent".to_string(),
            custom_image: String::new(),
            custom_description: String::new(),
            tags: String::new(),
        };
        edit.apply_to(&mut own);

        assert_eq!(own.custom_name.as_deref(), Some("Tent"));
        assert_eq!(own.custom_description, None);
        assert_eq!(own.tags, "");
    }

    #[test]
    fn test_bulk_result_succeeded() {
        let mut result = BulkResult::default();
        result.record("a", BulkOutcome::Updated);
        result.record("b", BulkOutcome::NotFound);
        result.record("c", BulkOutcome::StoreFailure("disk".to_string()));

        assert_eq!(result.succeeded(), vec!["a".to_string()]);
        assert_eq!(result.success_count(), 1);
    }

    #[test]
    fn test_code_kind_serializes_lowercase() {
        let json = serde_json::to_string(&CodeKind::New).unwrap();
        assert_eq!(json, "\"new\"");
        assert_eq!(CodeKind::Location.message(), "Location");
    }
}
