//! # Response Envelope
//!
//! Every operation answers with `{ success, message, ...payload }`. The
//! payload keys are flattened into the envelope and are what the
//! scanning app reads, so their names are fixed.
//!
//! ```json
//! {
//!   "success": true,
//!   "message": "Borrower created",
//!   "borrower": { "id": "…", "ownerId": "…", "name": "Alice", "createdAt": "…" }
//! }
//! ```

use serde::Serialize;
use wig_core::{Borrower, CatalogStatus, CodeKind, ItemOutcome, Location, OwnershipView};

use crate::error::{ApiError, ApiResult, ErrorCode};

/// Success envelope around a named payload.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Envelope<T> {
    pub fn ok(message: impl Into<String>, payload: T) -> Self {
        Envelope {
            success: true,
            message: message.into(),
            payload,
        }
    }
}

/// Failure envelope: `{ success: false, message, code }`.
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub success: bool,
    pub message: String,
    pub code: ErrorCode,
}

impl From<&ApiError> for Failure {
    fn from(err: &ApiError) -> Self {
        Failure {
            success: false,
            message: err.message.clone(),
            code: err.code,
        }
    }
}

/// Renders a service result as `(status, body)` for the boundary layer.
pub fn render<T: Serialize>(result: &ApiResult<Envelope<T>>) -> (u16, serde_json::Value) {
    let rendered = match result {
        Ok(envelope) => serde_json::to_value(envelope).map(|body| (200, body)),
        Err(err) => serde_json::to_value(Failure::from(err)).map(|body| (err.status(), body)),
    };

    rendered.unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to serialize response");
        (
            500,
            serde_json::json!({ "success": false, "message": "Failed to serialize response" }),
        )
    })
}

// =============================================================================
// Payloads
// =============================================================================

/// No payload beyond the message.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Empty {}

#[derive(Debug, Clone, Serialize)]
pub struct BorrowerPayload {
    pub borrower: Borrower,
}

#[derive(Debug, Clone, Serialize)]
pub struct BorrowersPayload {
    pub borrowers: Vec<Borrower>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationPayload {
    pub location: Location,
}

#[derive(Debug, Clone, Serialize)]
pub struct CodePayload {
    pub kind: CodeKind,
}

/// Outcome of a barcode resolution.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BarcodePayload {
    /// No ownership existed; one was created.
    #[serde(rename_all = "camelCase")]
    Created {
        title: String,
        barcode: String,
        brand: String,
        image: String,
        owner: String,
        ownership: OwnershipView,
        catalog_status: CatalogStatus,
    },
    /// The owner already holds one or more copies.
    #[serde(rename_all = "camelCase")]
    Found {
        item: String,
        brand: String,
        image: String,
        owner: String,
        ownership: Vec<OwnershipView>,
        catalog_status: CatalogStatus,
    },
}

impl BarcodePayload {
    pub fn is_created(&self) -> bool {
        matches!(self, BarcodePayload::Created { .. })
    }

    /// Views carried by the payload, whichever variant it is.
    pub fn ownerships(&self) -> Vec<&OwnershipView> {
        match self {
            BarcodePayload::Created { ownership, .. } => vec![ownership],
            BarcodePayload::Found { ownership, .. } => ownership.iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedOwnershipPayload {
    #[serde(rename = "ownershipUID")]
    pub ownership_uid: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OwnershipPayload {
    pub ownership: OwnershipView,
}

#[derive(Debug, Clone, Serialize)]
pub struct OwnershipListPayload {
    pub ownerships: Vec<OwnershipView>,
}

/// Checkout / checkin result: the ids that moved plus every per-id outcome.
#[derive(Debug, Clone, Serialize)]
pub struct BulkPayload {
    pub ownerships: Vec<String>,
    pub results: Vec<ItemOutcome>,
}
