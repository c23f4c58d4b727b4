//! Checkout / checkin.
//!
//! Each id is resolved and written on its own; there is no batch
//! statement and no transaction across ids. One bad id never sinks the
//! others, and the per-id outcome is reported back. The call fails only
//! when nothing moved.

use tracing::{info, warn};
use wig_core::validation::require_exists;
use wig_core::{BulkOutcome, BulkResult, OwnerId, ValidationError};

use super::Inventory;
use crate::auth::Authorized;
use crate::error::{ApiResult, STORE_FAILURE_MESSAGE};
use crate::response::{BulkPayload, Envelope};

impl Inventory {
    /// Hands the given ownerships to `borrower_id`.
    pub async fn checkout(
        &self,
        owner: &Authorized,
        borrower_id: &str,
        ownership_ids: &[String],
    ) -> ApiResult<Envelope<BulkPayload>> {
        let borrower = require_exists(
            "Borrower",
            self.db.borrowers().find_by_id(owner, borrower_id).await,
        )?;

        let result = self.transition(owner, ownership_ids, Some(&borrower.id)).await;
        finish(result, "checkout", "Ownerships checked out")
    }

    /// Returns the given ownerships to their owner. Already-held ids count as updated.
    pub async fn checkin(
        &self,
        owner: &Authorized,
        ownership_ids: &[String],
    ) -> ApiResult<Envelope<BulkPayload>> {
        let result = self.transition(owner, ownership_ids, None).await;
        finish(result, "checkin", "Ownerships checked in")
    }

    async fn transition(
        &self,
        owner: &OwnerId,
        ownership_ids: &[String],
        borrower_id: Option<&str>,
    ) -> BulkResult {
        let ownerships = self.db.ownerships();
        let mut result = BulkResult::default();

        for id in dedup(ownership_ids) {
            let outcome = match ownerships.find_by_id(owner, id).await {
                Ok(Some(mut ownership)) => {
                    ownership.borrower_id = borrower_id.map(str::to_string);
                    match ownerships.save(&ownership).await {
                        Ok(()) => BulkOutcome::Updated,
                        Err(e) => {
                            warn!(ownership = %id, error = %e, "Failed to save ownership");
                            BulkOutcome::StoreFailure(STORE_FAILURE_MESSAGE.to_string())
                        }
                    }
                }
                Ok(None) => BulkOutcome::NotFound,
                Err(e) => {
                    warn!(ownership = %id, error = %e, "Failed to resolve ownership");
                    BulkOutcome::StoreFailure(STORE_FAILURE_MESSAGE.to_string())
                }
            };
            result.record(id, outcome);
        }

        result
    }
}

/// Ids in first-seen order, duplicates dropped.
fn dedup(ids: &[String]) -> Vec<&str> {
    let mut seen = std::collections::HashSet::new();
    ids.iter()
        .map(String::as_str)
        .filter(|id| seen.insert(*id))
        .collect()
}

fn finish(result: BulkResult, operation: &str, message: &str) -> ApiResult<Envelope<BulkPayload>> {
    if result.success_count() == 0 {
        return Err(ValidationError::NothingProcessed {
            operation: operation.to_string(),
        }
        .into());
    }

    info!(
        operation = %operation,
        updated = result.success_count(),
        requested = result.results.len(),
        "Bulk transition finished"
    );

    Ok(Envelope::ok(
        message,
        BulkPayload {
            ownerships: result.succeeded(),
            results: result.results,
        },
    ))
}
