//! Borrower registry.

use tracing::info;
use wig_core::validation::{require_not_in_use, validate_required};
use wig_db::DbError;

use super::Inventory;
use crate::auth::Authorized;
use crate::error::{ApiError, ApiResult};
use crate::response::{BorrowerPayload, BorrowersPayload, Envelope};

impl Inventory {
    /// Registers a borrower. Names are unique per owner.
    pub async fn create_borrower(
        &self,
        owner: &Authorized,
        name: &str,
    ) -> ApiResult<Envelope<BorrowerPayload>> {
        let name = validate_required("Borrower name", name)?;

        require_not_in_use(
            "Borrower",
            name,
            self.db.borrowers().find_by_name(owner, name).await,
        )?;

        let borrower = self
            .db
            .borrowers()
            .create(owner, name)
            .await
            .map_err(|e| borrower_conflict(e, name))?;

        info!(owner = %owner, borrower = %borrower.id, "Borrower created");
        Ok(Envelope::ok("Borrower created", BorrowerPayload { borrower }))
    }

    /// Lists the owner's borrowers. Having none is `NOT_FOUND`.
    pub async fn list_borrowers(
        &self,
        owner: &Authorized,
    ) -> ApiResult<Envelope<BorrowersPayload>> {
        let borrowers = self.db.borrowers().list(owner).await?;

        if borrowers.is_empty() {
            return Err(ApiError::not_found("Borrowers"));
        }

        Ok(Envelope::ok("Borrowers found", BorrowersPayload { borrowers }))
    }
}

/// A lost race on the `(owner_id, name)` index is still a Conflict.
fn borrower_conflict(err: DbError, name: &str) -> ApiError {
    if err.is_unique_violation() {
        ApiError::conflict("Borrower", name)
    } else {
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use super::borrower_conflict;
    use crate::error::ErrorCode;
    use crate::services::testing::*;

    #[tokio::test]
    async fn test_create_and_list() {
        let inv = inventory().await;

        let created = inv.create_borrower(&owner(), "Alice").await.unwrap();
        assert!(created.success);
        assert_eq!(created.payload.borrower.name, "Alice");

        inv.create_borrower(&owner(), "Bob").await.unwrap();

        let listed = inv.list_borrowers(&owner()).await.unwrap();
        let names: Vec<&str> = listed.payload.borrowers.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let inv = inventory().await;
        inv.create_borrower(&owner(), "Alice").await.unwrap();

        let err = inv.create_borrower(&owner(), "Alice").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(inv.list_borrowers(&owner()).await.unwrap().payload.borrowers.len(), 1);

        // names are scoped per owner
        assert!(inv.create_borrower(&other_owner(), "Alice").await.is_ok());
    }

    #[tokio::test]
    async fn test_empty_name_is_invalid() {
        let inv = inventory().await;
        let err = inv.create_borrower(&owner(), "").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[tokio::test]
    async fn test_list_with_no_borrowers_is_not_found() {
        let inv = inventory().await;
        let err = inv.list_borrowers(&owner()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.status(), 404);
    }

    #[tokio::test]
    async fn test_name_index_conflict_past_the_lookup() {
        let inv = inventory().await;
        inv.db().borrowers().create(&owner(), "Alice").await.unwrap();

        let raced = inv.db().borrowers().create(&owner(), "Alice").await.unwrap_err();
        let err = borrower_conflict(raced, "Alice");
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.status(), 400);
    }
}
