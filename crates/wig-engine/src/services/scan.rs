//! Code resolver: what does a scanned QR code identify?
//!
//! Location QR codes are consulted before ownership scan codes. A store
//! error on either lookup fails the call instead of falling through.

use tracing::debug;
use wig_core::validation::validate_required;
use wig_core::{CodeKind, OwnerId};

use super::Inventory;
use crate::auth::Authorized;
use crate::error::{ApiError, ApiResult};
use crate::response::{CodePayload, Envelope};

impl Inventory {
    pub async fn classify_code(
        &self,
        owner: &Authorized,
        code: &str,
    ) -> ApiResult<Envelope<CodePayload>> {
        let kind = self.classify(owner, code).await?;
        Ok(Envelope::ok(kind.message(), CodePayload { kind }))
    }

    pub(crate) async fn classify(&self, owner: &OwnerId, code: &str) -> ApiResult<CodeKind> {
        let code = validate_required("QR code", code)?;

        let kind = match self.db.locations().find_by_qr(owner, code).await {
            Ok(Some(_)) => CodeKind::Location,
            Ok(None) => match self.db.ownerships().find_by_scan_qr(owner, code).await {
                Ok(Some(_)) => CodeKind::Ownership,
                Ok(None) => CodeKind::New,
                Err(e) => return Err(ApiError::store(e)),
            },
            Err(e) => return Err(ApiError::store(e)),
        };

        debug!(owner = %owner, code = %code, kind = ?kind, "Classified code");
        Ok(kind)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorCode;
    use crate::services::testing::*;
    use wig_core::CodeKind;

    #[tokio::test]
    async fn test_classify_each_namespace() {
        let inv = inventory().await;
        inv.create_location(&owner(), "LOC-1", "Garage", "location").await.unwrap();

        let mut own = inv.db().ownerships().create(&owner(), "111").await.unwrap();
        own.scan_qr = Some("TAG-1".to_string());
        inv.db().ownerships().save(&own).await.unwrap();

        let location = inv.classify_code(&owner(), "LOC-1").await.unwrap();
        assert_eq!(location.payload.kind, CodeKind::Location);
        assert_eq!(location.message, "Location");

        let ownership = inv.classify_code(&owner(), "TAG-1").await.unwrap();
        assert_eq!(ownership.payload.kind, CodeKind::Ownership);
        assert_eq!(ownership.message, "Ownership");

        let unknown = inv.classify_code(&owner(), "SOMETHING-ELSE").await.unwrap();
        assert_eq!(unknown.payload.kind, CodeKind::New);
        assert_eq!(unknown.message, "New");
    }

    #[tokio::test]
    async fn test_classification_is_owner_scoped() {
        let inv = inventory().await;
        inv.create_location(&owner(), "LOC-1", "Garage", "location").await.unwrap();

        let kind = inv.classify_code(&other_owner(), "LOC-1").await.unwrap().payload.kind;
        assert_eq!(kind, CodeKind::New);
    }

    #[tokio::test]
    async fn test_empty_code_is_invalid() {
        let inv = inventory().await;
        let err = inv.classify_code(&owner(), "").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[tokio::test]
    async fn test_store_failure_surfaces() {
        let inv = inventory().await;
        inv.db().close().await;

        let err = inv.classify_code(&owner(), "LOC-1").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StoreFailure);
    }

    #[tokio::test]
    async fn test_scan_code_keeps_classifying_as_ownership() {
        let inv = inventory().await;
        let id = inv.create_ownership(&owner(), "111").await.unwrap().payload.ownership_uid;
        inv.assign_scan_qr(&owner(), &id, "TAG-1").await.unwrap();

        assert!(inv.create_location(&owner(), "TAG-1", "Garage", "bin").await.is_err());

        let kind = inv.classify_code(&owner(), "TAG-1").await.unwrap().payload.kind;
        assert_eq!(kind, CodeKind::Ownership);
    }
}
