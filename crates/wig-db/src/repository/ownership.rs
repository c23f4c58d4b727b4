//! # Ownership Repository
//!
//! Database operations for owned item instances.
//!
//! ## Ownership State
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create()          quantity = 0, no location, borrower_id = NULL        │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  save()            quantity / custom fields / location / scan QR        │
//! │     │                                                                   │
//! │     ├── borrower_id = <borrower>   checked out                          │
//! │     └── borrower_id = NULL         held by owner                        │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  delete()                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Several ownerships may share `(owner_id, barcode)`: each one is a
//! distinct physical copy.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use super::generate_id;
use crate::error::{DbError, DbResult};
use wig_core::{OwnerId, Ownership};

const SELECT_OWNERSHIP: &str = r#"
    SELECT id, owner_id, barcode, custom_name, custom_image, custom_description,
           tags, quantity, scan_qr, location_id, borrower_id, created_at, updated_at
    FROM ownerships
"#;

/// Repository for ownership database operations.
#[derive(Debug, Clone)]
pub struct OwnershipRepository {
    pool: SqlitePool,
}

impl OwnershipRepository {
    /// Creates a new OwnershipRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OwnershipRepository { pool }
    }

    /// Gets an ownership by ID, scoped to its owner.
    pub async fn find_by_id(&self, owner: &OwnerId, id: &str) -> DbResult<Option<Ownership>> {
        let sql = format!("{SELECT_OWNERSHIP} WHERE id = ?1 AND owner_id = ?2");
        let ownership = sqlx::query_as::<_, Ownership>(&sql)
            .bind(id)
            .bind(owner.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(ownership)
    }

    /// Gets an ownership by its scan QR code, scoped to its owner.
    pub async fn find_by_scan_qr(&self, owner: &OwnerId, qr: &str) -> DbResult<Option<Ownership>> {
        let sql = format!("{SELECT_OWNERSHIP} WHERE scan_qr = ?1 AND owner_id = ?2");
        let ownership = sqlx::query_as::<_, Ownership>(&sql)
            .bind(qr)
            .bind(owner.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(ownership)
    }

    /// Lists an owner's ownerships of one barcode, oldest first.
    pub async fn list_by_barcode(
        &self,
        owner: &OwnerId,
        barcode: &str,
    ) -> DbResult<Vec<Ownership>> {
        let sql = format!(
            "{SELECT_OWNERSHIP} WHERE barcode = ?1 AND owner_id = ?2 ORDER BY created_at, id"
        );
        let ownerships = sqlx::query_as::<_, Ownership>(&sql)
            .bind(barcode)
            .bind(owner.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok(ownerships)
    }

    /// Lists an owner's ownerships stored directly in a location.
    pub async fn list_by_location(
        &self,
        owner: &OwnerId,
        location_id: &str,
    ) -> DbResult<Vec<Ownership>> {
        let sql = format!(
            "{SELECT_OWNERSHIP} WHERE location_id = ?1 AND owner_id = ?2 ORDER BY created_at, id"
        );
        let ownerships = sqlx::query_as::<_, Ownership>(&sql)
            .bind(location_id)
            .bind(owner.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok(ownerships)
    }

    /// Inserts a new ownership with default fields.
    ///
    /// No uniqueness check: repeated calls create distinct copies.
    pub async fn create(&self, owner: &OwnerId, barcode: &str) -> DbResult<Ownership> {
        let now = Utc::now();
        let ownership = Ownership {
            id: generate_id(),
            owner_id: owner.as_str().to_string(),
            barcode: barcode.to_string(),
            custom_name: None,
            custom_image: None,
            custom_description: None,
            tags: String::new(),
            quantity: 0,
            scan_qr: None,
            location_id: None,
            borrower_id: None,
            created_at: now,
            updated_at: now,
        };

        debug!(owner = %owner, barcode = %barcode, id = %ownership.id, "Inserting ownership");

        sqlx::query(
            r#"
            INSERT INTO ownerships (
                id, owner_id, barcode, custom_name, custom_image, custom_description,
                tags, quantity, scan_qr, location_id, borrower_id, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
        )
        .bind(&ownership.id)
        .bind(&ownership.owner_id)
        .bind(&ownership.barcode)
        .bind(&ownership.custom_name)
        .bind(&ownership.custom_image)
        .bind(&ownership.custom_description)
        .bind(&ownership.tags)
        .bind(ownership.quantity)
        .bind(&ownership.scan_qr)
        .bind(&ownership.location_id)
        .bind(&ownership.borrower_id)
        .bind(ownership.created_at)
        .bind(ownership.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(ownership)
    }

    /// Persists every mutable field of an ownership.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Ownership doesn't exist under its owner
    /// * `Err(DbError::UniqueViolation)` - scan QR already used by another ownership
    /// * `Err(DbError::ForeignKeyViolation)` - location / borrower id doesn't exist
    pub async fn save(&self, ownership: &Ownership) -> DbResult<()> {
        debug!(id = %ownership.id, "Saving ownership");

        let result = sqlx::query(
            r#"
            UPDATE ownerships SET
                custom_name = ?3,
                custom_image = ?4,
                custom_description = ?5,
                tags = ?6,
                quantity = ?7,
                scan_qr = ?8,
                location_id = ?9,
                borrower_id = ?10,
                updated_at = ?11
            WHERE id = ?1 AND owner_id = ?2
            "#,
        )
        .bind(&ownership.id)
        .bind(&ownership.owner_id)
        .bind(&ownership.custom_name)
        .bind(&ownership.custom_image)
        .bind(&ownership.custom_description)
        .bind(&ownership.tags)
        .bind(ownership.quantity)
        .bind(&ownership.scan_qr)
        .bind(&ownership.location_id)
        .bind(&ownership.borrower_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Ownership", &ownership.id));
        }

        Ok(())
    }

    /// Deletes an ownership.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - nothing was deleted
    pub async fn delete(&self, owner: &OwnerId, id: &str) -> DbResult<()> {
        debug!(owner = %owner, id = %id, "Deleting ownership");

        let result = sqlx::query("DELETE FROM ownerships WHERE id = ?1 AND owner_id = ?2")
            .bind(id)
            .bind(owner.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Ownership", id));
        }

        Ok(())
    }
}
