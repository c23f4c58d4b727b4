//! # Borrower Repository
//!
//! Borrowers are created and listed per owner. They are never updated
//! or deleted here.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use super::generate_id;
use crate::error::DbResult;
use wig_core::{Borrower, OwnerId};

/// Repository for borrower database operations.
#[derive(Debug, Clone)]
pub struct BorrowerRepository {
    pool: SqlitePool,
}

impl BorrowerRepository {
    /// Creates a new BorrowerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BorrowerRepository { pool }
    }

    /// Gets a borrower by ID, scoped to its owner.
    pub async fn find_by_id(&self, owner: &OwnerId, id: &str) -> DbResult<Option<Borrower>> {
        let borrower = sqlx::query_as::<_, Borrower>(
            r#"
            SELECT id, owner_id, name, created_at
            FROM borrowers
            WHERE id = ?1 AND owner_id = ?2
            "#,
        )
        .bind(id)
        .bind(owner.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(borrower)
    }

    /// Gets a borrower by name, scoped to its owner.
    pub async fn find_by_name(&self, owner: &OwnerId, name: &str) -> DbResult<Option<Borrower>> {
        let borrower = sqlx::query_as::<_, Borrower>(
            r#"
            SELECT id, owner_id, name, created_at
            FROM borrowers
            WHERE name = ?1 AND owner_id = ?2
            "#,
        )
        .bind(name)
        .bind(owner.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(borrower)
    }

    /// Lists all borrowers of an owner, ordered by name.
    pub async fn list(&self, owner: &OwnerId) -> DbResult<Vec<Borrower>> {
        let borrowers = sqlx::query_as::<_, Borrower>(
            r#"
            SELECT id, owner_id, name, created_at
            FROM borrowers
            WHERE owner_id = ?1
            ORDER BY name
            "#,
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await?;

        debug!(owner = %owner, count = borrowers.len(), "Listed borrowers");
        Ok(borrowers)
    }

    /// Inserts a new borrower.
    ///
    /// ## Returns
    /// * `Ok(Borrower)` - Inserted borrower with generated id
    /// * `Err(DbError::UniqueViolation)` - `(owner_id, name)` already exists
    pub async fn create(&self, owner: &OwnerId, name: &str) -> DbResult<Borrower> {
        let borrower = Borrower {
            id: generate_id(),
            owner_id: owner.as_str().to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };

        debug!(owner = %owner, name = %name, "Inserting borrower");

        sqlx::query(
            r#"
            INSERT INTO borrowers (id, owner_id, name, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&borrower.id)
        .bind(&borrower.owner_id)
        .bind(&borrower.name)
        .bind(borrower.created_at)
        .execute(&self.pool)
        .await?;

        Ok(borrower)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use wig_core::OwnerId;

    #[tokio::test]
    async fn test_create_and_find() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = OwnerId::from("owner-1");

        let created = db.borrowers().create(&owner, "Alice").await.unwrap();

        let by_id = db.borrowers().find_by_id(&owner, &created.id).await.unwrap();
        assert_eq!(by_id.unwrap().name, "Alice");

        let by_name = db.borrowers().find_by_name(&owner, "Alice").await.unwrap();
        assert_eq!(by_name.unwrap().id, created.id);
    }

    #[tokio::test]
    async fn test_lookups_are_owner_scoped() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = OwnerId::from("owner-1");
        let other = OwnerId::from("owner-2");

        let created = db.borrowers().create(&owner, "Alice").await.unwrap();

        assert!(db.borrowers().find_by_id(&other, &created.id).await.unwrap().is_none());
        assert!(db.borrowers().list(&other).await.unwrap().is_empty());
        // same name is fine under another owner
        db.borrowers().create(&other, "Alice").await.unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_name_is_unique_violation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = OwnerId::from("owner-1");

        db.borrowers().create(&owner, "Alice").await.unwrap();
        let err = db.borrowers().create(&owner, "Alice").await.unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert!(err.violates_column("name"));
        assert_eq!(db.borrowers().list(&owner).await.unwrap().len(), 1);
    }
}
