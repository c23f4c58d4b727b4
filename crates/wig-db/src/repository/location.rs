//! # Location Repository
//!
//! Database operations for locations and their containment pointers.
//!
//! ## Containment Walk
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ancestors(owner, "bin-a")                                              │
//! │                                                                         │
//! │  bin-a ──container──► shelf ──container──► garage ──► (none)           │
//! │    depth 0              depth 1              depth 2                    │
//! │                                                                         │
//! │  Result: ["shelf", "garage"]   (nearest first, start excluded)         │
//! │                                                                         │
//! │  A recursive CTE walks the chain; the depth bound guarantees           │
//! │  termination even if a cycle already exists in stored data.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use super::generate_id;
use crate::error::{DbError, DbResult};
use wig_core::{Location, LocationKind, OwnerId};

/// Upper bound on the containment chain walked by [`LocationRepository::ancestors`].
pub const MAX_CONTAINMENT_DEPTH: i64 = 1024;

const SELECT_LOCATION: &str = r#"
    SELECT id, owner_id, name, kind, qr_code, container_id,
           description, tags, created_at, updated_at
    FROM locations
"#;

/// Repository for location database operations.
#[derive(Debug, Clone)]
pub struct LocationRepository {
    pool: SqlitePool,
}

impl LocationRepository {
    /// Creates a new LocationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LocationRepository { pool }
    }

    /// Gets a location by ID, scoped to its owner.
    pub async fn find_by_id(&self, owner: &OwnerId, id: &str) -> DbResult<Option<Location>> {
        let sql = format!("{SELECT_LOCATION} WHERE id = ?1 AND owner_id = ?2");
        let location = sqlx::query_as::<_, Location>(&sql)
            .bind(id)
            .bind(owner.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(location)
    }

    /// Gets a location by its QR code, scoped to its owner.
    pub async fn find_by_qr(&self, owner: &OwnerId, qr: &str) -> DbResult<Option<Location>> {
        let sql = format!("{SELECT_LOCATION} WHERE qr_code = ?1 AND owner_id = ?2");
        let location = sqlx::query_as::<_, Location>(&sql)
            .bind(qr)
            .bind(owner.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(location)
    }

    /// Gets a location by its name, scoped to its owner.
    pub async fn find_by_name(&self, owner: &OwnerId, name: &str) -> DbResult<Option<Location>> {
        let sql = format!("{SELECT_LOCATION} WHERE name = ?1 AND owner_id = ?2");
        let location = sqlx::query_as::<_, Location>(&sql)
            .bind(name)
            .bind(owner.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(location)
    }

    /// Lists all locations of an owner, ordered by name.
    pub async fn list(&self, owner: &OwnerId) -> DbResult<Vec<Location>> {
        let sql = format!("{SELECT_LOCATION} WHERE owner_id = ?1 ORDER BY name");
        let locations = sqlx::query_as::<_, Location>(&sql)
            .bind(owner.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok(locations)
    }

    /// Returns the container chain above `id`, nearest first.
    ///
    /// `id` itself is not included. Unknown ids yield an empty chain.
    pub async fn ancestors(&self, owner: &OwnerId, id: &str) -> DbResult<Vec<String>> {
        let ids: Vec<String> = sqlx::query_scalar(
            r#"
            WITH RECURSIVE chain (id, container_id, depth) AS (
                SELECT id, container_id, 0
                FROM locations
                WHERE id = ?1 AND owner_id = ?2
                UNION ALL
                SELECT l.id, l.container_id, c.depth + 1
                FROM locations l
                JOIN chain c ON l.id = c.container_id
                WHERE l.owner_id = ?2 AND c.depth < ?3
            )
            SELECT id FROM chain WHERE depth > 0 ORDER BY depth
            "#,
        )
        .bind(id)
        .bind(owner.as_str())
        .bind(MAX_CONTAINMENT_DEPTH)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    /// Inserts a new top-level location.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - `(owner_id, qr_code)` or `(owner_id, name)` taken
    pub async fn create(
        &self,
        owner: &OwnerId,
        qr: &str,
        name: &str,
        kind: LocationKind,
    ) -> DbResult<Location> {
        let now = Utc::now();
        let location = Location {
            id: generate_id(),
            owner_id: owner.as_str().to_string(),
            name: name.to_string(),
            kind,
            qr_code: qr.to_string(),
            container_id: None,
            description: String::new(),
            tags: String::new(),
            created_at: now,
            updated_at: now,
        };

        debug!(owner = %owner, qr = %qr, name = %name, kind = %kind, "Inserting location");

        sqlx::query(
            r#"
            INSERT INTO locations (
                id, owner_id, name, kind, qr_code, container_id,
                description, tags, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&location.id)
        .bind(&location.owner_id)
        .bind(&location.name)
        .bind(location.kind)
        .bind(&location.qr_code)
        .bind(&location.container_id)
        .bind(&location.description)
        .bind(&location.tags)
        .bind(location.created_at)
        .bind(location.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(location)
    }

    /// Persists the mutable fields of a location (name, description, tags, container).
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Location doesn't exist under its owner
    /// * `Err(DbError::UniqueViolation)` - Renamed onto a name already in use
    pub async fn save(&self, location: &Location) -> DbResult<()> {
        debug!(id = %location.id, "Saving location");

        let result = sqlx::query(
            r#"
            UPDATE locations SET
                name = ?3,
                container_id = ?4,
                description = ?5,
                tags = ?6,
                updated_at = ?7
            WHERE id = ?1 AND owner_id = ?2
            "#,
        )
        .bind(&location.id)
        .bind(&location.owner_id)
        .bind(&location.name)
        .bind(&location.container_id)
        .bind(&location.description)
        .bind(&location.tags)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Location", &location.id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use wig_core::{LocationKind, OwnerId};

    async fn setup() -> (Database, OwnerId) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        (db, OwnerId::from("owner-1"))
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let (db, owner) = setup().await;

        let created = db
            .locations()
            .create(&owner, "QR-1", "Garage", LocationKind::Location)
            .await
            .unwrap();
        assert!(created.container_id.is_none());

        let by_qr = db.locations().find_by_qr(&owner, "QR-1").await.unwrap().unwrap();
        assert_eq!(by_qr.id, created.id);
        assert_eq!(by_qr.kind, LocationKind::Location);

        let by_name = db.locations().find_by_name(&owner, "Garage").await.unwrap();
        assert!(by_name.is_some());

        let other = OwnerId::from("owner-2");
        assert!(db.locations().find_by_qr(&other, "QR-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unique_constraints() {
        let (db, owner) = setup().await;
        let repo = db.locations();

        repo.create(&owner, "QR-1", "Garage", LocationKind::Location)
            .await
            .unwrap();

        let err = repo
            .create(&owner, "QR-1", "Shed", LocationKind::Bin)
            .await
            .unwrap_err();
        assert!(err.violates_column("qr_code"));

        let err = repo
            .create(&owner, "QR-2", "Garage", LocationKind::Bin)
            .await
            .unwrap_err();
        assert!(err.violates_column("name"));

        assert_eq!(repo.list(&owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ancestors_nearest_first() {
        let (db, owner) = setup().await;
        let repo = db.locations();

        let garage = repo.create(&owner, "Q1", "Garage", LocationKind::Location).await.unwrap();
        let mut shelf = repo.create(&owner, "Q2", "Shelf", LocationKind::Location).await.unwrap();
        let mut bin = repo.create(&owner, "Q3", "Bin", LocationKind::Bin).await.unwrap();

        shelf.container_id = Some(garage.id.clone());
        repo.save(&shelf).await.unwrap();
        bin.container_id = Some(shelf.id.clone());
        repo.save(&bin).await.unwrap();

        let chain = repo.ancestors(&owner, &bin.id).await.unwrap();
        assert_eq!(chain, vec![shelf.id.clone(), garage.id.clone()]);

        assert!(repo.ancestors(&owner, &garage.id).await.unwrap().is_empty());
        assert!(repo.ancestors(&owner, "missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_missing_location_is_not_found() {
        let (db, owner) = setup().await;
        let repo = db.locations();

        let mut loc = repo.create(&owner, "Q1", "Garage", LocationKind::Location).await.unwrap();
        loc.owner_id = "someone-else".to_string();

        let err = repo.save(&loc).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_store_rejects_self_containment() {
        let (db, owner) = setup().await;
        let repo = db.locations();

        let mut loc = repo.create(&owner, "Q1", "Garage", LocationKind::Location).await.unwrap();
        loc.container_id = Some(loc.id.clone());

        let err = repo.save(&loc).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));
    }
}
