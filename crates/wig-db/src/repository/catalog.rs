//! # Catalog Repository
//!
//! The local cache of barcode metadata. Keyed globally by barcode,
//! shared by every owner.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use wig_core::CatalogItem;

/// Repository for the shared catalog.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Gets a catalog item by barcode.
    pub async fn find(&self, barcode: &str) -> DbResult<Option<CatalogItem>> {
        let item = sqlx::query_as::<_, CatalogItem>(
            r#"
            SELECT barcode, name, brand, image_url
            FROM catalog_items
            WHERE barcode = ?1
            "#,
        )
        .bind(barcode)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Stores a freshly fetched item, replacing any previous copy of it.
    pub async fn upsert(&self, item: &CatalogItem) -> DbResult<()> {
        debug!(barcode = %item.barcode, "Storing catalog item");

        sqlx::query(
            r#"
            INSERT INTO catalog_items (barcode, name, brand, image_url, fetched_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (barcode) DO UPDATE SET
                name = excluded.name,
                brand = excluded.brand,
                image_url = excluded.image_url,
                fetched_at = excluded.fetched_at
            "#,
        )
        .bind(&item.barcode)
        .bind(&item.name)
        .bind(&item.brand)
        .bind(&item.image_url)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Counts cached catalog items (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM catalog_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
