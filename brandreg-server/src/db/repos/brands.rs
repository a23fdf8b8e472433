//! Brand repository
//!
//! Every statement is parameterized and goes through
//! [`ConnectionManager::run`]. Rows are decoded by name into [`Brand`].

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

use crate::db::{ConnectionManager, DbError};
use crate::models::{BrandChanges, BrandFields, BrandStatus, NewBrand, Paginated, Pagination};

/// Brand record from database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brand {
    pub id: i64,
    pub brand: String,
    pub holder: String,
    pub status: BrandStatus,
    pub created_at: DateTime<Utc>,
}

impl Brand {
    /// The user-editable part of the record.
    pub fn fields(&self) -> BrandFields {
        BrandFields {
            brand: self.brand.clone(),
            holder: self.holder.clone(),
            status: self.status,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for Brand {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<BrandStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: row.try_get("id")?,
            brand: row.try_get("brand")?,
            holder: row.try_get("holder")?,
            status,
            created_at: row.try_get("created_at")?,
        })
    }
}

fn not_found(id: i64) -> DbError {
    DbError::NotFound {
        resource: "brand",
        id: id.to_string(),
    }
}

/// Brand repository
pub struct BrandRepo<'a> {
    store: &'a ConnectionManager,
}

impl<'a> BrandRepo<'a> {
    pub fn new(store: &'a ConnectionManager) -> Self {
        Self { store }
    }

    /// Insert a brand and return it with its generated id and timestamp.
    pub async fn create(&self, new: NewBrand) -> Result<Brand, DbError> {
        let fields = &new.into_fields();

        let brand = self
            .store
            .run(move |pool| async move {
                sqlx::query_as::<_, Brand>(
                    r#"
                    INSERT INTO brands (brand, holder, status)
                    VALUES ($1, $2, $3)
                    RETURNING id, brand, holder, status, created_at
                    "#,
                )
                .bind(fields.brand.as_str())
                .bind(fields.holder.as_str())
                .bind(fields.status.as_str())
                .fetch_one(&pool)
                .await
            })
            .await?;

        tracing::debug!(id = brand.id, "brand created");
        Ok(brand)
    }

    /// List brands in ascending id order.
    ///
    /// Issues a COUNT and a page SELECT; the two are not isolated from
    /// concurrent writers.
    pub async fn list(&self, page: Pagination) -> Result<Paginated<Brand>, DbError> {
        let total = self.count().await?;

        let items = self
            .store
            .run(move |pool| async move {
                sqlx::query_as::<_, Brand>(
                    r#"
                    SELECT id, brand, holder, status, created_at
                    FROM brands
                    ORDER BY id ASC
                    LIMIT $1 OFFSET $2
                    "#,
                )
                .bind(page.limit())
                .bind(page.offset())
                .fetch_all(&pool)
                .await
            })
            .await?;

        Ok(Paginated::new(items, total, page))
    }

    /// Get a single brand by id.
    pub async fn get(&self, id: i64) -> Result<Brand, DbError> {
        self.store
            .run(move |pool| async move {
                sqlx::query_as::<_, Brand>(
                    r#"
                    SELECT id, brand, holder, status, created_at
                    FROM brands
                    WHERE id = $1
                    "#,
                )
                .bind(id)
                .fetch_optional(&pool)
                .await
            })
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Overlay `changes` on the stored record and write all three
    /// mutable fields back.
    pub async fn update(&self, id: i64, changes: BrandChanges) -> Result<Brand, DbError> {
        let current = self.get(id).await?;
        let fields = &changes.merge(current.fields());

        let brand = self
            .store
            .run(move |pool| async move {
                sqlx::query_as::<_, Brand>(
                    r#"
                    UPDATE brands
                    SET brand = $1, holder = $2, status = $3
                    WHERE id = $4
                    RETURNING id, brand, holder, status, created_at
                    "#,
                )
                .bind(fields.brand.as_str())
                .bind(fields.holder.as_str())
                .bind(fields.status.as_str())
                .bind(id)
                .fetch_optional(&pool)
                .await
            })
            .await?
            // deleted between the fetch and the write
            .ok_or_else(|| not_found(id))?;

        tracing::debug!(id, "brand updated");
        Ok(brand)
    }

    /// Delete a brand permanently.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        self.store
            .run(move |pool| async move {
                sqlx::query_scalar::<_, i64>("DELETE FROM brands WHERE id = $1 RETURNING id")
                    .bind(id)
                    .fetch_optional(&pool)
                    .await
            })
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::debug!(id, "brand deleted");
        Ok(())
    }

    /// Total number of brands.
    pub async fn count(&self) -> Result<i64, DbError> {
        self.store
            .run(|pool| async move {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM brands")
                    .fetch_one(&pool)
                    .await
            })
            .await
    }

    /// Delete every brand, returning how many rows were removed.
    pub async fn clear(&self) -> Result<u64, DbError> {
        let result = self
            .store
            .run(|pool| async move { sqlx::query("DELETE FROM brands").execute(&pool).await })
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;
    use crate::db::seed::{seed, SeedOutcome};
    use crate::db::testing::isolated_store;

    // Integration tests - run with DATABASE_URL and DATABASE_AUTH_TOKEN set
    // cargo test -p brandreg-server -- --ignored

    fn new_brand(brand: &str, status: Option<&str>) -> NewBrand {
        NewBrand::new(brand, "Test Holder", status).unwrap()
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_defaults_to_pending() {
        let store = isolated_store().await;
        let repo = BrandRepo::new(&store);

        let created = repo.create(new_brand("Signa", None)).await.unwrap();
        assert_eq!(created.status, BrandStatus::Pending);
        assert_eq!(created.brand, "Signa");
        assert_eq!(created.holder, "Test Holder");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn get_matches_created_record() {
        let store = isolated_store().await;
        let repo = BrandRepo::new(&store);

        let created = repo.create(new_brand("Signa", Some("active"))).await.unwrap();
        let fetched = repo.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn list_first_page_of_samples() {
        let store = isolated_store().await;
        assert!(matches!(
            seed(&store, false).await.unwrap(),
            SeedOutcome::Inserted { count: 5, .. }
        ));

        let page = BrandRepo::new(&store)
            .list(Pagination::new(1, 5))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn list_second_page_in_id_order() {
        let store = isolated_store().await;
        seed(&store, false).await.unwrap();
        let repo = BrandRepo::new(&store);

        let all = repo.list(Pagination::new(1, 100)).await.unwrap().items;
        let page = repo.list(Pagination::new(2, 2)).await.unwrap();

        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, all[2..4].to_vec());
        assert!(page.items[0].id < page.items[1].id);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn list_clamps_out_of_range_params() {
        let store = isolated_store().await;
        seed(&store, false).await.unwrap();

        let page = BrandRepo::new(&store)
            .list(Pagination::new(0, 1000))
            .await
            .unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 100);
        assert_eq!(page.items.len(), 5);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_status_only() {
        let store = isolated_store().await;
        let repo = BrandRepo::new(&store);
        let created = repo.create(new_brand("Signa", None)).await.unwrap();

        let changes = BrandChanges::new(None, None, Some("inactive")).unwrap();
        let updated = repo.update(created.id, changes).await.unwrap();

        assert_eq!(updated.status, BrandStatus::Inactive);
        assert_eq!(updated.brand, created.brand);
        assert_eq!(updated.holder, created.holder);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn empty_update_rewrites_identical_values() {
        let store = isolated_store().await;
        let repo = BrandRepo::new(&store);
        let created = repo.create(new_brand("Signa", Some("active"))).await.unwrap();

        let updated = repo.update(created.id, BrandChanges::default()).await.unwrap();
        assert_eq!(updated, created);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn missing_id_is_not_found() {
        let store = isolated_store().await;
        let repo = BrandRepo::new(&store);

        assert!(repo.get(9999).await.unwrap_err().is_not_found());
        assert!(repo
            .update(9999, BrandChanges::default())
            .await
            .unwrap_err()
            .is_not_found());
        assert!(repo.delete(9999).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn deleted_brand_is_gone() {
        let store = isolated_store().await;
        let repo = BrandRepo::new(&store);
        let created = repo.create(new_brand("Signa", None)).await.unwrap();

        repo.delete(created.id).await.unwrap();
        assert!(repo.get(created.id).await.unwrap_err().is_not_found());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn concurrent_creates_get_distinct_ids() {
        let store = Arc::new(isolated_store().await);

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    BrandRepo::new(&store)
                        .create(new_brand(&format!("Brand {}", i), None))
                        .await
                        .expect("concurrent create failed")
                        .id
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.expect("task panicked"));
        }
        assert_eq!(ids.len(), 10);
    }
}
