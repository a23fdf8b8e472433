//! Sample data for local development

use super::repos::BrandRepo;
use super::{schema, ConnectionManager, DbError};
use crate::models::NewBrand;

/// Placeholder brands inserted by `brandreg seed`.
pub const SAMPLE_BRANDS: [(&str, &str, &str); 5] = [
    ("Joshtin.dev", "justin castro", "active"),
    ("La casita de papel", "Sulays perez", "pending"),
    ("Signa", "Daniel Estrada", "inactive"),
    ("Dnamyk Solutions", "Silfredo Blanco", "active"),
    ("Visual Studio Code", "Microsoft Inc", "active"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The table already had rows and no reset was requested.
    Skipped { existing: i64 },
    /// Sample rows were inserted, after removing `cleared` rows on reset.
    Inserted { count: usize, cleared: u64 },
}

/// Validated sample payloads, in insertion order.
pub fn sample_brands() -> Result<Vec<NewBrand>, DbError> {
    SAMPLE_BRANDS
        .into_iter()
        .map(|(brand, holder, status)| {
            NewBrand::new(brand, holder, Some(status)).map_err(DbError::from)
        })
        .collect()
}

/// Insert the sample brands if the table is empty.
///
/// With `reset`, every existing row is deleted first (destructive).
pub async fn seed(store: &ConnectionManager, reset: bool) -> Result<SeedOutcome, DbError> {
    schema::init(store).await?;
    let repo = BrandRepo::new(store);

    let mut cleared = 0;
    if reset {
        cleared = repo.clear().await?;
        tracing::warn!(cleared, "cleared brands table");
    }

    let existing = repo.count().await?;
    if existing > 0 && !reset {
        tracing::info!(existing, "brands table already populated, skipping seed");
        return Ok(SeedOutcome::Skipped { existing });
    }

    let samples = sample_brands()?;
    let count = samples.len();
    for new in samples {
        repo.create(new).await?;
    }

    tracing::info!(count, "inserted sample brands");
    Ok(SeedOutcome::Inserted { count, cleared })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::isolated_store;
    use crate::models::BrandStatus;

    #[test]
    fn samples_are_valid() {
        let samples = sample_brands().unwrap();
        assert_eq!(samples.len(), 5);
        assert_eq!(samples[0].brand.as_str(), "Joshtin.dev");
        assert_eq!(samples[1].status, BrandStatus::Pending);
        assert_eq!(samples[2].status, BrandStatus::Inactive);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn seed_skips_populated_table() {
        let store = isolated_store().await;

        let first = seed(&store, false).await.unwrap();
        assert_eq!(first, SeedOutcome::Inserted { count: 5, cleared: 0 });

        let second = seed(&store, false).await.unwrap();
        assert_eq!(second, SeedOutcome::Skipped { existing: 5 });
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn reset_replaces_existing_rows() {
        let store = isolated_store().await;
        seed(&store, false).await.unwrap();

        let outcome = seed(&store, true).await.unwrap();
        assert_eq!(outcome, SeedOutcome::Inserted { count: 5, cleared: 5 });
        assert_eq!(BrandRepo::new(&store).count().await.unwrap(), 5);
    }
}
