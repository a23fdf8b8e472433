//! Schema bootstrap for the brands table

use super::{ConnectionManager, DbError};

/// Create the brands table if it does not exist.
pub async fn init(store: &ConnectionManager) -> Result<(), DbError> {
    tracing::info!("Ensuring brands schema...");

    store
        .run(|pool| async move {
            sqlx::query(
                r#"
                CREATE TABLE IF NOT EXISTS brands (
                    id BIGSERIAL PRIMARY KEY,
                    brand TEXT NOT NULL CHECK (brand <> ''),
                    holder TEXT NOT NULL CHECK (holder <> ''),
                    status TEXT NOT NULL DEFAULT 'pending'
                        CHECK (status IN ('active', 'pending', 'inactive')),
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#,
            )
            .execute(&pool)
            .await
        })
        .await?;

    Ok(())
}
