//! Kennel unit repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use pawhotel_core::error::AppError;
use pawhotel_core::result::AppResult;
use pawhotel_entity::kennel::{AccommodationType, KennelUnit};

use crate::error::map_sqlx_error;
use crate::store::KennelInventory;

/// Repository for the `kennel_units` table.
#[derive(Debug, Clone)]
pub struct KennelRepository {
    pool: PgPool,
}

impl KennelRepository {
    /// Create a new kennel repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KennelInventory for KennelRepository {
    async fn list_kennel_units(
        &self,
        accommodation_type: Option<AccommodationType>,
    ) -> AppResult<Vec<KennelUnit>> {
        sqlx::query_as::<_, KennelUnit>(
            "SELECT * FROM kennel_units \
             WHERE ($1::accommodation_type IS NULL OR accommodation_type = $1) \
             ORDER BY accommodation_type, number",
        )
        .bind(accommodation_type)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to list kennel units", e))
    }

    async fn add_kennel_unit(&self, unit: &KennelUnit) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO kennel_units (accommodation_type, number, description, created_at) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(unit.accommodation_type)
        .bind(unit.number)
        .bind(&unit.description)
        .bind(unit.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to add kennel unit", e))?;
        Ok(())
    }

    async fn update_kennel_description(
        &self,
        accommodation_type: AccommodationType,
        number: i32,
        description: &str,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE kennel_units SET description = $3 \
             WHERE accommodation_type = $1 AND number = $2",
        )
        .bind(accommodation_type)
        .bind(number)
        .bind(description)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to update kennel description", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Kennel {accommodation_type} #{number} not found"
            )));
        }
        Ok(())
    }
}
