//! Part repository for catalog database operations.

use sqlx::PgPool;
use uuid::Uuid;

use compparts_core::{PartId, UnitPrice};

use super::RepositoryError;
use crate::models::Part;

/// Input for creating a catalog part.
#[derive(Debug, Clone)]
pub struct NewPart {
    pub name: String,
    pub brand: String,
    pub price_per_unit: UnitPrice,
    pub specs: serde_json::Value,
    pub available_quantity: i32,
    pub image_url: Option<String>,
}

/// Repository for catalog part operations.
pub struct PartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PartRepository<'a> {
    /// Create a new part repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List catalog parts, optionally filtered by brand.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, brand: Option<&str>) -> Result<Vec<Part>, RepositoryError> {
        let parts = match brand {
            Some(brand) => {
                sqlx::query_as::<_, Part>(
                    "SELECT id, name, brand, price_per_unit, specs, available_quantity, \
                     image_url, created_at \
                     FROM part WHERE brand = $1 ORDER BY created_at DESC",
                )
                .bind(brand)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Part>(
                    "SELECT id, name, brand, price_per_unit, specs, available_quantity, \
                     image_url, created_at \
                     FROM part ORDER BY created_at DESC",
                )
                .fetch_all(self.pool)
                .await?
            }
        };

        Ok(parts)
    }

    /// Fetch the parts whose ids appear in `ids`.
    ///
    /// Missing ids are simply absent from the result; the aggregator treats
    /// that as an inner join.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn by_ids(&self, ids: &[PartId]) -> Result<Vec<Part>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw: Vec<Uuid> = ids.iter().map(|id| id.as_uuid()).collect();
        let parts = sqlx::query_as::<_, Part>(
            "SELECT id, name, brand, price_per_unit, specs, available_quantity, \
             image_url, created_at \
             FROM part WHERE id = ANY($1)",
        )
        .bind(raw)
        .fetch_all(self.pool)
        .await?;

        Ok(parts)
    }

    /// Create a new catalog part.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new_part: &NewPart) -> Result<Part, RepositoryError> {
        let part = sqlx::query_as::<_, Part>(
            "INSERT INTO part (name, brand, price_per_unit, specs, available_quantity, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, name, brand, price_per_unit, specs, available_quantity, \
                       image_url, created_at",
        )
        .bind(&new_part.name)
        .bind(&new_part.brand)
        .bind(new_part.price_per_unit)
        .bind(&new_part.specs)
        .bind(new_part.available_quantity)
        .bind(&new_part.image_url)
        .fetch_one(self.pool)
        .await?;

        Ok(part)
    }

    /// Delete a part by id.
    ///
    /// # Returns
    ///
    /// Returns `true` if a row was deleted, `false` if the id matched
    /// nothing. Related purchases are untouched either way.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: PartId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM part WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
