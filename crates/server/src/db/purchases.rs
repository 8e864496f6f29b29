//! Purchase repository.

use sqlx::PgPool;

use compparts_core::{Email, PartRef, PurchaseId};

use super::RepositoryError;
use crate::models::PurchasedPart;

/// Input for recording a purchase.
#[derive(Debug, Clone)]
pub struct NewPurchase {
    pub buyer_email: Email,
    pub buyer_name: String,
    pub part_ref: PartRef,
    pub quantity: i32,
    pub address: String,
    pub phone: String,
}

/// Repository for purchase records.
pub struct PurchaseRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PurchaseRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List purchases made by one buyer, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_buyer(&self, buyer: &Email) -> Result<Vec<PurchasedPart>, RepositoryError> {
        let purchases = sqlx::query_as::<_, PurchasedPart>(
            "SELECT id, buyer_email, buyer_name, part_ref, quantity, address, phone, created_at \
             FROM purchased_part WHERE buyer_email = $1 ORDER BY created_at ASC",
        )
        .bind(buyer)
        .fetch_all(self.pool)
        .await?;

        Ok(purchases)
    }

    /// Record a purchase.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including a
    /// non-positive quantity rejected by the store's check constraint).
    pub async fn create(&self, new_purchase: &NewPurchase) -> Result<PurchasedPart, RepositoryError> {
        let purchase = sqlx::query_as::<_, PurchasedPart>(
            "INSERT INTO purchased_part (buyer_email, buyer_name, part_ref, quantity, address, phone) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, buyer_email, buyer_name, part_ref, quantity, address, phone, created_at",
        )
        .bind(&new_purchase.buyer_email)
        .bind(&new_purchase.buyer_name)
        .bind(&new_purchase.part_ref)
        .bind(new_purchase.quantity)
        .bind(&new_purchase.address)
        .bind(&new_purchase.phone)
        .fetch_one(self.pool)
        .await?;

        Ok(purchase)
    }

    /// Delete a purchase by id (cancellation).
    ///
    /// # Returns
    ///
    /// The number of rows deleted. Deleting an id that matches nothing is a
    /// zero-effect success, not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: PurchaseId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM purchased_part WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
