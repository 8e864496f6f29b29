//! Payment repository.

use rust_decimal::Decimal;
use sqlx::PgPool;

use compparts_core::Email;

use super::RepositoryError;
use crate::models::Payment;

/// Repository for append-only payment records.
pub struct PaymentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PaymentRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List payments made by one buyer, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_buyer(&self, buyer: &Email) -> Result<Vec<Payment>, RepositoryError> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT id, buyer_email, amount, transaction_ref, paid_at \
             FROM payment WHERE buyer_email = $1 ORDER BY paid_at DESC",
        )
        .bind(buyer)
        .fetch_all(self.pool)
        .await?;

        Ok(payments)
    }

    /// Record a confirmed payment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        buyer: &Email,
        amount: Decimal,
        transaction_ref: &str,
    ) -> Result<Payment, RepositoryError> {
        let payment = sqlx::query_as::<_, Payment>(
            "INSERT INTO payment (buyer_email, amount, transaction_ref) \
             VALUES ($1, $2, $3) \
             RETURNING id, buyer_email, amount, transaction_ref, paid_at",
        )
        .bind(buyer)
        .bind(amount)
        .bind(transaction_ref)
        .fetch_one(self.pool)
        .await?;

        Ok(payment)
    }
}
