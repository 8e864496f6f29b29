//! Review repository.

use sqlx::PgPool;

use compparts_core::{Email, PartRef};

use super::RepositoryError;
use crate::models::Review;

/// Input for posting a review.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub author_name: String,
    pub author_email: Email,
    pub part_ref: PartRef,
    pub rating: i32,
    pub comment: String,
}

/// Repository for review operations.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all reviews, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Review>, RepositoryError> {
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT id, author_name, author_email, part_ref, rating, comment, created_at \
             FROM review ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(reviews)
    }

    /// Create a new review.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new_review: &NewReview) -> Result<Review, RepositoryError> {
        let review = sqlx::query_as::<_, Review>(
            "INSERT INTO review (author_name, author_email, part_ref, rating, comment) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, author_name, author_email, part_ref, rating, comment, created_at",
        )
        .bind(&new_review.author_name)
        .bind(&new_review.author_email)
        .bind(&new_review.part_ref)
        .bind(new_review.rating)
        .bind(&new_review.comment)
        .fetch_one(self.pool)
        .await?;

        Ok(review)
    }
}
