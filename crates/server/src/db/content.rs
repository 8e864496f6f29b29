//! Editorial content repository.
//!
//! Tech news and build guides are read-only at the API surface; the bulk
//! insert methods exist for the CLI seed command.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::{BuildGuide, TechNewsItem};

/// Input for seeding a tech news item.
#[derive(Debug, Clone)]
pub struct NewTechNewsItem {
    pub title: String,
    pub summary: String,
    pub body: String,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
}

/// Input for seeding a build guide.
#[derive(Debug, Clone)]
pub struct NewBuildGuide {
    pub title: String,
    pub description: String,
    pub total_budget: Decimal,
    pub image_url: Option<String>,
}

/// Repository for read-only editorial content.
pub struct ContentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContentRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all tech news items, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_tech_news(&self) -> Result<Vec<TechNewsItem>, RepositoryError> {
        let items = sqlx::query_as::<_, TechNewsItem>(
            "SELECT id, title, summary, body, image_url, published_at \
             FROM tech_news ORDER BY published_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// List all build guides.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_build_guides(&self) -> Result<Vec<BuildGuide>, RepositoryError> {
        let guides = sqlx::query_as::<_, BuildGuide>(
            "SELECT id, title, description, total_budget, image_url, created_at \
             FROM build_guide ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(guides)
    }

    /// Bulk-insert tech news items (seed only).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails.
    pub async fn insert_tech_news(
        &self,
        items: &[NewTechNewsItem],
    ) -> Result<u64, RepositoryError> {
        let mut inserted = 0;
        for item in items {
            let result = sqlx::query(
                "INSERT INTO tech_news (title, summary, body, image_url, published_at) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(&item.title)
            .bind(&item.summary)
            .bind(&item.body)
            .bind(&item.image_url)
            .bind(item.published_at)
            .execute(self.pool)
            .await?;
            inserted += result.rows_affected();
        }

        Ok(inserted)
    }

    /// Bulk-insert build guides (seed only).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails.
    pub async fn insert_build_guides(
        &self,
        guides: &[NewBuildGuide],
    ) -> Result<u64, RepositoryError> {
        let mut inserted = 0;
        for guide in guides {
            let result = sqlx::query(
                "INSERT INTO build_guide (title, description, total_budget, image_url) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(&guide.title)
            .bind(&guide.description)
            .bind(guide.total_budget)
            .bind(&guide.image_url)
            .execute(self.pool)
            .await?;
            inserted += result.rows_affected();
        }

        Ok(inserted)
    }
}
