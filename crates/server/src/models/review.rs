//! Customer review.

use chrono::{DateTime, Utc};
use serde::Serialize;

use compparts_core::{Email, PartRef, ReviewId};

/// A customer review of a catalog part.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Unique review ID.
    pub id: ReviewId,
    /// Reviewer display name.
    pub author_name: String,
    /// Reviewer email.
    pub author_email: Email,
    /// Loose reference to the reviewed part. Never resolved or joined.
    #[serde(rename = "partId")]
    pub part_ref: PartRef,
    /// Rating, 1-5.
    pub rating: i32,
    /// Free-text comment.
    pub comment: String,
    /// When the review was posted.
    pub created_at: DateTime<Utc>,
}
