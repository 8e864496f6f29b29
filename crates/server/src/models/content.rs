//! Read-only editorial content.
//!
//! Tech news and build guides have no lifecycle beyond the bulk load done by
//! the CLI seed command.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use compparts_core::{BuildGuideId, TechNewsId};

/// A tech news item.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TechNewsItem {
    pub id: TechNewsId,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
}

/// A curated PC build guide.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BuildGuide {
    pub id: BuildGuideId,
    pub title: String,
    pub description: String,
    /// Suggested total budget for the build, store currency.
    pub total_budget: Decimal,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
