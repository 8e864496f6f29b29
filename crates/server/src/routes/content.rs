//! Editorial content handlers.

use axum::{Json, extract::State};

use crate::db::ContentRepository;
use crate::error::Result;
use crate::models::{BuildGuide, TechNewsItem};
use crate::state::AppState;

/// List tech news items.
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn tech_news(State(state): State<AppState>) -> Result<Json<Vec<TechNewsItem>>> {
    let items = ContentRepository::new(state.pool()).list_tech_news().await?;
    Ok(Json(items))
}

/// List build guides.
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn build_guides(State(state): State<AppState>) -> Result<Json<Vec<BuildGuide>>> {
    let guides = ContentRepository::new(state.pool())
        .list_build_guides()
        .await?;
    Ok(Json(guides))
}
