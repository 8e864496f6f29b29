//! Review handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::{Deserialize, Deserializer, de};

use compparts_core::{Email, PartRef};

use crate::db::ReviewRepository;
use crate::db::reviews::NewReview;
use crate::error::{AppError, Result};
use crate::models::Review;
use crate::state::AppState;

/// Request body for posting a review.
///
/// Clients send the rating as a number or a numeric string; it is coerced
/// to an integer here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub author_name: String,
    pub author_email: String,
    #[serde(rename = "partId")]
    pub part_ref: String,
    #[serde(deserialize_with = "coerce_rating")]
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}

/// Accept a rating as an integer, float, or numeric string.
#[allow(clippy::cast_possible_truncation)] // truncation bounds-checked below
fn coerce_rating<'de, D>(deserializer: D) -> std::result::Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let number = match &value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    number
        .map(f64::trunc)
        .filter(|f| (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(f))
        .map(|f| f as i32)
        .ok_or_else(|| de::Error::custom(format!("rating must be numeric, got {value}")))
}

/// List all reviews.
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Review>>> {
    let reviews = ReviewRepository::new(state.pool()).list().await?;
    Ok(Json(reviews))
}

/// Post a review.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for an invalid email or a rating outside
/// 1-5.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Review>)> {
    let author_email = Email::parse(&body.author_email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    if !(1..=5).contains(&body.rating) {
        return Err(AppError::BadRequest(format!(
            "rating must be between 1 and 5, got {}",
            body.rating
        )));
    }

    let review = ReviewRepository::new(state.pool())
        .create(&NewReview {
            author_name: body.author_name,
            author_email,
            part_ref: PartRef::new(body.part_ref),
            rating: body.rating,
            comment: body.comment,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(review)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(body: &str) -> std::result::Result<CreateReviewRequest, serde_json::Error> {
        serde_json::from_str(body)
    }

    #[test]
    fn test_rating_accepts_integer() {
        let req = parse(
            r#"{"authorName":"A","authorEmail":"a@b.c","partId":"x","rating":4,"comment":"ok"}"#,
        )
        .unwrap();
        assert_eq!(req.rating, 4);
    }

    #[test]
    fn test_rating_coerces_float() {
        let req = parse(
            r#"{"authorName":"A","authorEmail":"a@b.c","partId":"x","rating":4.7,"comment":""}"#,
        )
        .unwrap();
        assert_eq!(req.rating, 4);
    }

    #[test]
    fn test_rating_coerces_numeric_string() {
        let req = parse(
            r#"{"authorName":"A","authorEmail":"a@b.c","partId":"x","rating":"5","comment":""}"#,
        )
        .unwrap();
        assert_eq!(req.rating, 5);
    }

    #[test]
    fn test_rating_rejects_non_numeric() {
        assert!(
            parse(
                r#"{"authorName":"A","authorEmail":"a@b.c","partId":"x","rating":"great","comment":""}"#,
            )
            .is_err()
        );
    }
}
