//! Review model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 10;

/// Review of a title, with the author's username
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Review {
    pub id: i64,
    #[serde(skip)]
    pub title_id: i64,
    #[serde(skip)]
    pub author_id: i64,
    /// Author username
    pub author: String,
    pub text: String,
    pub score: i32,
    pub pub_date: DateTime<Utc>,
}

/// Create review request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReview {
    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: String,
    #[validate(range(min = MIN_SCORE, max = MAX_SCORE, message = "Score must be between 0 and 10"))]
    pub score: i32,
}

/// Partial update of a review
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateReview {
    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: Option<String>,
    #[validate(range(min = MIN_SCORE, max = MAX_SCORE, message = "Score must be between 0 and 10"))]
    pub score: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(score: i32) -> CreateReview {
        CreateReview {
            text: "Worth reading".to_string(),
            score,
        }
    }

    #[test]
    fn score_bounds_are_inclusive() {
        assert!(review(MIN_SCORE).validate().is_ok());
        assert!(review(MAX_SCORE).validate().is_ok());
        assert!(review(MIN_SCORE - 1).validate().is_err());
        assert!(review(MAX_SCORE + 1).validate().is_err());
    }

    #[test]
    fn empty_text_is_rejected() {
        let data = CreateReview {
            text: String::new(),
            score: 5,
        };
        let errors = data.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("text"));
    }

    #[test]
    fn partial_update_checks_present_fields_only() {
        assert!(UpdateReview::default().validate().is_ok());
        let data = UpdateReview {
            text: None,
            score: Some(11),
        };
        assert!(data.validate().is_err());
    }
}
