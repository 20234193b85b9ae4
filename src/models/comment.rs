//! Comment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Comment on a review, with the author's username
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Comment {
    pub id: i64,
    #[serde(skip)]
    pub review_id: i64,
    #[serde(skip)]
    pub author_id: i64,
    /// Author username
    pub author: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
}

/// Create comment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateComment {
    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: String,
}

/// Update comment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateComment {
    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: Option<String>,
}
