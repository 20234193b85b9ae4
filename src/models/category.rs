//! Category model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::SLUG_RE;

/// Category a title belongs to (book, film, music...)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Category {
    #[serde(skip)]
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// Create category request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 256, message = "Name must be 1 to 256 characters"))]
    pub name: String,
    #[validate(
        length(min = 1, max = 50, message = "Slug must be 1 to 50 characters"),
        regex(path = *SLUG_RE, message = "Slug may only contain letters, digits, '-' and '_'")
    )]
    pub slug: String,
}
