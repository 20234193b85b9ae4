//! Genre model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::SLUG_RE;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Genre {
    #[serde(skip)]
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// Create genre request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGenre {
    #[validate(length(min = 1, max = 256, message = "Name must be 1 to 256 characters"))]
    pub name: String,
    #[validate(
        length(min = 1, max = 50, message = "Slug must be 1 to 50 characters"),
        regex(path = *SLUG_RE, message = "Slug may only contain letters, digits, '-' and '_'")
    )]
    pub slug: String,
}

/// Genre linked to a title, as returned by the association query
#[derive(Debug, Clone, FromRow)]
pub struct TitleGenreRow {
    pub title_id: i64,
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl From<TitleGenreRow> for Genre {
    fn from(row: TitleGenreRow) -> Self {
        Genre {
            id: row.id,
            name: row.name,
            slug: row.slug,
        }
    }
}
