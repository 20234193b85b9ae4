//! Title (reviewable work) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{category::Category, genre::Genre, Page};

/// Title as stored, joined with its category and review totals
#[derive(Debug, Clone, FromRow)]
pub struct TitleRow {
    pub id: i64,
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
    /// Number of reviews on the title
    pub review_count: i64,
    /// Sum of review scores, NULL when there are no reviews
    pub score_sum: Option<i64>,
}

impl TitleRow {
    pub fn category(&self) -> Option<Category> {
        match (self.category_id, &self.category_name, &self.category_slug) {
            (Some(id), Some(name), Some(slug)) => Some(Category {
                id,
                name: name.clone(),
                slug: slug.clone(),
            }),
            _ => None,
        }
    }
}

/// Title row together with its genres
#[derive(Debug, Clone)]
pub struct TitleRecord {
    pub row: TitleRow,
    pub genres: Vec<Genre>,
}

/// Title read model
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Title {
    pub id: i64,
    pub name: String,
    pub year: i32,
    /// Mean review score, null while the title has no reviews
    pub rating: Option<f64>,
    pub description: Option<String>,
    pub genre: Vec<Genre>,
    pub category: Option<Category>,
}

/// Create title request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTitle {
    #[validate(length(min = 1, max = 256, message = "Name must be 1 to 256 characters"))]
    pub name: String,
    /// Release year, not after the current year
    pub year: i32,
    pub description: Option<String>,
    /// Genre slugs
    pub genre: Vec<String>,
    /// Category slug
    pub category: String,
}

/// Partial update of a title
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTitle {
    #[validate(length(min = 1, max = 256, message = "Name must be 1 to 256 characters"))]
    pub name: Option<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
    /// Replaces the whole genre set when present
    pub genre: Option<Vec<String>>,
    pub category: Option<String>,
}

/// New title with slugs resolved to ids
#[derive(Debug, Clone)]
pub struct NewTitle {
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category_id: i64,
    pub genre_ids: Vec<i64>,
}

/// Title update with slugs resolved to ids; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct TitleChanges {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub genre_ids: Option<Vec<i64>>,
}

/// Title list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct TitleQuery {
    /// Genre slug
    pub genre: Option<String>,
    /// Category slug
    pub category: Option<String>,
    pub year: Option<i32>,
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl TitleQuery {
    pub fn page(&self) -> Page {
        Page::new(self.page, self.per_page)
    }
}
