//! Data models for YaMDb

pub mod category;
pub mod comment;
pub mod genre;
pub mod review;
pub mod title;
pub mod user;

// Re-export commonly used types
pub use category::Category;
pub use comment::Comment;
pub use genre::Genre;
pub use review::Review;
pub use title::Title;
pub use user::{Role, UserClaims};

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PER_PAGE: i64 = 20;
pub const MAX_PER_PAGE: i64 = 100;

/// Page selection resolved from optional query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub per_page: i64,
}

impl Page {
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// Plain pagination query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PageQuery {
    pub fn page(&self) -> Page {
        Page::new(self.page, self.per_page)
    }
}

/// Query parameters for genre and category lists
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct LookupQuery {
    /// Case-insensitive substring of the name
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl LookupQuery {
    pub fn page(&self) -> Page {
        Page::new(self.page, self.per_page)
    }
}
