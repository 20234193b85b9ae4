//! Business logic services

pub mod categories;
pub mod comments;
pub mod genres;
pub mod rating;
pub mod reviews;
pub mod titles;

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    repository: Repository,
    pub categories: categories::CategoriesService,
    pub genres: genres::GenresService,
    pub titles: titles::TitlesService,
    pub reviews: reviews::ReviewsService,
    pub comments: comments::CommentsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            categories: categories::CategoriesService::new(repository.clone()),
            genres: genres::GenresService::new(repository.clone()),
            titles: titles::TitlesService::new(repository.clone()),
            reviews: reviews::ReviewsService::new(repository.clone()),
            comments: comments::CommentsService::new(repository.clone()),
            repository,
        }
    }

    /// Check that the database answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
