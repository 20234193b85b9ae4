//! Genre management service

use crate::{
    error::AppResult,
    models::{
        genre::{CreateGenre, Genre},
        LookupQuery,
    },
    repository::Repository,
    validation,
};

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &LookupQuery) -> AppResult<(Vec<Genre>, i64)> {
        self.repository.genres.list(query).await
    }

    pub async fn create(&self, data: &CreateGenre) -> AppResult<Genre> {
        validation::check(data, Default::default())?;
        let genre = self.repository.genres.create(data).await?;
        tracing::info!(slug = %genre.slug, "Genre created");
        Ok(genre)
    }

    pub async fn delete(&self, slug: &str) -> AppResult<()> {
        self.repository.genres.delete(slug).await?;
        tracing::info!(slug, "Genre deleted");
        Ok(())
    }
}
