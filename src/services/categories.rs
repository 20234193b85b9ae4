//! Category management service

use crate::{
    error::AppResult,
    models::{
        category::{Category, CreateCategory},
        LookupQuery,
    },
    repository::Repository,
    validation,
};

#[derive(Clone)]
pub struct CategoriesService {
    repository: Repository,
}

impl CategoriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &LookupQuery) -> AppResult<(Vec<Category>, i64)> {
        self.repository.categories.list(query).await
    }

    pub async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        validation::check(data, Default::default())?;
        let category = self.repository.categories.create(data).await?;
        tracing::info!(slug = %category.slug, "Category created");
        Ok(category)
    }

    pub async fn delete(&self, slug: &str) -> AppResult<()> {
        self.repository.categories.delete(slug).await?;
        tracing::info!(slug, "Category deleted");
        Ok(())
    }
}
