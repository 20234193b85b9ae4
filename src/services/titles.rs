//! Title catalog service

use std::collections::BTreeSet;

use crate::{
    error::{AppError, AppResult, FieldErrors},
    models::title::{CreateTitle, NewTitle, Title, TitleChanges, TitleQuery, UpdateTitle},
    repository::Repository,
    services::rating,
    validation,
};

#[derive(Clone)]
pub struct TitlesService {
    repository: Repository,
}

impl TitlesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search titles with filters
    pub async fn list(&self, query: &TitleQuery) -> AppResult<(Vec<Title>, i64)> {
        let (records, total) = self.repository.titles.list(query).await?;
        Ok((records.into_iter().map(rating::to_title).collect(), total))
    }

    pub async fn get(&self, id: i64) -> AppResult<Title> {
        let record = self.repository.titles.get_by_id(id).await?;
        Ok(rating::to_title(record))
    }

    pub async fn create(&self, data: &CreateTitle) -> AppResult<Title> {
        let mut extra = FieldErrors::new();
        if let Err(message) = validation::validate_year(data.year, validation::current_year()) {
            validation::push_error(&mut extra, "year", message);
        }
        validation::check(data, extra)?;

        let mut errors = FieldErrors::new();
        let category_id = self.resolve_category(&data.category, &mut errors).await?;
        let genre_ids = self.resolve_genres(&data.genre, &mut errors).await?;
        let (category_id, genre_ids) = match (category_id, genre_ids) {
            (Some(category_id), Some(genre_ids)) if errors.is_empty() => (category_id, genre_ids),
            _ => return Err(AppError::Validation(errors)),
        };

        let new_title = NewTitle {
            name: data.name.clone(),
            year: data.year,
            description: data.description.clone(),
            category_id,
            genre_ids,
        };
        let id = self.repository.titles.create(&new_title).await?;
        tracing::info!(id, name = %new_title.name, "Title created");

        self.get(id).await
    }

    pub async fn update(&self, id: i64, data: &UpdateTitle) -> AppResult<Title> {
        let mut extra = FieldErrors::new();
        if let Some(year) = data.year {
            if let Err(message) = validation::validate_year(year, validation::current_year()) {
                validation::push_error(&mut extra, "year", message);
            }
        }
        validation::check(data, extra)?;

        let mut errors = FieldErrors::new();
        let category_id = match data.category {
            Some(ref slug) => self.resolve_category(slug, &mut errors).await?,
            None => None,
        };
        let genre_ids = match data.genre {
            Some(ref slugs) => self.resolve_genres(slugs, &mut errors).await?,
            None => None,
        };
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let changes = TitleChanges {
            name: data.name.clone(),
            year: data.year,
            description: data.description.clone(),
            category_id,
            genre_ids,
        };
        self.repository.titles.update(id, &changes).await?;
        tracing::info!(id, "Title updated");

        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.titles.delete(id).await?;
        tracing::info!(id, "Title deleted");
        Ok(())
    }

    /// Category slug → id, recording an error on `category` when unknown
    async fn resolve_category(&self, slug: &str, errors: &mut FieldErrors) -> AppResult<Option<i64>> {
        match self.repository.categories.find_by_slug(slug).await? {
            Some(category) => Ok(Some(category.id)),
            None => {
                validation::push_error(errors, "category", format!("Category with slug '{}' does not exist", slug));
                Ok(None)
            }
        }
    }

    /// Genre slugs → ids, recording an error on `genre` per unknown slug.
    /// Repeated slugs collapse to one link.
    async fn resolve_genres(&self, slugs: &[String], errors: &mut FieldErrors) -> AppResult<Option<Vec<i64>>> {
        let wanted: BTreeSet<String> = slugs.iter().cloned().collect();
        let wanted: Vec<String> = wanted.into_iter().collect();
        let found = self.repository.genres.find_by_slugs(&wanted).await?;

        let missing: Vec<&String> = wanted
            .iter()
            .filter(|slug| !found.iter().any(|genre| &genre.slug == *slug))
            .collect();
        if !missing.is_empty() {
            for slug in missing {
                validation::push_error(errors, "genre", format!("Genre with slug '{}' does not exist", slug));
            }
            return Ok(None);
        }

        Ok(Some(found.into_iter().map(|genre| genre.id).collect()))
    }
}
