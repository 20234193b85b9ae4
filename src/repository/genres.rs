//! Genres repository

use sqlx::{Pool, Postgres};

use super::like_pattern;
use crate::{
    error::{AppError, AppResult},
    models::{
        genre::{CreateGenre, Genre},
        LookupQuery,
    },
};

#[derive(Clone)]
pub struct GenresRepository {
    pool: Pool<Postgres>,
}

impl GenresRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List genres ordered by name, optionally filtered by name
    pub async fn list(&self, query: &LookupQuery) -> AppResult<(Vec<Genre>, i64)> {
        let page = query.page();

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM genres WHERE ($1::text IS NULL OR name ILIKE $1)",
        )
        .bind(query.search.as_deref().map(like_pattern))
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, Genre>(
            r#"
            SELECT id, name, slug FROM genres
            WHERE ($1::text IS NULL OR name ILIKE $1)
            ORDER BY name, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(query.search.as_deref().map(like_pattern))
        .bind(page.per_page)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((rows, total))
    }

    /// Genres whose slug is in `slugs`; unknown slugs are simply absent
    pub async fn find_by_slugs(&self, slugs: &[String]) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>("SELECT id, name, slug FROM genres WHERE slug = ANY($1)")
            .bind(slugs)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Create a genre; a taken slug surfaces as a validation error
    pub async fn create(&self, data: &CreateGenre) -> AppResult<Genre> {
        let row = sqlx::query_as::<_, Genre>(
            "INSERT INTO genres (name, slug) VALUES ($1, $2) RETURNING id, name, slug",
        )
        .bind(&data.name)
        .bind(&data.slug)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Delete a genre and its title associations
    pub async fn delete(&self, slug: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM genres WHERE slug = $1")
            .bind(slug)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Genre '{}' not found", slug)));
        }
        Ok(())
    }
}
