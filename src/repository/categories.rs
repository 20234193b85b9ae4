//! Categories repository

use sqlx::{Pool, Postgres};

use super::like_pattern;
use crate::{
    error::{AppError, AppResult},
    models::{
        category::{Category, CreateCategory},
        LookupQuery,
    },
};

#[derive(Clone)]
pub struct CategoriesRepository {
    pool: Pool<Postgres>,
}

impl CategoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List categories ordered by name, optionally filtered by name
    pub async fn list(&self, query: &LookupQuery) -> AppResult<(Vec<Category>, i64)> {
        let page = query.page();

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM categories WHERE ($1::text IS NULL OR name ILIKE $1)",
        )
        .bind(query.search.as_deref().map(like_pattern))
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, slug FROM categories
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

    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Category>> {
        let row = sqlx::query_as::<_, Category>("SELECT id, name, slug FROM categories WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Create a category; a taken slug surfaces as a validation error
    pub async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        let row = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, slug) VALUES ($1, $2) RETURNING id, name, slug",
        )
        .bind(&data.name)
        .bind(&data.slug)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Delete a category; its titles keep existing without one
    pub async fn delete(&self, slug: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE slug = $1")
            .bind(slug)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category '{}' not found", slug)));
        }
        Ok(())
    }
}
