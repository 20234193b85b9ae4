//! Titles repository
//!
//! Every title read selects the review count and score sum alongside the row,
//! so the rating is derived from the reviews as they are at read time.

use std::collections::HashMap;

use sqlx::{Pool, Postgres};

use super::like_pattern;
use crate::{
    error::{AppError, AppResult},
    models::{
        genre::{Genre, TitleGenreRow},
        title::{NewTitle, TitleChanges, TitleQuery, TitleRecord, TitleRow},
    },
};

const SELECT_TITLE: &str = r#"
    SELECT t.id, t.name, t.year, t.description,
           c.id AS category_id, c.name AS category_name, c.slug AS category_slug,
           COUNT(r.id) AS review_count,
           SUM(r.score)::bigint AS score_sum
    FROM titles t
    LEFT JOIN categories c ON c.id = t.category_id
    LEFT JOIN reviews r ON r.title_id = t.id
"#;

const TITLE_FILTERS: &str = r#"
    WHERE ($1::text IS NULL OR EXISTS (
              SELECT 1 FROM genre_title gt
              JOIN genres g ON g.id = gt.genre_id
              WHERE gt.title_id = t.id AND g.slug = $1))
      AND ($2::text IS NULL OR c.slug = $2)
      AND ($3::int IS NULL OR t.year = $3)
      AND ($4::text IS NULL OR t.name ILIKE $4)
"#;

#[derive(Clone)]
pub struct TitlesRepository {
    pool: Pool<Postgres>,
}

impl TitlesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// Search titles with filters and pagination
    pub async fn list(&self, query: &TitleQuery) -> AppResult<(Vec<TitleRecord>, i64)> {
        let page = query.page();

        let count_query = format!(
            "SELECT COUNT(*) FROM titles t LEFT JOIN categories c ON c.id = t.category_id {}",
            TITLE_FILTERS
        );
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&query.genre)
            .bind(&query.category)
            .bind(query.year)
            .bind(query.name.as_deref().map(like_pattern))
            .fetch_one(&self.pool)
            .await?;

        let select_query = format!(
            "{} {} GROUP BY t.id, c.id ORDER BY t.name, t.id LIMIT $5 OFFSET $6",
            SELECT_TITLE, TITLE_FILTERS
        );
        let rows = sqlx::query_as::<_, TitleRow>(&select_query)
            .bind(&query.genre)
            .bind(&query.category)
            .bind(query.year)
            .bind(query.name.as_deref().map(like_pattern))
            .bind(page.per_page)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let records = self.attach_genres(rows).await?;
        Ok((records, total))
    }

    /// Get a title by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<TitleRecord> {
        let query = format!("{} WHERE t.id = $1 GROUP BY t.id, c.id", SELECT_TITLE);
        let row = sqlx::query_as::<_, TitleRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Title {} not found", id)))?;

        let mut records = self.attach_genres(vec![row]).await?;
        records
            .pop()
            .ok_or_else(|| AppError::Internal(format!("Title {} lost while loading genres", id)))
    }

    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM titles WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Load the genres of all given titles in one query
    async fn attach_genres(&self, rows: Vec<TitleRow>) -> AppResult<Vec<TitleRecord>> {
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();

        let genre_rows = sqlx::query_as::<_, TitleGenreRow>(
            r#"
            SELECT gt.title_id, g.id, g.name, g.slug
            FROM genre_title gt
            JOIN genres g ON g.id = gt.genre_id
            WHERE gt.title_id = ANY($1)
            ORDER BY g.name, g.id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_title: HashMap<i64, Vec<Genre>> = HashMap::new();
        for genre_row in genre_rows {
            by_title.entry(genre_row.title_id).or_default().push(genre_row.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let genres = by_title.remove(&row.id).unwrap_or_default();
                TitleRecord { row, genres }
            })
            .collect())
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Insert a title and its genre links, returning the new ID
    pub async fn create(&self, data: &NewTitle) -> AppResult<i64> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO titles (name, year, description, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(data.year)
        .bind(&data.description)
        .bind(data.category_id)
        .fetch_one(&mut *tx)
        .await?;

        Self::link_genres(&mut tx, id, &data.genre_ids).await?;

        tx.commit().await?;
        Ok(id)
    }

    /// Apply a partial update; a present genre list replaces the links
    pub async fn update(&self, id: i64, data: &TitleChanges) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let mut sets: Vec<String> = Vec::new();
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.year, "year");
        add_field!(data.description, "description");
        add_field!(data.category_id, "category_id");

        // With nothing to set, still lock the row to prove it exists
        let query = if sets.is_empty() {
            "SELECT id FROM titles WHERE id = $1 FOR UPDATE".to_string()
        } else {
            format!("UPDATE titles SET {} WHERE id = $1 RETURNING id", sets.join(", "))
        };

        let mut builder = sqlx::query_scalar::<_, i64>(&query).bind(id);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.year);
        bind_field!(data.description);
        bind_field!(data.category_id);

        builder
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Title {} not found", id)))?;

        if let Some(ref genre_ids) = data.genre_ids {
            sqlx::query("DELETE FROM genre_title WHERE title_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            Self::link_genres(&mut tx, id, genre_ids).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn link_genres(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        title_id: i64,
        genre_ids: &[i64],
    ) -> AppResult<()> {
        if genre_ids.is_empty() {
            return Ok(());
        }
        sqlx::query(
            r#"
            INSERT INTO genre_title (genre_id, title_id)
            SELECT UNNEST($1::bigint[]), $2
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(genre_ids)
        .bind(title_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Delete a title; reviews and their comments go with it
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM titles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Title {} not found", id)));
        }
        Ok(())
    }
}
