//! Reviews repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        review::{CreateReview, Review, UpdateReview},
        Page,
    },
};

// Columns of the Review read model, given a `reviews` row aliased `r`
const REVIEW_COLUMNS: &str =
    "r.id, r.title_id, r.author_id, u.username AS author, r.text, r.score, r.pub_date";

#[derive(Clone)]
pub struct ReviewsRepository {
    pool: Pool<Postgres>,
}

impl ReviewsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Reviews of a title, newest first
    pub async fn list(&self, title_id: i64, page: Page) -> AppResult<(Vec<Review>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE title_id = $1")
            .bind(title_id)
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            r#"
            SELECT {} FROM reviews r
            JOIN users u ON u.id = r.author_id
            WHERE r.title_id = $1
            ORDER BY r.pub_date DESC, r.id DESC
            LIMIT $2 OFFSET $3
            "#,
            REVIEW_COLUMNS
        );
        let rows = sqlx::query_as::<_, Review>(&query)
            .bind(title_id)
            .bind(page.per_page)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((rows, total))
    }

    /// Get a review of the given title
    pub async fn get(&self, title_id: i64, review_id: i64) -> AppResult<Review> {
        let query = format!(
            r#"
            SELECT {} FROM reviews r
            JOIN users u ON u.id = r.author_id
            WHERE r.id = $1 AND r.title_id = $2
            "#,
            REVIEW_COLUMNS
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(review_id)
            .bind(title_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Review {} not found", review_id)))
    }

    pub async fn exists(&self, title_id: i64, review_id: i64) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM reviews WHERE id = $1 AND title_id = $2)")
                .bind(review_id)
                .bind(title_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Whether the author already reviewed the title
    pub async fn exists_for_author(&self, title_id: i64, author_id: i64) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM reviews WHERE title_id = $1 AND author_id = $2)")
                .bind(title_id)
                .bind(author_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Insert a review. The (author, title) unique constraint rejects a
    /// concurrent duplicate that slipped past the existence check.
    pub async fn create(&self, title_id: i64, author_id: i64, data: &CreateReview) -> AppResult<Review> {
        let query = format!(
            r#"
            WITH r AS (
                INSERT INTO reviews (title_id, author_id, text, score)
                VALUES ($1, $2, $3, $4)
                RETURNING *
            )
            SELECT {} FROM r JOIN users u ON u.id = r.author_id
            "#,
            REVIEW_COLUMNS
        );
        let row = sqlx::query_as::<_, Review>(&query)
            .bind(title_id)
            .bind(author_id)
            .bind(&data.text)
            .bind(data.score)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Update text and/or score; pub_date is never touched
    pub async fn update(&self, title_id: i64, review_id: i64, data: &UpdateReview) -> AppResult<Review> {
        let query = format!(
            r#"
            WITH r AS (
                UPDATE reviews
                SET text = COALESCE($3, text), score = COALESCE($4, score)
                WHERE id = $1 AND title_id = $2
                RETURNING *
            )
            SELECT {} FROM r JOIN users u ON u.id = r.author_id
            "#,
            REVIEW_COLUMNS
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(review_id)
            .bind(title_id)
            .bind(&data.text)
            .bind(data.score)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Review {} not found", review_id)))
    }

    /// Delete a review and its comments
    pub async fn delete(&self, title_id: i64, review_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1 AND title_id = $2")
            .bind(review_id)
            .bind(title_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Review {} not found", review_id)));
        }
        Ok(())
    }
}
