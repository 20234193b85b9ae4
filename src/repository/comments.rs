//! Comments repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        comment::{Comment, CreateComment, UpdateComment},
        Page,
    },
};

const COMMENT_COLUMNS: &str = "c.id, c.review_id, c.author_id, u.username AS author, c.text, c.pub_date";

#[derive(Clone)]
pub struct CommentsRepository {
    pool: Pool<Postgres>,
}

impl CommentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Comments of a review, newest first
    pub async fn list(&self, review_id: i64, page: Page) -> AppResult<(Vec<Comment>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE review_id = $1")
            .bind(review_id)
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            r#"
            SELECT {} FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.review_id = $1
            ORDER BY c.pub_date DESC, c.id DESC
            LIMIT $2 OFFSET $3
            "#,
            COMMENT_COLUMNS
        );
        let rows = sqlx::query_as::<_, Comment>(&query)
            .bind(review_id)
            .bind(page.per_page)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((rows, total))
    }

    /// Get a comment of the given review
    pub async fn get(&self, review_id: i64, comment_id: i64) -> AppResult<Comment> {
        let query = format!(
            r#"
            SELECT {} FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.id = $1 AND c.review_id = $2
            "#,
            COMMENT_COLUMNS
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(comment_id)
            .bind(review_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", comment_id)))
    }

    pub async fn create(&self, review_id: i64, author_id: i64, data: &CreateComment) -> AppResult<Comment> {
        let query = format!(
            r#"
            WITH c AS (
                INSERT INTO comments (review_id, author_id, text)
                VALUES ($1, $2, $3)
                RETURNING *
            )
            SELECT {} FROM c JOIN users u ON u.id = c.author_id
            "#,
            COMMENT_COLUMNS
        );
        let row = sqlx::query_as::<_, Comment>(&query)
            .bind(review_id)
            .bind(author_id)
            .bind(&data.text)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn update(&self, review_id: i64, comment_id: i64, data: &UpdateComment) -> AppResult<Comment> {
        let query = format!(
            r#"
            WITH c AS (
                UPDATE comments SET text = COALESCE($3, text)
                WHERE id = $1 AND review_id = $2
                RETURNING *
            )
            SELECT {} FROM c JOIN users u ON u.id = c.author_id
            "#,
            COMMENT_COLUMNS
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(comment_id)
            .bind(review_id)
            .bind(&data.text)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", comment_id)))
    }

    pub async fn delete(&self, review_id: i64, comment_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1 AND review_id = $2")
            .bind(comment_id)
            .bind(review_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Comment {} not found", comment_id)));
        }
        Ok(())
    }
}
