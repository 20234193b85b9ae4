//! Comment service

use crate::{
    error::{AppError, AppResult},
    models::{
        comment::{Comment, CreateComment, UpdateComment},
        Page,
    },
    repository::Repository,
    validation::{self, RequestContext},
};

#[derive(Clone)]
pub struct CommentsService {
    repository: Repository,
}

impl CommentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, title_id: i64, review_id: i64, page: Page) -> AppResult<(Vec<Comment>, i64)> {
        self.ensure_review(title_id, review_id).await?;
        self.repository.comments.list(review_id, page).await
    }

    pub async fn get(&self, title_id: i64, review_id: i64, comment_id: i64) -> AppResult<Comment> {
        self.ensure_review(title_id, review_id).await?;
        self.repository.comments.get(review_id, comment_id).await
    }

    /// Any number of comments per author and review
    pub async fn create(&self, ctx: &RequestContext, data: &CreateComment) -> AppResult<Comment> {
        let review_id = Self::review_id(ctx)?;
        validation::check(data, Default::default())?;

        // The review may have been deleted since the path was resolved
        self.ensure_review(ctx.title_id, review_id).await?;

        let comment = self.repository.comments.create(review_id, ctx.author_id, data).await?;
        tracing::info!(comment_id = comment.id, review_id, author_id = ctx.author_id, "Comment created");
        Ok(comment)
    }

    pub async fn update(&self, ctx: &RequestContext, comment_id: i64, data: &UpdateComment) -> AppResult<Comment> {
        let review_id = Self::review_id(ctx)?;
        validation::check(data, Default::default())?;
        self.ensure_review(ctx.title_id, review_id).await?;

        let comment = self.repository.comments.update(review_id, comment_id, data).await?;
        tracing::info!(comment_id, "Comment updated");
        Ok(comment)
    }

    pub async fn delete(&self, ctx: &RequestContext, comment_id: i64) -> AppResult<()> {
        let review_id = Self::review_id(ctx)?;
        self.ensure_review(ctx.title_id, review_id).await?;
        self.repository.comments.delete(review_id, comment_id).await?;
        tracing::info!(comment_id, "Comment deleted");
        Ok(())
    }

    async fn ensure_review(&self, title_id: i64, review_id: i64) -> AppResult<()> {
        if !self.repository.reviews.exists(title_id, review_id).await? {
            return Err(AppError::NotFound(format!("Review {} not found", review_id)));
        }
        Ok(())
    }

    fn review_id(ctx: &RequestContext) -> AppResult<i64> {
        ctx.review_id
            .ok_or_else(|| AppError::Internal("Comment write without a review id".to_string()))
    }
}
