//! Review service
//!
//! An (author, title) pair moves from "no review" to "has review" only through
//! `create`. The existence check here rejects the common duplicate early; the
//! unique constraint in the store settles concurrent creates.

use crate::{
    error::{AppError, AppResult},
    models::{
        review::{CreateReview, Review, UpdateReview},
        Page,
    },
    repository::Repository,
    validation::{self, RequestContext},
};

#[derive(Clone)]
pub struct ReviewsService {
    repository: Repository,
}

impl ReviewsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, title_id: i64, page: Page) -> AppResult<(Vec<Review>, i64)> {
        self.ensure_title(title_id).await?;
        self.repository.reviews.list(title_id, page).await
    }

    pub async fn get(&self, title_id: i64, review_id: i64) -> AppResult<Review> {
        self.repository.reviews.get(title_id, review_id).await
    }

    pub async fn create(&self, ctx: &RequestContext, data: &CreateReview) -> AppResult<Review> {
        validation::check(data, Default::default())?;

        // The title may have been deleted since the path was resolved
        self.ensure_title(ctx.title_id).await?;

        let exists = self
            .repository
            .reviews
            .exists_for_author(ctx.title_id, ctx.author_id)
            .await?;
        validation::validate_review_uniqueness(ctx, exists)?;

        let review = self
            .repository
            .reviews
            .create(ctx.title_id, ctx.author_id, data)
            .await?;
        tracing::info!(review_id = review.id, title_id = ctx.title_id, author_id = ctx.author_id, "Review created");
        Ok(review)
    }

    pub async fn update(&self, ctx: &RequestContext, data: &UpdateReview) -> AppResult<Review> {
        let review_id = Self::review_id(ctx)?;
        validation::check(data, Default::default())?;

        let review = self.repository.reviews.update(ctx.title_id, review_id, data).await?;
        tracing::info!(review_id, "Review updated");
        Ok(review)
    }

    pub async fn delete(&self, ctx: &RequestContext) -> AppResult<()> {
        let review_id = Self::review_id(ctx)?;
        self.repository.reviews.delete(ctx.title_id, review_id).await?;
        tracing::info!(review_id, "Review deleted");
        Ok(())
    }

    async fn ensure_title(&self, title_id: i64) -> AppResult<()> {
        if !self.repository.titles.exists(title_id).await? {
            return Err(AppError::NotFound(format!("Title {} not found", title_id)));
        }
        Ok(())
    }

    fn review_id(ctx: &RequestContext) -> AppResult<i64> {
        ctx.review_id
            .ok_or_else(|| AppError::Internal("Review write without a review id".to_string()))
    }
}
